//! Renderer specifications and formatter dispatch.
//!
//! This crate provides the pieces every Folio document type is built from:
//! - `RendererSpec`: the declared options and stages of a document type
//! - `OptionsContext`: the per-render option values handed to each stage
//! - `Formatter`: the backend trait, with `StageHandlers` for name-based handler tables
//! - `FormatterRegistry`: `(renderer, format)` to formatter constructor lookup
//! - `render` / `RenderRequest`: validation and stage dispatch

mod dispatch;
mod error;
mod formatter;
mod options;
mod registry;
mod spec;

pub use dispatch::{execute, render, render_with_options, RenderRequest};
pub use error::{FormatterError, OptionError, RegistryError, RenderError};
pub use formatter::{
    Formatter, HandlerFormatter, OutputHandler, RenderOutput, StageHandler, StageHandlers,
};
pub use options::OptionsContext;
pub use registry::{FormatterConstructor, FormatterFactory, FormatterRegistry};
pub use spec::{DeclarationWarning, RendererSpec, RendererSpecBuilder, StageDescriptor, StageKind};

pub use folio_types::{FormatId, RendererId, StageName};
