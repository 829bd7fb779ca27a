//! Folio renders documents through declared stages and pluggable formatters.
//!
//! A document type is a [`RendererSpec`]: the options it needs and the stages it
//! is built from. Output formats are formatters registered against that spec in
//! a [`FormatterRegistry`]. The [`document`] module has a complete example that
//! renders a quote into a PDF text box.
//!
//! ```no_run
//! use folio::document::{default_registry, DOCUMENT};
//! use folio::render;
//!
//! let registry = default_registry();
//! let pdf = render(
//!     &DOCUMENT,
//!     &registry,
//!     "pdf",
//!     [("author", "Ralph Waldo Emerson"), ("heading", "a good quote")],
//!     Some(&|o: &mut folio::OptionsContext| {
//!         o.set("text", "A foolish consistency is the hobgoblin of little minds.");
//!     }),
//! )?;
//! std::fs::write("quote.pdf", pdf.as_bytes())?;
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod document;
mod error;

pub use error::FolioError;
pub use folio_render_core::*;

pub use folio_render_lopdf as pdf;
pub use folio_types as types;
