//! PDF drawing helpers for Folio formatters, built on lopdf.
//!
//! A formatter owns a [`PdfCanvas`], draws into it from its stage handlers and
//! calls [`PdfCanvas::render_pdf`] from its finalize handler. Everything is laid
//! out on a single page using the standard Helvetica faces.

mod canvas;
mod config;
mod error;
mod image;
pub mod text;

pub use canvas::{BoxPlacement, PdfCanvas, TextBoxOptions};
pub use config::{Orientation, PageSize, PdfConfig};
pub use error::PdfError;
pub use image::{ImageSource, PdfImage};
pub use text::{FontFace, Justification, TextOptions};
