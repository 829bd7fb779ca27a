use folio_render_core::FormatterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("PDF library error: {0}")]
    Lopdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
}

impl From<PdfError> for FormatterError {
    fn from(err: PdfError) -> Self {
        match err {
            PdfError::Io(io) => FormatterError::Io(io),
            other => FormatterError::Backend(other.to_string()),
        }
    }
}
