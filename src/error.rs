use folio_render_core::{RegistryError, RenderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
