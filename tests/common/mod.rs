pub mod pdf_assertions;

use folio::document::{default_registry, DOCUMENT, PDF};
use folio::{render, OptionsContext, RenderError};
use lopdf::Document as LopdfDocument;
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const EMERSON: &str = "A foolish consistency is the hobgoblin of little minds, adored by little
statesmen and philosophers and divines. With consistency a great soul has simply
nothing to do. He may as well concern himself with his shadow on the wall.";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Every string shown with `Tj`, in drawing order.
    pub fn shown_text(&self) -> Vec<String> {
        pdf_assertions::shown_strings(&self.doc)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.shown_text().iter().any(|s| s.contains(needle))
    }
}

/// Renders the quote document as PDF with `values`, letting `customize` adjust
/// the options afterwards.
pub fn render_document<I>(
    values: I,
    customize: Option<&dyn Fn(&mut OptionsContext)>,
) -> Result<GeneratedPdf, RenderError>
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    let output = render(&DOCUMENT, &default_registry(), PDF, values, customize)?;
    Ok(GeneratedPdf::from_bytes(output.into_bytes()).expect("renderer produced an unreadable PDF"))
}
