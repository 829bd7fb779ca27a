//! A quote rendered into a centered, rounded PDF text box.
//!
//! The `document` renderer needs `text` and `author`, and accepts `heading`,
//! `width`, `height`, `font_size`, `image`, `fill_color` and
//! `heading_fill_color`. Its PDF formatter writes the author line, an optional
//! portrait, then the quote inside a rounded box. Colors are `#RRGGBB` or
//! `#RGB` strings.

use folio_render_core::{
    FormatterError, FormatterRegistry, HandlerFormatter, OptionsContext, RenderOutput,
    RendererSpec, StageHandlers,
};
use folio_render_lopdf::{BoxPlacement, ImageSource, PdfCanvas, PdfConfig, TextOptions};
use folio_types::Color;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;

pub const PDF: &str = "pdf";

/// The passage from Emerson's "Self-Reliance" the demo renders.
pub const EMERSON_QUOTE: &str =
    "A foolish consistency is the hobgoblin of little minds, adored by little
statesmen and philosophers and divines. With consistency a great soul has simply
nothing to do. He may as well concern himself with his shadow on the wall. Speak
what you think now in hard words and to-morrow speak what to-morrow thinks in
hard words again, though it contradict every thing you said to-day.--\"Ah, so you
shall be sure to be misunderstood.\"--Is it so bad then to be misunderstood?
Pythagoras was misunderstood, and Socrates, and Jesus, and Luther, and
Copernicus, and Galileo, and Newton, and every pure and wise spirit that ever took
flesh. To be great is to be misunderstood.";

const AUTHOR_FONT_SIZE: f32 = 20.0;
const IMAGE_BOX: (f32, f32) = (239.0, 359.0);
const IMAGE_BOX_BOTTOM: f32 = 325.0;
const TEXT_BOX_TOP: f32 = 300.0;
const TEXT_BOX_RADIUS: f32 = 5.0;

pub static DOCUMENT: Lazy<RendererSpec> = Lazy::new(|| {
    RendererSpec::builder("document")
        .declare_required_options(["text", "author"])
        .declare_options(["heading", "width", "height", "font_size", "image"])
        .declare_options(["fill_color", "heading_fill_color"])
        .declare_stage("document_body")
        .declare_finalize("document")
        .build()
});

/// Typed view of the `document` options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentOptions {
    pub text: String,
    pub author: String,
    pub heading: Option<String>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub font_size: Option<f32>,
    pub image: Option<PathBuf>,
    pub fill_color: Option<Color>,
    pub heading_fill_color: Option<Color>,
}

impl DocumentOptions {
    pub fn box_width(&self) -> f32 {
        self.width.unwrap_or(400.0)
    }

    pub fn box_height(&self) -> f32 {
        self.height.unwrap_or(130.0)
    }

    pub fn box_font_size(&self) -> f32 {
        self.font_size.unwrap_or(12.0)
    }
}

pub struct CenteredPdfTextBox {
    canvas: PdfCanvas,
    pdf: Option<Vec<u8>>,
}

impl Default for CenteredPdfTextBox {
    fn default() -> Self {
        Self::new(PdfConfig::default())
    }
}

impl CenteredPdfTextBox {
    pub fn new(config: PdfConfig) -> Self {
        Self { canvas: PdfCanvas::new(config), pdf: None }
    }

    pub fn canvas(&self) -> &PdfCanvas {
        &self.canvas
    }

    fn build_document_body(&mut self, options: &OptionsContext) -> Result<(), FormatterError> {
        let opts: DocumentOptions = options.extract()?;
        log::debug!("Drawing quote by {} ({} chars)", opts.author, opts.text.len());

        self.canvas
            .add_text(&format!("-- {} --", opts.author), TextOptions::centered(AUTHOR_FONT_SIZE));

        let middle = self.canvas.absolute_x_middle();
        if let Some(image) = &opts.image {
            let (width, height) = IMAGE_BOX;
            let placement = BoxPlacement {
                x: middle - width / 2.0,
                y: IMAGE_BOX_BOTTOM,
                width,
                height,
            };
            self.canvas.center_image_in_box(&ImageSource::from(image.clone()), placement)?;
        }

        self.canvas.rounded_text_box(&opts.text, |o| {
            o.width = opts.box_width();
            o.height = opts.box_height();
            o.x = middle - o.width / 2.0;
            o.y = TEXT_BOX_TOP;
            o.radius = TEXT_BOX_RADIUS;
            o.font_size = opts.box_font_size();
            o.heading = opts.heading.clone();
            if let Some(color) = opts.fill_color {
                o.fill_color = color;
            }
            if let Some(color) = opts.heading_fill_color {
                o.heading_fill_color = color;
            }
        })?;
        Ok(())
    }

    fn finalize_document(&mut self, _: &OptionsContext) -> Result<(), FormatterError> {
        self.pdf = Some(self.canvas.render_pdf()?);
        Ok(())
    }

    fn output(&mut self) -> Result<RenderOutput, FormatterError> {
        self.pdf.take().map(RenderOutput::Bytes).ok_or(FormatterError::MissingOutput)
    }
}

static HANDLERS: Lazy<StageHandlers<CenteredPdfTextBox>> = Lazy::new(|| {
    StageHandlers::new()
        .on_build("document_body", CenteredPdfTextBox::build_document_body)
        .on_finalize("document", CenteredPdfTextBox::finalize_document)
        .with_output(CenteredPdfTextBox::output)
});

/// Wraps a fresh formatter in its handler table.
pub fn pdf_formatter(config: PdfConfig) -> HandlerFormatter<CenteredPdfTextBox> {
    HandlerFormatter::new(CenteredPdfTextBox::new(config), &HANDLERS)
}

/// Adds every formatter in this module to `registry`.
pub fn register_formatters(registry: &mut FormatterRegistry) {
    registry.register_for(&DOCUMENT, PDF, || Box::new(pdf_formatter(PdfConfig::default())));
}

pub fn default_registry() -> FormatterRegistry {
    let mut registry = FormatterRegistry::new();
    register_formatters(&mut registry);
    registry
}
