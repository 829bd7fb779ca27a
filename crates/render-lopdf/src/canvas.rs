//! A single-page drawing surface that accumulates a content stream and
//! serializes it as a complete PDF document.

use crate::config::PdfConfig;
use crate::error::PdfError;
use crate::image::{ImageSource, PdfImage};
use crate::text::{self, FontFace, Justification, TextOptions, ASCENT, LINE_SPACING};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use folio_types::{Color, Rect, Size};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use std::io::Write;

/// Bézier control point distance for a quarter circle of radius 1.
const KAPPA: f32 = 0.552_284_8;

/// Wraps `bytes` in a stream with `dict`, Flate-compressing when asked.
pub(crate) fn encode_stream(
    mut dict: Dictionary,
    bytes: Vec<u8>,
    compress: bool,
) -> Result<Stream, PdfError> {
    if !compress {
        return Ok(Stream::new(dict, bytes));
    }
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&bytes)?;
    let compressed = encoder.finish()?;
    dict.set("Filter", "FlateDecode");
    Ok(Stream::new(dict, compressed))
}

/// The box an image is centered in. `y` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPlacement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl BoxPlacement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Settings for [`PdfCanvas::rounded_text_box`]. `y` is the top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBoxOptions {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
    pub font_size: f32,
    pub heading: Option<String>,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub heading_fill_color: Color,
    pub padding: f32,
}

pub struct PdfCanvas {
    config: PdfConfig,
    page: Size,
    content: Content,
    cursor_y: f32,
    images: Vec<PdfImage>,
}

impl PdfCanvas {
    pub fn new(config: PdfConfig) -> Self {
        let page = config.page_dimensions();
        let cursor_y = page.height - config.margin;
        Self {
            config,
            page,
            content: Content { operations: Vec::new() },
            cursor_y,
            images: Vec::new(),
        }
    }

    pub fn config(&self) -> &PdfConfig {
        &self.config
    }

    pub fn page_size(&self) -> Size {
        self.page
    }

    pub fn absolute_left_margin(&self) -> f32 {
        self.config.margin
    }

    pub fn absolute_right_margin(&self) -> f32 {
        self.page.width - self.config.margin
    }

    pub fn absolute_top_margin(&self) -> f32 {
        self.page.height - self.config.margin
    }

    pub fn absolute_x_middle(&self) -> f32 {
        (self.absolute_left_margin() + self.absolute_right_margin()) / 2.0
    }

    pub fn content_width(&self) -> f32 {
        self.absolute_right_margin() - self.absolute_left_margin()
    }

    /// Vertical position of the next line's top, measured from the page bottom.
    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn move_cursor_to(&mut self, y: f32) {
        self.cursor_y = y;
    }

    pub fn operations(&self) -> &[Operation] {
        &self.content.operations
    }

    /// Draws `text` at the cursor, one line per `\n`, justified within the
    /// margins, and moves the cursor below it.
    pub fn add_text(&mut self, text: &str, options: TextOptions) {
        let size = options.font_size.unwrap_or(self.config.font_size);
        self.set_fill(Color::BLACK);
        for line in text.lines() {
            let width = text::estimate_width(line, size);
            let x = match options.justification {
                Justification::Left => self.absolute_left_margin(),
                Justification::Center => self.absolute_x_middle() - width / 2.0,
                Justification::Right => self.absolute_right_margin() - width,
            };
            let baseline = self.cursor_y - size * ASCENT;
            self.show_text(line, options.face, size, x, baseline);
            self.cursor_y -= size * LINE_SPACING;
        }
    }

    /// Scales the image to fit the box, keeping its aspect ratio, and draws it
    /// centered. Returns the rectangle the image occupies.
    pub fn center_image_in_box(
        &mut self,
        source: &ImageSource,
        placement: BoxPlacement,
    ) -> Result<Rect, PdfError> {
        let frame = placement.rect();
        if frame.size().is_empty() {
            return Err(PdfError::InvalidGeometry(format!(
                "image box must have a positive size, got {}x{}",
                placement.width, placement.height
            )));
        }

        let image = PdfImage::load(source, self.config.compress)?;
        let drawn = frame.center_size(image.pixel_size().scale_to_fit(frame.size()));
        self.images.push(image);
        let name = format!("Im{}", self.images.len());
        log::debug!("Placing image {} at {:?}", name, drawn);

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                drawn.width.into(),
                0.into(),
                0.into(),
                drawn.height.into(),
                drawn.x.into(),
                drawn.y.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(drawn)
    }

    /// Draws a rounded box holding `text`, with an optional heading band.
    ///
    /// `customize` receives options seeded from the canvas (full content width
    /// at the cursor) and may change any of them. The body font shrinks until
    /// the text fits the box; lines that still overflow at the minimum size are
    /// dropped with a warning. Returns the box outline.
    pub fn rounded_text_box(
        &mut self,
        text: &str,
        customize: impl FnOnce(&mut TextBoxOptions),
    ) -> Result<Rect, PdfError> {
        let mut opts = TextBoxOptions {
            x: self.absolute_left_margin(),
            y: self.cursor_y,
            width: self.content_width(),
            height: 100.0,
            radius: 5.0,
            font_size: self.config.font_size,
            heading: None,
            fill_color: Color::WHITE,
            stroke_color: Color::BLACK,
            heading_fill_color: Color::gray(0xDD),
            padding: 5.0,
        };
        customize(&mut opts);

        if opts.width <= 0.0 || opts.height <= 0.0 || opts.font_size <= 0.0 {
            return Err(PdfError::InvalidGeometry(format!(
                "text box needs positive width, height and font size, got {}x{} at {}pt",
                opts.width, opts.height, opts.font_size
            )));
        }

        let outline = Rect::from_top_left(opts.x, opts.y, opts.width, opts.height);
        let radius = opts.radius.clamp(0.0, opts.width.min(opts.height) / 2.0);

        self.set_fill(opts.fill_color);
        self.set_stroke(opts.stroke_color);
        self.rounded_path(outline, radius);
        self.push("B", vec![]);

        let mut body_top = outline.top();
        if let Some(heading) = opts.heading.as_deref() {
            let band_height = (opts.font_size + 2.0 * opts.padding).min(opts.height);
            let band = Rect::from_top_left(outline.x, outline.top(), outline.width, band_height);

            self.push("q", vec![]);
            self.rounded_path(outline, radius);
            self.push("W", vec![]);
            self.push("n", vec![]);
            self.set_fill(opts.heading_fill_color);
            self.push(
                "re",
                vec![band.x.into(), band.y.into(), band.width.into(), band.height.into()],
            );
            self.push("f", vec![]);
            self.push("Q", vec![]);

            self.rounded_path(outline, radius);
            self.push("m", vec![band.x.into(), band.y.into()]);
            self.push("l", vec![band.right().into(), band.y.into()]);
            self.push("S", vec![]);

            let x = band.center().x - text::estimate_width(heading, opts.font_size) / 2.0;
            let baseline = band.top() - opts.padding - opts.font_size * ASCENT;
            self.set_fill(Color::BLACK);
            self.show_text(heading, FontFace::Bold, opts.font_size, x, baseline);
            body_top = band.y;
        }

        let body = Rect::new(outline.x, outline.y, outline.width, body_top - outline.y)
            .inset(opts.padding);
        let (size, lines) = text::fit_lines(text, opts.font_size, body.size());
        if size < opts.font_size {
            log::debug!("Shrunk text box body from {}pt to {}pt", opts.font_size, size);
        }

        let mut baseline = body.top() - size * ASCENT;
        self.set_fill(Color::BLACK);
        for (i, line) in lines.iter().enumerate() {
            if baseline < body.y {
                log::warn!(
                    "Text box overflow at {}pt: dropped {} of {} lines",
                    size,
                    lines.len() - i,
                    lines.len()
                );
                break;
            }
            if !line.is_empty() {
                self.show_text(line, FontFace::Regular, size, body.x, baseline);
            }
            baseline -= size * LINE_SPACING;
        }

        self.cursor_y = outline.y;
        Ok(outline)
    }

    /// Serializes the page into a complete PDF file.
    pub fn render_pdf(&self) -> Result<Vec<u8>, PdfError> {
        let mut bytes = Vec::new();
        self.save_to(&mut bytes)?;
        log::info!("Rendered PDF: {} bytes, {} image(s)", bytes.len(), self.images.len());
        Ok(bytes)
    }

    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), PdfError> {
        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for face in FontFace::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(face.resource_name(), font_id);
        }

        let mut xobjects = Dictionary::new();
        for (i, image) in self.images.iter().enumerate() {
            let image_id = document.add_object(image.clone().into_stream());
            xobjects.set(format!("Im{}", i + 1), image_id);
        }

        let resources_id = document.add_object(dictionary! {
            "Font" => fonts,
            "XObject" => xobjects,
        });

        let content = self.content.encode()?;
        let content_id =
            document.add_object(encode_stream(Dictionary::new(), content, self.config.compress)?);

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                self.page.width.into(),
                self.page.height.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });

        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        if let Some(title) = &self.config.title {
            let info_id = document.add_object(dictionary! {
                "Title" => text::win_ansi_string(title),
            });
            document.trailer.set("Info", info_id);
        }

        document.save_to(writer)?;
        Ok(())
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_fill(&mut self, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        self.push("rg", vec![r.into(), g.into(), b.into()]);
    }

    fn set_stroke(&mut self, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        self.push("RG", vec![r.into(), g.into(), b.into()]);
    }

    fn show_text(&mut self, line: &str, face: FontFace, size: f32, x: f32, y: f32) {
        self.push("BT", vec![]);
        let font = Object::Name(face.resource_name().as_bytes().to_vec());
        self.push("Tf", vec![font, size.into()]);
        self.push("Td", vec![x.into(), y.into()]);
        self.push("Tj", vec![text::win_ansi_string(line)]);
        self.push("ET", vec![]);
    }

    fn rounded_path(&mut self, rect: Rect, radius: f32) {
        let (x, y, w, h, r) = (rect.x, rect.y, rect.width, rect.height, radius);
        let k = KAPPA * r;
        self.push("m", vec![(x + r).into(), y.into()]);
        self.push("l", vec![(x + w - r).into(), y.into()]);
        self.curve(x + w - r + k, y, x + w, y + r - k, x + w, y + r);
        self.push("l", vec![(x + w).into(), (y + h - r).into()]);
        self.curve(x + w, y + h - r + k, x + w - r + k, y + h, x + w - r, y + h);
        self.push("l", vec![(x + r).into(), (y + h).into()]);
        self.curve(x + r - k, y + h, x, y + h - r + k, x, y + h - r);
        self.push("l", vec![x.into(), (y + r).into()]);
        self.curve(x, y + r - k, x + r - k, y, x + r, y);
        self.push("h", vec![]);
    }

    fn curve(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x3: f32, y3: f32) {
        self.push(
            "c",
            vec![x1.into(), y1.into(), x2.into(), y2.into(), x3.into(), y3.into()],
        );
    }
}
