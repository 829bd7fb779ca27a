//! Text encoding and line filling for the standard Helvetica faces.
//!
//! Widths are estimated from an average glyph width rather than real font
//! metrics, which is close enough to place and fill lines of prose.

use folio_types::Size;
use lopdf::{Object, StringFormat};

/// Average Helvetica glyph width as a fraction of the font size.
pub const AVERAGE_GLYPH_WIDTH: f32 = 0.5;

/// Line height as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;

/// Rough ascent of Helvetica as a fraction of the font size.
pub const ASCENT: f32 = 0.75;

/// Smallest size [`fit_lines`] shrinks text to.
pub const MIN_FONT_SIZE: f32 = 4.0;

const SHRINK_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontFace {
    #[default]
    Regular,
    Bold,
}

impl FontFace {
    pub const ALL: [FontFace; 2] = [FontFace::Regular, FontFace::Bold];

    /// The name the page resources use for this face.
    pub fn resource_name(self) -> &'static str {
        match self {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

/// Options for [`PdfCanvas::add_text`](crate::PdfCanvas::add_text).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextOptions {
    pub justification: Justification,
    /// Falls back to the canvas default when `None`.
    pub font_size: Option<f32>,
    pub face: FontFace,
}

impl TextOptions {
    pub fn centered(font_size: f32) -> Self {
        Self {
            justification: Justification::Center,
            font_size: Some(font_size),
            face: FontFace::Regular,
        }
    }
}

pub fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH
}

/// Encodes `text` as a WinAnsi literal string. Characters outside Latin-1 become `?`.
pub fn win_ansi_string(text: &str) -> Object {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();
    Object::String(bytes, StringFormat::Literal)
}

/// Greedily fills words into lines no wider than `max_width`.
///
/// Single newlines are treated as spaces, so hard-wrapped source text reflows;
/// a blank line starts a new paragraph and is kept as an empty line. A word wider
/// than the line gets a line of its own.
pub fn fill_lines(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let paragraphs: Vec<String> = text
        .split("\n\n")
        .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|p| !p.is_empty())
        .collect();

    for (i, paragraph) in paragraphs.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if current.is_empty() || estimate_width(&candidate, font_size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Distance from the top of the first of `count` lines to the last baseline.
pub fn block_height(count: usize, font_size: f32) -> f32 {
    match count {
        0 => 0.0,
        n => font_size * ASCENT + (n - 1) as f32 * font_size * LINE_SPACING,
    }
}

/// Fills `text` into `area`, stepping the font size down from `font_size` in
/// half points until every line fits or [`MIN_FONT_SIZE`] is reached.
///
/// Returns the chosen size and the lines filled at it. At the minimum size the
/// lines may still be taller than `area`.
pub fn fit_lines(text: &str, font_size: f32, area: Size) -> (f32, Vec<String>) {
    let mut size = font_size;
    loop {
        let lines = fill_lines(text, size, area.width);
        let next = size - SHRINK_STEP;
        if block_height(lines.len(), size) <= area.height || next < MIN_FONT_SIZE {
            return (size, lines);
        }
        size = next;
    }
}
