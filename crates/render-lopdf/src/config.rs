use folio_types::Size;

/// Paper sizes, in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum PageSize {
    A4,
    #[default]
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions(self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.0, 842.0),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(width, height),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page setup shared by every drawing call on a [`PdfCanvas`](crate::PdfCanvas).
#[derive(Debug, Clone, PartialEq)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// Uniform page margin in points.
    pub margin: f32,
    /// Font size used when a drawing call does not set one.
    pub font_size: f32,
    /// Flate-compress content and image streams.
    pub compress: bool,
    pub title: Option<String>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            orientation: Orientation::default(),
            margin: 36.0,
            font_size: 10.0,
            compress: true,
            title: None,
        }
    }
}

impl PdfConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Page dimensions after applying the orientation.
    pub fn page_dimensions(&self) -> Size {
        let size = self.page_size.dimensions();
        match self.orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => Size::new(size.height, size.width),
        }
    }
}
