//! Image loading for `Image` XObjects.

use crate::canvas::encode_stream;
use crate::error::PdfError;
use folio_types::Size;
use image::codecs::jpeg::JpegDecoder;
use image::{ColorType, ImageDecoder, ImageFormat};
use lopdf::{dictionary, Stream};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Where an image's bytes come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl ImageSource {
    pub fn read(&self) -> Result<Cow<'_, [u8]>, PdfError> {
        match self {
            ImageSource::Path(path) => std::fs::read(path)
                .map(Cow::Owned)
                .map_err(|source| PdfError::ImageRead { path: path.clone(), source }),
            ImageSource::Bytes(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}

impl From<&Path> for ImageSource {
    fn from(path: &Path) -> Self {
        ImageSource::Path(path.to_path_buf())
    }
}

impl From<&str> for ImageSource {
    fn from(path: &str) -> Self {
        ImageSource::Path(PathBuf::from(path))
    }
}

impl From<String> for ImageSource {
    fn from(path: String) -> Self {
        ImageSource::Path(PathBuf::from(path))
    }
}

impl From<Vec<u8>> for ImageSource {
    fn from(bytes: Vec<u8>) -> Self {
        ImageSource::Bytes(bytes)
    }
}

/// An image ready to be added to a document as an XObject.
#[derive(Debug, Clone)]
pub struct PdfImage {
    width: u32,
    height: u32,
    stream: Stream,
}

impl PdfImage {
    pub fn load(source: &ImageSource, compress: bool) -> Result<Self, PdfError> {
        let bytes = source.read()?;
        Self::from_bytes(&bytes, compress)
    }

    /// JPEG data is embedded as-is under `DCTDecode`. Any other format the
    /// `image` crate can decode is converted to 8-bit RGB samples; alpha is dropped.
    pub fn from_bytes(bytes: &[u8], compress: bool) -> Result<Self, PdfError> {
        if image::guess_format(bytes)? == ImageFormat::Jpeg {
            let decoder = JpegDecoder::new(Cursor::new(bytes))?;
            let (width, height) = decoder.dimensions();
            let color_space = match decoder.color_type() {
                ColorType::L8 | ColorType::L16 => "DeviceGray",
                _ => "DeviceRGB",
            };
            let dict = dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => color_space,
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            };
            return Ok(Self { width, height, stream: Stream::new(dict, bytes.to_vec()) });
        }

        let rgb = image::load_from_memory(bytes)?.to_rgb8();
        let (width, height) = rgb.dimensions();
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        let stream = encode_stream(dict, rgb.into_raw(), compress)?;
        Ok(Self { width, height, stream })
    }

    pub fn pixel_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    pub fn filter(&self) -> Option<&[u8]> {
        self.stream.dict.get(b"Filter").and_then(|f| f.as_name()).ok()
    }

    pub(crate) fn into_stream(self) -> Stream {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};

    fn encode(img: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_png_becomes_raw_rgb() {
        let img = ImageBuffer::from_pixel(4, 2, Rgba([255u8, 0, 0, 128]));
        let png = encode(image::DynamicImage::ImageRgba8(img), ImageFormat::Png);

        let pdf_image = PdfImage::from_bytes(&png, false).unwrap();
        assert_eq!(pdf_image.pixel_size(), Size::new(4.0, 2.0));
        assert_eq!(pdf_image.filter(), None);
        assert_eq!(pdf_image.into_stream().content.len(), 4 * 2 * 3);
    }

    #[test]
    fn test_compressed_png_uses_flate() {
        let img = ImageBuffer::from_pixel(8, 8, Rgb([10u8, 20, 30]));
        let png = encode(image::DynamicImage::ImageRgb8(img), ImageFormat::Png);

        let pdf_image = PdfImage::from_bytes(&png, true).unwrap();
        assert_eq!(pdf_image.filter(), Some(&b"FlateDecode"[..]));
    }

    #[test]
    fn test_jpeg_is_passed_through() {
        let img = ImageBuffer::from_pixel(6, 3, Rgb([0u8, 128, 255]));
        let jpeg = encode(image::DynamicImage::ImageRgb8(img), ImageFormat::Jpeg);

        let pdf_image = PdfImage::from_bytes(&jpeg, true).unwrap();
        assert_eq!(pdf_image.pixel_size(), Size::new(6.0, 3.0));
        assert_eq!(pdf_image.filter(), Some(&b"DCTDecode"[..]));
        assert_eq!(pdf_image.into_stream().content, jpeg);
    }

    #[test]
    fn test_missing_file_names_the_path() {
        let source = ImageSource::from("/definitely/not/here.png");
        let err = PdfImage::load(&source, true).unwrap_err();
        assert!(matches!(err, PdfError::ImageRead { .. }));
        assert!(err.to_string().contains("/definitely/not/here.png"));
    }

    #[test]
    fn test_garbage_bytes_are_an_image_error() {
        let err = PdfImage::from_bytes(b"not an image", true).unwrap_err();
        assert!(matches!(err, PdfError::Image(_)));
    }
}
