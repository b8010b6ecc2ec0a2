//! Image loading
//!
//! Decodes the base image that every composited frame starts from.

use std::path::Path;

/// File extensions accepted by [`load_image`].
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "tif", "tiff", "jpg", "jpeg", "bmp"];

/// Decoded base image data.
///
/// The base image is never mutated after loading; the compositor copies it
/// for every rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Interleaved 8-bit RGB, row-major (3 bytes per pixel)
    pub data: Vec<u8>,
}

impl BaseImage {
    /// Build from raw interleaved RGB bytes.
    pub fn from_rgb8(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(format!(
                "Image buffer is {} bytes, expected {} for {}x{} RGB",
                data.len(),
                expected,
                width,
                height
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Decode an image from a file path into 8-bit RGB.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<BaseImage, String> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| "No file extension found".to_string())?;

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(format!("Unsupported file format: {}", extension));
    }

    let decoded =
        image::open(path).map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    BaseImage::from_rgb8(width, height, rgb.into_raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_missing_extension() {
        let err = load_image("/tmp/no-extension").unwrap_err();
        assert!(err.contains("No file extension"), "got: {}", err);
    }

    #[test]
    fn test_load_rejects_unsupported_format() {
        let err = load_image("/tmp/image.webm").unwrap_err();
        assert!(err.contains("Unsupported file format"), "got: {}", err);
    }

    #[test]
    fn test_load_reports_decode_failure() {
        let err = load_image("/nonexistent/relume-missing.png").unwrap_err();
        assert!(err.contains("Failed to decode"), "got: {}", err);
    }

    #[test]
    fn test_from_rgb8_checks_buffer_size() {
        assert!(BaseImage::from_rgb8(4, 4, vec![0; 48]).is_ok());
        let err = BaseImage::from_rgb8(4, 4, vec![0; 47]).unwrap_err();
        assert!(err.contains("expected 48"), "got: {}", err);
    }
}
