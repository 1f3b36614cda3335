//! PNG encoding using the `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::decode::PixelBuffer;

/// PNG signature bytes every encoded file starts with.
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA buffer as PNG bytes.
///
/// # Example
///
/// ```ignore
/// let png = encode_png(&PixelBuffer::from_pixel(4, 4, Rgba([0, 0, 0, 255])))?;
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(pixels: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    encode_png_rgba(pixels.as_raw(), pixels.width(), pixels.height())
}

/// Encode raw RGBA bytes (4 bytes per pixel, row-major) as PNG.
pub fn encode_png_rgba(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    tracing::debug!(width, height, bytes = buffer.len(), "encoded png");
    Ok(buffer)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
