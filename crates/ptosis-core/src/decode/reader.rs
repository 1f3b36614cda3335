//! Decoding encoded image bytes (JPEG, PNG) into raster images.
//!
//! Camera captures usually store pixels in sensor order and record the
//! display orientation in EXIF. `decode_image` keeps that split: the pixels
//! stay as stored and the EXIF value becomes the image's orientation tag.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;

use super::{DecodeError, Orientation, RasterImage};

/// Decode image bytes, keeping the EXIF orientation as the image's tag.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognised
/// and `DecodeError::CorruptedFile` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let pixels = decode_pixels(bytes)?;
    RasterImage::new(pixels, 1.0, orientation)
}

/// Decode image bytes and bake the EXIF orientation into the pixels.
///
/// The returned image is always tagged `Orientation::Up`.
pub fn decode_image_upright(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    Ok(decode_image(bytes)?.to_upright())
}

/// Extract the EXIF orientation value from encoded bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_pixels(bytes: &[u8]) -> Result<super::PixelBuffer, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    Ok(img.into_rgba8())
}

/// Returns `Orientation::Up` if no EXIF data is found or the orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(e) => {
            tracing::debug!("no EXIF orientation: {}", e);
            Orientation::Up
        }
    }
}
