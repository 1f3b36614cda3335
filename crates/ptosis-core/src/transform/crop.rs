//! Orientation-aware cropping.
//!
//! The crop rect is given in display space, but pixels are stored as
//! captured. For landscape orientations the buffer is a quarter turn away
//! from the display, so the rect is switched (x/y and width/height swapped)
//! before it is applied to the buffer.
//!
//! The rect is then snapped outwards to whole pixels and intersected with
//! the buffer bounds, so a rect hanging over an edge yields the overlapping
//! part.
//!
//! # Example
//!
//! ```ignore
//! let eye = crop(&image, Rect::new(120.0, 80.0, 400.0, 200.0))?;
//! ```

use image::imageops;

use super::GeometryError;
use crate::decode::RasterImage;
use crate::geometry::Rect;

/// Crop an image to `rect`, keeping its scale and orientation tag.
///
/// # Errors
///
/// Returns `GeometryError::InvalidRect` when a rect component is NaN or
/// infinite, and `GeometryError::CropOutsideImage` when the rect does not
/// overlap the pixel buffer.
pub fn crop(image: &RasterImage, rect: Rect) -> Result<RasterImage, GeometryError> {
    if !rect.is_finite() {
        return Err(GeometryError::InvalidRect(rect));
    }

    let cropping_rect = if image.orientation().is_landscape() {
        rect.switched()
    } else {
        rect
    };

    let (width, height) = (image.width(), image.height());
    let bounds = Rect::new(0.0, 0.0, width as f64, height as f64);
    let region = cropping_rect
        .integral()
        .intersection(&bounds)
        .ok_or(GeometryError::CropOutsideImage {
            rect,
            width,
            height,
        })?;

    let cropped = imageops::crop_imm(
        image.pixels(),
        region.x as u32,
        region.y as u32,
        region.width as u32,
        region.height as u32,
    )
    .to_image();

    // Non-empty by construction: the intersection has positive extent
    RasterImage::new(cropped, image.scale(), image.orientation()).map_err(|_| {
        GeometryError::CropOutsideImage {
            rect,
            width,
            height,
        }
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
