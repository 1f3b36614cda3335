//! Aspect-preserving resize into a target box.
//!
//! - **Fit** (letterbox): the whole image lands inside the box
//! - **Fill** (cover): the image covers the box, overflowing on one axis
//!
//! Both draw the source at the origin of a fresh canvas at scale 1; nothing
//! is cropped.

use super::GeometryError;
use crate::decode::RasterImage;
use crate::geometry::{Rect, Size};
use crate::surface::{Canvas, Surface};

/// Size of `source` scaled by `min(target.w / source.w, target.h / source.h)`.
pub fn fitted_size(source: Size, target: Size) -> Size {
    let ratio = (target.width / source.width).min(target.height / source.height);
    source.scaled(ratio)
}

/// Size of `source` scaled by `max(target.w / source.w, target.h / source.h)`.
pub fn filled_size(source: Size, target: Size) -> Size {
    let ratio = (target.width / source.width).max(target.height / source.height);
    source.scaled(ratio)
}

/// Resize so the image fits inside `target`, preserving aspect ratio.
///
/// # Errors
///
/// Returns `GeometryError::InvalidTargetSize` for an empty target and
/// `GeometryError::Surface` if the canvas cannot be created.
///
/// # Example
///
/// ```ignore
/// // 1200x800 into a 300x300 box -> 300x200
/// let thumb = resize_to_fit(&SoftwareSurface::new(), &image, Size::new(300.0, 300.0))?;
/// ```
pub fn resize_to_fit<S: Surface>(
    surface: &S,
    image: &RasterImage,
    target: Size,
) -> Result<RasterImage, GeometryError> {
    if target.is_empty() {
        return Err(GeometryError::InvalidTargetSize(target));
    }
    draw_resized(surface, image, fitted_size(image.size(), target))
}

/// Resize so the image covers `target`, preserving aspect ratio.
///
/// One output dimension matches the target; the other overflows it.
pub fn resize_to_fill<S: Surface>(
    surface: &S,
    image: &RasterImage,
    target: Size,
) -> Result<RasterImage, GeometryError> {
    if target.is_empty() {
        return Err(GeometryError::InvalidTargetSize(target));
    }
    draw_resized(surface, image, filled_size(image.size(), target))
}

fn draw_resized<S: Surface>(
    surface: &S,
    image: &RasterImage,
    size: Size,
) -> Result<RasterImage, GeometryError> {
    let mut canvas = surface.create_canvas(size, 1.0)?;
    canvas.draw_image(image, Rect::from_size(size));
    Ok(canvas.into_image())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
