//! Rotation by an arbitrary angle.
//!
//! # Drawing Recipe
//!
//! ```text
//! radians = -degrees * π / 180
//! canvas  = image size            (cropped: corners clip)
//!         | rotated bounding box  (uncropped: canvas grows)
//!
//! translate(canvas.w / 2, canvas.h / 2)
//! scale(1, -1)         -- undo the bitmap row inversion
//! rotate(radians)
//! draw_bitmap(image, centred on the origin)
//! ```
//!
//! The vertical flip and the bitmap row order cancel out, and conjugating
//! the rotation by that flip reverses its sense: on screen the image turns
//! by `+degrees`, clockwise for positive values. 0° is the identity.
//!
//! The canvas is opened at scale 1, so the output has one pixel per point
//! of the source's display size.

use super::GeometryError;
use crate::decode::RasterImage;
use crate::geometry::{AffineTransform, Rect, Size};
use crate::surface::{Canvas, Surface};

/// Canvas size needed to rotate `size` by `degrees`.
///
/// With `cropped` the canvas keeps the source size. Otherwise it is the
/// bounding box of the rotated rect, so no corner is clipped.
///
/// # Example
///
/// ```ignore
/// // 90-degree rotation swaps dimensions
/// let size = rotated_canvas_size(Size::new(100.0, 50.0), 90.0, false);
/// assert_eq!((size.width.round(), size.height.round()), (50.0, 100.0));
/// ```
pub fn rotated_canvas_size(size: Size, degrees: f64, cropped: bool) -> Size {
    if cropped {
        return size;
    }
    Rect::from_size(size)
        .applying(&AffineTransform::rotation(to_radians(degrees)))
        .size()
}

/// Rotate an image around its centre.
///
/// The output is upright, at scale 1, with transparent corners where the
/// rotated image does not cover the canvas.
///
/// # Panics
///
/// Panics if `degrees` is not finite or the surface cannot provide a canvas.
/// Use [`try_rotate`] when the angle comes from outside.
pub fn rotate<S: Surface>(
    surface: &S,
    image: &RasterImage,
    degrees: f64,
    cropped: bool,
) -> RasterImage {
    try_rotate(surface, image, degrees, cropped)
        .unwrap_or_else(|e| panic!("rotate by {degrees}°: {e}"))
}

/// Rotate an image around its centre, reporting failures.
///
/// # Errors
///
/// Returns `GeometryError::InvalidAngle` for a NaN or infinite angle and
/// `GeometryError::Surface` if the canvas cannot be created.
pub fn try_rotate<S: Surface>(
    surface: &S,
    image: &RasterImage,
    degrees: f64,
    cropped: bool,
) -> Result<RasterImage, GeometryError> {
    if !degrees.is_finite() {
        return Err(GeometryError::InvalidAngle(degrees));
    }

    let radians = to_radians(degrees);
    let size = image.size();
    let canvas_size = rotated_canvas_size(size, degrees, cropped);

    let mut canvas = surface.create_canvas(canvas_size, 1.0)?;
    canvas.translate_by(canvas_size.width / 2.0, canvas_size.height / 2.0);
    canvas.scale_by(1.0, -1.0);
    canvas.rotate_by(radians);
    canvas.draw_bitmap(
        image,
        Rect::new(
            -size.width / 2.0,
            -size.height / 2.0,
            size.width,
            size.height,
        ),
    );
    Ok(canvas.into_image())
}

/// Screen-space sense: positive degrees become a negative context angle.
#[inline]
fn to_radians(degrees: f64) -> f64 {
    -degrees * std::f64::consts::PI / 180.0
}


// ============================================================================
// Property-Based Tests
// ============================================================================
