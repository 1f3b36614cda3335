//! Mirroring through the drawing surface.
//!
//! Both flips draw the source with `draw_image` onto a canvas of its own
//! size and scale:
//!
//! | Operation         | Canvas transform                    | Result           |
//! |-------------------|-------------------------------------|------------------|
//! | `flip_vertical`   | `translate(0, 0)`, `scale(1, 1)`    | unchanged pixels |
//! | `flip_horizontal` | `translate(w, h)`, `scale(-1, -1)`  | 180° turn        |
//!
//! `flip_horizontal` mirrors both axes, so applying it twice restores the
//! source.
//!
//! The flips place rows top-down through `draw_image`. `rotate` draws with
//! `draw_bitmap` and its bottom-up row convention instead, so the two
//! recipes are not interchangeable.

use super::GeometryError;
use crate::decode::RasterImage;
use crate::geometry::Rect;
use crate::surface::{Canvas, Surface};

/// Redraw the image unchanged.
///
/// The canvas transform is the identity, so the output holds the display
/// pixels of `image` at its scale.
///
/// # Panics
///
/// Panics if the surface cannot provide a canvas.
pub fn flip_vertical<S: Surface>(surface: &S, image: &RasterImage) -> RasterImage {
    mirrored(surface, image, (0.0, 0.0), (1.0, 1.0))
        .unwrap_or_else(|e| panic!("flip vertical: {e}"))
}

/// Mirror the image on both axes.
///
/// # Panics
///
/// Panics if the surface cannot provide a canvas.
pub fn flip_horizontal<S: Surface>(surface: &S, image: &RasterImage) -> RasterImage {
    let size = image.size();
    mirrored(surface, image, (size.width, size.height), (-1.0, -1.0))
        .unwrap_or_else(|e| panic!("flip horizontal: {e}"))
}

fn mirrored<S: Surface>(
    surface: &S,
    image: &RasterImage,
    (tx, ty): (f64, f64),
    (sx, sy): (f64, f64),
) -> Result<RasterImage, GeometryError> {
    let size = image.size();
    let mut canvas = surface.create_canvas(size, image.scale())?;
    canvas.translate_by(tx, ty);
    canvas.scale_by(sx, sy);
    canvas.draw_image(image, Rect::from_size(size));
    Ok(canvas.into_image())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::decode::PixelBuffer;
    use crate::surface::SoftwareSurface;
    use image::Rgba;
    use proptest::prelude::*;

    proptest! {
        /// Property: Flipping never changes dimensions.
        #[test]
        fn prop_flip_preserves_dimensions(
            (width, height) in (1u32..=40, 1u32..=40),
            seed in any::<u8>(),
        ) {
            let pixels = PixelBuffer::from_fn(width, height, |x, y| {
                Rgba([seed.wrapping_add(x as u8), y as u8, 0, 255])
            });
            let img = RasterImage::from_pixels(pixels).unwrap();
            let surface = SoftwareSurface::new();

            let h = flip_horizontal(&surface, &img);
            let v = flip_vertical(&surface, &img);
            prop_assert_eq!((h.width(), h.height()), (width, height));
            prop_assert_eq!((v.width(), v.height()), (width, height));
        }

        /// Property: The horizontal flip is an involution.
        #[test]
        fn prop_flip_horizontal_involution(
            (width, height) in (1u32..=30, 1u32..=30),
        ) {
            let pixels = PixelBuffer::from_fn(width, height, |x, y| {
                Rgba([(x % 256) as u8, (y % 256) as u8, 200, 255])
            });
            let img = RasterImage::from_pixels(pixels).unwrap();
            let surface = SoftwareSurface::new();

            let back = flip_horizontal(&surface, &flip_horizontal(&surface, &img));
            prop_assert_eq!(back.pixels(), img.pixels());
        }
    }
}
