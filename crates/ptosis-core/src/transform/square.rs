//! Square crop matching the on-screen capture guide.
//!
//! The capture screen frames the eyes in a square whose side is the short
//! edge of the frame. The square is shifted right of the left edge by a
//! fraction of its side and centred vertically:
//!
//! ```text
//! side = min(W, H)
//! left = side / divisor      (integer division, divisor 9 by default)
//! top  = (H - side) / 2
//! ```

use std::num::NonZeroU32;

use image::imageops;
use serde::{Deserialize, Serialize};

use super::GeometryError;
use crate::decode::PixelBuffer;

/// Placement of the capture guide square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquareCropGuide {
    /// The square starts `side / left_offset_divisor` pixels from the left.
    pub left_offset_divisor: NonZeroU32,
}

impl SquareCropGuide {
    pub const DEFAULT_LEFT_OFFSET_DIVISOR: NonZeroU32 = match NonZeroU32::new(9) {
        Some(divisor) => divisor,
        None => unreachable!(),
    };

    pub fn new(left_offset_divisor: NonZeroU32) -> Self {
        Self {
            left_offset_divisor,
        }
    }
}

impl Default for SquareCropGuide {
    fn default() -> Self {
        Self {
            left_offset_divisor: Self::DEFAULT_LEFT_OFFSET_DIVISOR,
        }
    }
}

/// The guide square for a `width` x `height` buffer as `(left, top, side)`.
pub fn square_crop_rect(width: u32, height: u32, guide: &SquareCropGuide) -> (u32, u32, u32) {
    let side = width.min(height);
    let left = side / guide.left_offset_divisor.get();
    let top = (height - side) / 2;
    (left, top, side)
}

/// Crop to the capture-guide square with the default offset.
///
/// # Errors
///
/// See [`crop_to_square_with_guide`].
pub fn crop_to_square(pixels: &PixelBuffer) -> Result<PixelBuffer, GeometryError> {
    crop_to_square_with_guide(pixels, &SquareCropGuide::default())
}

/// Crop to the capture-guide square described by `guide`.
///
/// The buffer is cropped as stored; callers holding an oriented image
/// should pass its display pixels.
///
/// # Errors
///
/// Returns `GeometryError::SquareCropOutOfBounds` when the shifted square
/// runs past the right edge, which happens whenever the buffer is not wide
/// enough to absorb the left offset (any portrait or square buffer with a
/// non-zero offset).
pub fn crop_to_square_with_guide(
    pixels: &PixelBuffer,
    guide: &SquareCropGuide,
) -> Result<PixelBuffer, GeometryError> {
    let (width, height) = pixels.dimensions();
    let (left, top, side) = square_crop_rect(width, height, guide);

    if u64::from(left) + u64::from(side) > u64::from(width) {
        tracing::debug!(width, height, left, side, "guide square past the right edge");
        return Err(GeometryError::SquareCropOutOfBounds {
            width,
            height,
            left,
            side,
        });
    }

    Ok(imageops::crop_imm(pixels, left, top, side, side).to_image())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    /// Landscape buffers wide enough to absorb the guide offset.
    fn landscape_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=120).prop_flat_map(|h| (h + h / 9..=h + 80, Just(h)))
    }

    proptest! {
        /// Property: The guide square is square, sized to the short edge, and in bounds.
        #[test]
        fn prop_square_in_bounds((width, height) in landscape_strategy()) {
            let img = PixelBuffer::from_pixel(width, height, Rgba([5, 6, 7, 255]));
            let result = crop_to_square(&img).unwrap();
            let side = width.min(height);
            let (left, top, _) = square_crop_rect(width, height, &SquareCropGuide::default());

            prop_assert_eq!(result.dimensions(), (side, side));
            prop_assert!(left + side <= width);
            prop_assert!(top + side <= height);
        }

        /// Property: Cropping fails exactly when left + side > W.
        #[test]
        fn prop_error_iff_overhang(
            (width, height) in (1u32..=200, 1u32..=200),
            divisor in 1u32..=20,
        ) {
            let guide = SquareCropGuide::new(NonZeroU32::new(divisor).unwrap());
            let img = PixelBuffer::new(width, height);
            let (left, _, side) = square_crop_rect(width, height, &guide);
            let result = crop_to_square_with_guide(&img, &guide);
            prop_assert_eq!(result.is_err(), left + side > width);
        }
    }
}
