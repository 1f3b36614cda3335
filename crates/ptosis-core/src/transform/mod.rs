//! Image geometry operations.
//!
//! Resizing, cropping, rotation, flipping and the capture-guide square crop.
//! Every operation takes a `RasterImage` (or a raw `PixelBuffer`) and returns
//! a new one; nothing is modified in place.
//!
//! # Failure Semantics
//!
//! - Resize and crop return `Err` for caller-triggerable problems: an empty
//!   target, a crop rect outside the image, a surface that cannot be opened
//! - Rotate and flip always produce an image for a valid source; a surface
//!   that cannot be opened is a broken precondition and panics. The
//!   `try_` rotation variants report it (and non-finite angles) as `Err`
//!
//! # Coordinate System
//!
//! - Sizes and rects are in points (pixels divided by the image scale)
//! - Origin is top-left, y grows downwards
//! - Positive rotation degrees turn the image clockwise on screen

mod crop;
mod flip;
mod orientation;
mod resize;
mod rotation;
mod square;

pub use crop::crop;
pub use flip::{flip_horizontal, flip_vertical};
pub use orientation::{
    image_orientation_for, rotate_by_orientation, try_rotate_by_orientation, InterfaceOrientation,
};
pub use resize::{filled_size, fitted_size, resize_to_fill, resize_to_fit};
pub use rotation::{rotate, rotated_canvas_size, try_rotate};
pub use square::{crop_to_square, crop_to_square_with_guide, square_crop_rect, SquareCropGuide};

use thiserror::Error;

use crate::geometry::{Rect, Size};
use crate::surface::SurfaceError;

/// Errors from geometry operations.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    /// The drawing surface could not be acquired.
    #[error("Drawing surface unavailable: {0}")]
    Surface(#[from] SurfaceError),

    /// Rotation angle is NaN or infinite.
    #[error("Invalid rotation angle: {0}")]
    InvalidAngle(f64),

    /// Crop rect has a NaN or infinite component.
    #[error("Invalid crop rect: {0:?}")]
    InvalidRect(Rect),

    /// Resize target is empty or not finite.
    #[error("Invalid target size: {}x{}", .0.width, .0.height)]
    InvalidTargetSize(Size),

    /// The crop rect does not overlap the pixel buffer.
    #[error("Crop rect {rect:?} lies outside the {width}x{height} pixel buffer")]
    CropOutsideImage { rect: Rect, width: u32, height: u32 },

    /// The capture-guide square does not fit the buffer.
    #[error("Square crop of side {side} at left {left} exceeds buffer width {width} (height {height})")]
    SquareCropOutOfBounds {
        width: u32,
        height: u32,
        left: u32,
        side: u32,
    },
}
