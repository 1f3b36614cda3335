//! Offscreen drawing surfaces.
//!
//! Geometry operations never touch pixels directly: they open a canvas,
//! set up its current transform, draw the source image into a rect, and
//! read the canvas back. The capability is injected through [`Surface`] so
//! callers can swap in another renderer (or a test double).
//!
//! # Canvas Model
//!
//! - User space is y-down with the origin at the top-left corner
//! - A new canvas is fully transparent and its current transform maps
//!   points to pixels (`scale(scale, scale)`)
//! - `translate_by`, `scale_by` and `rotate_by` modify the current transform
//!   the way a graphics context does: the newest call applies first
//! - Dropping a canvas releases it; `into_image` consumes it

mod software;

#[cfg(test)]
pub(crate) mod recording;

pub use software::{FilterType, SoftwareCanvas, SoftwareSurface, DEFAULT_MAX_PIXELS};

use thiserror::Error;

use crate::decode::RasterImage;
use crate::geometry::{Rect, Size};

/// Errors raised when a drawing surface cannot be acquired.
#[derive(Debug, Error, PartialEq)]
pub enum SurfaceError {
    /// Size or scale is zero, negative, or not finite.
    #[error("Invalid canvas size: {width}x{height} at scale {scale}")]
    InvalidSize { width: f64, height: f64, scale: f64 },

    /// The backing store would exceed the surface's pixel budget.
    #[error("Canvas of {pixels} pixels exceeds the limit of {limit}")]
    TooLarge { pixels: u64, limit: u64 },
}

/// Factory for offscreen canvases.
pub trait Surface {
    type Canvas: Canvas;

    /// Open a transparent canvas of `size` points at `scale` pixels per point.
    fn create_canvas(&self, size: Size, scale: f64) -> Result<Self::Canvas, SurfaceError>;
}

/// An open offscreen canvas.
pub trait Canvas {
    /// Canvas size in points.
    fn size(&self) -> Size;

    fn scale(&self) -> f64;

    fn translate_by(&mut self, tx: f64, ty: f64);

    fn scale_by(&mut self, sx: f64, sy: f64);

    fn rotate_by(&mut self, radians: f64);

    /// Draw the image's display pixels into `rect`, first row at the rect's
    /// top edge.
    fn draw_image(&mut self, image: &RasterImage, rect: Rect);

    /// Draw with the bitmap-context row convention: the first row lands at
    /// the rect's bottom edge (max y).
    fn draw_bitmap(&mut self, image: &RasterImage, rect: Rect);

    /// Read the canvas back as an upright image at the canvas scale.
    fn into_image(self) -> RasterImage;
}
