//! Ptosis Core - image geometry for eyelid photography
//!
//! This crate provides the image handling behind the ptosis capture flow:
//! decoding camera frames with their orientation, resizing, orientation-aware
//! cropping, rotation, mirroring, the capture-guide square crop and PNG
//! export.
//!
//! Operations that redraw pixels go through an injected [`surface::Surface`];
//! [`SoftwareSurface`] is the built-in CPU renderer.

pub mod decode;
pub mod encode;
pub mod geometry;
pub mod surface;
pub mod transform;

pub use decode::{decode_image, DecodeError, Orientation, PixelBuffer, RasterImage};
pub use encode::{encode_png, EncodeError};
pub use geometry::{AffineTransform, Point, Rect, Size};
pub use surface::{Canvas, SoftwareSurface, Surface, SurfaceError};
pub use transform::{
    crop, crop_to_square, crop_to_square_with_guide, flip_horizontal, flip_vertical,
    image_orientation_for, resize_to_fill, resize_to_fit, rotate, rotate_by_orientation,
    try_rotate, try_rotate_by_orientation, GeometryError, InterfaceOrientation, SquareCropGuide,
};
