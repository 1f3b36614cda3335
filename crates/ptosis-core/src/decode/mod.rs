//! Image types and decoding.
//!
//! This module provides:
//! - `RasterImage`, the immutable image value every geometry operation
//!   consumes and produces
//! - `Orientation`, the EXIF-style tag saying how stored pixels are displayed
//! - Decoding JPEG/PNG bytes with their EXIF orientation
//!
//! # Examples
//!
//! ```ignore
//! use ptosis_core::decode::decode_image;
//!
//! let bytes = std::fs::read("capture.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("{:?} image, display size {:?}", image.orientation(), image.size());
//! ```

mod reader;
mod types;

pub use reader::{decode_image, decode_image_upright, get_orientation};
pub use types::{DecodeError, Orientation, PixelBuffer, RasterImage};
