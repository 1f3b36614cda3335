//! Image encoding.
//!
//! Captured and cropped frames are persisted as lossless PNG.
//!
//! # Examples
//!
//! ```ignore
//! use ptosis_core::encode::encode_png;
//!
//! let square = crop_to_square(image.display_pixels().as_ref())?;
//! let png = encode_png(&square)?;
//! std::fs::write("eyes.png", png)?;
//! ```

mod png;

pub use png::{encode_png, encode_png_rgba, EncodeError};
