//! Ptosis WASM - WebAssembly bindings for the ptosis image geometry core
//!
//! # Module Structure
//!
//! - `types` - `JsRasterImage`, the wrapper every binding passes around
//! - `decode` - JPEG/PNG decoding with EXIF orientation
//! - `transform` - resize, crop, rotate, flip, square crop, orientation mapping
//! - `encode` - PNG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, image_orientation_for_interface, crop_to_square } from '@ptosis/wasm';
//!
//! await init();
//!
//! const frame = decode_image(bytes);
//! const square = crop_to_square(frame);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod transform;
mod types;

pub use decode::{decode_image, decode_image_upright, get_orientation};
pub use encode::{encode_png, encode_png_from_image};
pub use transform::{
    crop, crop_to_square, crop_to_square_with_guide, flip_horizontal, flip_vertical,
    image_orientation_for_interface, resize_to_fill, resize_to_fit, rotate,
    rotate_by_orientation,
};
pub use types::JsRasterImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
