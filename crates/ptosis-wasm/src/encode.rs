//! Image encoding WASM bindings.
//!
//! ```typescript
//! import { encode_png_from_image } from '@ptosis/wasm';
//!
//! const png = encode_png_from_image(square);
//! const blob = new Blob([png], { type: 'image/png' });
//! ```

use crate::types::{to_js_error, JsRasterImage};
use ptosis_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data (4 bytes per pixel, row-major) to PNG bytes.
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// width * height * 4, a dimension is zero, or encoding fails.
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png_rgba(pixels, width, height).map_err(to_js_error)
}

/// Encode the display pixels of an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsRasterImage) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster().map_err(to_js_error)?;
    encode::encode_png(&raster.display_pixels()).map_err(to_js_error)
}
