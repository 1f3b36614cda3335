//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@ptosis/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const frame = decode_image(bytes);
//! console.log(`${frame.width}x${frame.height}, EXIF orientation ${frame.orientation}`);
//! ```

use crate::types::{to_js_error, JsRasterImage};
use ptosis_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG or PNG bytes, keeping the EXIF orientation as the image tag.
///
/// # Errors
///
/// Returns an error if the format is not recognised or the data is corrupt.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Decode bytes and bake the EXIF orientation into the pixels.
#[wasm_bindgen]
pub fn decode_image_upright(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image_upright(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of encoded bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes).exif_value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptosis_core::decode::PixelBuffer;
    use ptosis_core::encode::encode_png;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let raw: Vec<u8> = (0..width * height * 4).map(|i| (i % 256) as u8).collect();
        let pixels = PixelBuffer::from_raw(width, height, raw).unwrap();
        encode_png(&pixels).unwrap()
    }

    #[test]
    fn test_decode_png() {
        let img = decode_image(&png_bytes(12, 5)).unwrap();
        assert_eq!((img.width(), img.height()), (12, 5));
        assert_eq!(img.orientation(), 1);
        assert_eq!(img.scale(), 1.0);
    }

    #[test]
    fn test_decode_upright_png() {
        let img = decode_image_upright(&png_bytes(3, 8)).unwrap();
        assert_eq!((img.width(), img.height()), (3, 8));
    }

    #[test]
    fn test_get_orientation_without_exif() {
        assert_eq!(get_orientation(&png_bytes(2, 2)), 1);
        assert_eq!(get_orientation(&[0u8; 16]), 1);
    }
}
