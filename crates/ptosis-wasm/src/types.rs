//! WASM-compatible wrapper types for image data.
//!
//! `JsRasterImage` carries an RGBA buffer across the boundary together with
//! its scale and EXIF orientation code, so oriented captures keep their tag
//! between calls.

use ptosis_core::decode::{DecodeError, Orientation, RasterImage};
use ptosis_core::surface::{FilterType, SoftwareSurface};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` copies it out as a
/// `Uint8Array`; keep images on the WASM side between operations where
/// possible.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    scale: f64,
    orientation: u8,
}

/// Plain-object summary returned by `JsRasterImage.info()`.
#[derive(Debug, Serialize)]
struct ImageInfo {
    width: u32,
    height: u32,
    scale: f64,
    orientation: u8,
    display_width: f64,
    display_height: f64,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from RGBA pixel data (4 bytes per pixel, row-major).
    ///
    /// `orientation` is the EXIF orientation value (1-8); anything else is
    /// treated as upright.
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<u8>,
        scale: f64,
        orientation: u8,
    ) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
            scale,
            orientation,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// EXIF orientation value (1-8).
    #[wasm_bindgen(getter)]
    pub fn orientation(&self) -> u8 {
        self.orientation
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Dimensions, scale, orientation and display size as a plain object.
    pub fn info(&self) -> Result<JsValue, JsValue> {
        let (display_width, display_height) = self.display_size();
        let info = ImageInfo {
            width: self.width,
            height: self.height,
            scale: self.scale,
            orientation: self.orientation,
            display_width,
            display_height,
        };
        Ok(serde_wasm_bindgen::to_value(&info)?)
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional: wasm-bindgen's finalizer releases the memory otherwise.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_raster(image: RasterImage) -> Self {
        let scale = image.scale();
        let orientation = image.orientation().exif_value();
        let pixels = image.into_pixels();
        Self {
            width: pixels.width(),
            height: pixels.height(),
            pixels: pixels.into_raw(),
            scale,
            orientation,
        }
    }

    /// Convert to a core image. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> Result<RasterImage, DecodeError> {
        RasterImage::from_raw(
            self.width,
            self.height,
            self.pixels.clone(),
            self.scale,
            Orientation::from(u32::from(self.orientation)),
        )
    }

    /// Display size in points, swapped for landscape orientations.
    fn display_size(&self) -> (f64, f64) {
        let (w, h) = (
            self.width as f64 / self.scale,
            self.height as f64 / self.scale,
        );
        if Orientation::from(u32::from(self.orientation)).is_landscape() {
            (h, w)
        } else {
            (w, h)
        }
    }
}

/// Convert a u8 filter type value to the core FilterType enum.
///
/// Values:
/// - 0 = Nearest (fastest, lowest quality)
/// - 1 = Bilinear (good balance of speed and quality)
/// - 2 = Lanczos3 (best quality, slowest)
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

pub(crate) fn surface_with_filter(filter: u8) -> SoftwareSurface {
    SoftwareSurface::new().with_filter(filter_from_u8(filter))
}

/// Render any core error as a JS string value.
pub(crate) fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}
