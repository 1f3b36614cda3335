//! WASM bindings for image geometry operations.
//!
//! Every binding takes a `JsRasterImage` and returns a new one. Rects and
//! square-crop guides are plain JS objects:
//!
//! ```typescript
//! const eye = crop(frame, { x: 120, y: 80, width: 400, height: 200 });
//! const square = crop_to_square_with_guide(frame, { left_offset_divisor: 9 });
//! ```

use crate::types::{surface_with_filter, to_js_error, JsRasterImage};
use ptosis_core::decode::{Orientation, RasterImage};
use ptosis_core::geometry::{Rect, Size};
use ptosis_core::surface::SoftwareSurface;
use ptosis_core::transform::{self, InterfaceOrientation, SquareCropGuide};
use wasm_bindgen::prelude::*;

/// Resize so the image fits inside `width` x `height` points.
///
/// `filter`: 0 = nearest, 1 = bilinear, 2 = lanczos3.
#[wasm_bindgen]
pub fn resize_to_fit(
    image: &JsRasterImage,
    width: f64,
    height: f64,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    transform::resize_to_fit(&surface_with_filter(filter), &src, Size::new(width, height))
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Resize so the image covers `width` x `height` points.
#[wasm_bindgen]
pub fn resize_to_fill(
    image: &JsRasterImage,
    width: f64,
    height: f64,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    transform::resize_to_fill(&surface_with_filter(filter), &src, Size::new(width, height))
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Crop to a display-space rect `{ x, y, width, height }`.
#[wasm_bindgen]
pub fn crop(image: &JsRasterImage, rect: JsValue) -> Result<JsRasterImage, JsValue> {
    let rect: Rect = serde_wasm_bindgen::from_value(rect)?;
    crop_to_rect(image, rect)
}

pub(crate) fn crop_to_rect(image: &JsRasterImage, rect: Rect) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    transform::crop(&src, rect)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Rotate around the centre; positive degrees turn clockwise.
///
/// With `cropped` the output keeps the source size and the corners are
/// clipped; otherwise the canvas grows to hold the whole image.
///
/// # Errors
///
/// Returns an error for a NaN or infinite angle, or when the rotated canvas
/// exceeds the pixel budget.
#[wasm_bindgen]
pub fn rotate(image: &JsRasterImage, degrees: f64, cropped: bool) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    transform::try_rotate(&SoftwareSurface::new(), &src, degrees, cropped)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// Rotate by the quarter turns an EXIF orientation value (1-8) stands for.
///
/// Mirrored orientations return an unchanged copy.
#[wasm_bindgen]
pub fn rotate_by_orientation(
    image: &JsRasterImage,
    orientation: u8,
    cropped: bool,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    transform::try_rotate_by_orientation(
        &SoftwareSurface::new(),
        &src,
        Orientation::from(u32::from(orientation)),
        cropped,
    )
    .map(JsRasterImage::from_raster)
    .map_err(to_js_error)
}

#[wasm_bindgen]
pub fn flip_vertical(image: &JsRasterImage) -> Result<JsRasterImage, JsValue> {
    redraw(image, transform::flip_vertical)
}

/// Mirror on both axes.
#[wasm_bindgen]
pub fn flip_horizontal(image: &JsRasterImage) -> Result<JsRasterImage, JsValue> {
    redraw(image, transform::flip_horizontal)
}

fn redraw(
    image: &JsRasterImage,
    op: fn(&SoftwareSurface, &RasterImage) -> RasterImage,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    Ok(JsRasterImage::from_raster(op(&SoftwareSurface::new(), &src)))
}

/// Crop the display pixels to the capture-guide square (offset side / 9).
#[wasm_bindgen]
pub fn crop_to_square(image: &JsRasterImage) -> Result<JsRasterImage, JsValue> {
    square_with_guide(image, &SquareCropGuide::default())
}

/// Crop to the capture-guide square described by `{ left_offset_divisor }`.
#[wasm_bindgen]
pub fn crop_to_square_with_guide(
    image: &JsRasterImage,
    guide: JsValue,
) -> Result<JsRasterImage, JsValue> {
    let guide: SquareCropGuide = serde_wasm_bindgen::from_value(guide)?;
    square_with_guide(image, &guide)
}

pub(crate) fn square_with_guide(
    image: &JsRasterImage,
    guide: &SquareCropGuide,
) -> Result<JsRasterImage, JsValue> {
    let src = image.to_raster().map_err(to_js_error)?;
    let square = transform::crop_to_square_with_guide(&src.display_pixels(), guide)
        .map_err(to_js_error)?;
    RasterImage::new(square, src.scale(), Orientation::Up)
        .map(JsRasterImage::from_raster)
        .map_err(to_js_error)
}

/// EXIF orientation value for a frame captured in the given interface
/// orientation (0 unknown, 1 portrait, 2 portrait upside down,
/// 3 landscape left, 4 landscape right).
#[wasm_bindgen]
pub fn image_orientation_for_interface(code: u8) -> u8 {
    let interface = InterfaceOrientation::from(code);
    if interface == InterfaceOrientation::Unknown {
        warn_unknown_interface(code);
    }
    transform::image_orientation_for(interface).exif_value()
}

#[cfg(target_arch = "wasm32")]
fn warn_unknown_interface(code: u8) {
    web_sys::console::warn_1(&JsValue::from_str(&format!(
        "ptosis: unknown interface orientation {code}, assuming up"
    )));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn_unknown_interface(_code: u8) {}

#[cfg(test)]
mod tests {
    use super::*;

    /// RGBA image with a position-coded pattern.
    fn test_image(width: u32, height: u32, orientation: u8) -> JsRasterImage {
        let pixels: Vec<u8> = (0..(width * height * 4) as usize)
            .map(|i| (i % 251) as u8)
            .collect();
        JsRasterImage::new(width, height, pixels, 1.0, orientation)
    }

    #[test]
    fn test_resize_to_fit() {
        let img = test_image(120, 80, 1);
        let result = resize_to_fit(&img, 30.0, 30.0, 1).unwrap();
        assert_eq!((result.width(), result.height()), (30, 20));
        assert_eq!(result.byte_length(), 30 * 20 * 4);
    }

    #[test]
    fn test_resize_to_fill() {
        let img = test_image(120, 80, 1);
        let result = resize_to_fill(&img, 30.0, 30.0, 0).unwrap();
        assert_eq!((result.width(), result.height()), (45, 30));
    }

    #[test]
    fn test_crop_keeps_orientation() {
        let img = test_image(40, 20, 6);
        let result = crop_to_rect(&img, Rect::new(0.0, 0.0, 10.0, 4.0)).unwrap();
        // Landscape tag: rect is switched onto the stored buffer
        assert_eq!((result.width(), result.height()), (4, 10));
        assert_eq!(result.orientation(), 6);
    }

    #[test]
    fn test_rotation_90_degrees() {
        let img = test_image(100, 50, 1);
        let result = rotate(&img, 90.0, false).unwrap();
        // 90-degree rotation swaps dimensions
        assert_eq!((result.width(), result.height()), (50, 100));
        assert_eq!(result.orientation(), 1);
    }

    #[test]
    fn test_rotation_cropped_keeps_size() {
        let img = test_image(60, 40, 1);
        let result = rotate(&img, 45.0, true).unwrap();
        assert_eq!((result.width(), result.height()), (60, 40));
    }

    #[test]
    fn test_rotate_by_orientation_codes() {
        let img = test_image(30, 10, 1);
        let right = rotate_by_orientation(&img, 6, false).unwrap();
        assert_eq!((right.width(), right.height()), (10, 30));

        // Mirrored: unchanged
        let mirrored = rotate_by_orientation(&img, 2, false).unwrap();
        assert_eq!(mirrored.pixels(), img.pixels());
    }

    #[test]
    fn test_flips() {
        let img = test_image(9, 7, 1);
        assert_eq!(flip_vertical(&img).unwrap().pixels(), img.pixels());

        let twice = flip_horizontal(&flip_horizontal(&img).unwrap()).unwrap();
        assert_eq!(twice.pixels(), img.pixels());
    }

    #[test]
    fn test_crop_to_square_uses_display_pixels() {
        // Stored 40x90 turned a quarter: displayed 90x40
        let img = test_image(40, 90, 6);
        let result = crop_to_square(&img).unwrap();
        assert_eq!((result.width(), result.height()), (40, 40));
        assert_eq!(result.orientation(), 1);
    }

    #[test]
    fn test_square_with_custom_guide() {
        let img = test_image(100, 40, 1);
        let guide = SquareCropGuide::new(std::num::NonZeroU32::new(4).unwrap());
        let result = square_with_guide(&img, &guide).unwrap();
        assert_eq!((result.width(), result.height()), (40, 40));
        // First pixel comes from column 10 of the source
        assert_eq!(&result.pixels()[..4], &img.pixels()[40..44]);
    }

    #[test]
    fn test_image_orientation_for_interface() {
        assert_eq!(image_orientation_for_interface(1), 6);
        assert_eq!(image_orientation_for_interface(2), 8);
        assert_eq!(image_orientation_for_interface(3), 3);
        assert_eq!(image_orientation_for_interface(4), 1);
        assert_eq!(image_orientation_for_interface(0), 1);
        assert_eq!(image_orientation_for_interface(9), 1);
    }
}
