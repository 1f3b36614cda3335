//! End-to-end capture flow: decode, orient, resize, square crop, export.

use image::Rgba;
use ptosis_core::decode::decode_image;
use ptosis_core::transform::rotated_canvas_size;
use ptosis_core::{
    crop, crop_to_square, encode_png, flip_horizontal, image_orientation_for, resize_to_fit,
    rotate_by_orientation, GeometryError, InterfaceOrientation, Orientation, PixelBuffer,
    RasterImage, Rect, Size, SoftwareSurface,
};

fn sensor_frame(width: u32, height: u32) -> Vec<u8> {
    let pixels = PixelBuffer::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, 255])
    });
    encode_png(&pixels).unwrap()
}

#[test]
fn landscape_capture_to_square_png() {
    let surface = SoftwareSurface::new();
    let decoded = decode_image(&sensor_frame(600, 400)).unwrap();
    let frame = decoded.with_orientation(image_orientation_for(InterfaceOrientation::LandscapeRight));

    let preview = resize_to_fit(&surface, &frame, Size::new(300.0, 300.0)).unwrap();
    assert_eq!((preview.width(), preview.height()), (300, 200));

    let square = crop_to_square(&preview.display_pixels()).unwrap();
    assert_eq!(square.dimensions(), (200, 200));

    let png = encode_png(&square).unwrap();
    let reloaded = decode_image(&png).unwrap();
    assert_eq!(reloaded.pixels(), &square);
}

#[test]
fn portrait_capture_reports_square_overhang() {
    let surface = SoftwareSurface::new();
    let decoded = decode_image(&sensor_frame(60, 40)).unwrap();
    let frame = decoded.with_orientation(image_orientation_for(InterfaceOrientation::Portrait));
    assert_eq!(frame.size(), Size::new(40.0, 60.0));

    let upright = rotate_by_orientation(&surface, &frame.to_upright(), Orientation::Up, true);
    assert_eq!((upright.width(), upright.height()), (40, 60));

    let result = crop_to_square(upright.pixels());
    assert!(matches!(
        result,
        Err(GeometryError::SquareCropOutOfBounds { width: 40, left: 4, side: 40, .. })
    ));
}

#[test]
fn eye_region_crop_follows_display_space() {
    let pixels = PixelBuffer::from_fn(30, 20, |x, y| Rgba([x as u8, y as u8, 0, 255]));
    let frame = RasterImage::new(pixels, 1.0, Orientation::Right).unwrap();

    // Display-space rect is switched onto the stored buffer
    let eye = crop(&frame, Rect::new(2.0, 5.0, 10.0, 4.0)).unwrap();
    assert_eq!((eye.width(), eye.height()), (4, 10));
    assert_eq!(eye.pixels().get_pixel(0, 0).0, [5, 2, 0, 255]);
    assert_eq!(eye.orientation(), Orientation::Right);
}

#[test]
fn uncropped_rotation_matches_canvas_size() {
    let surface = SoftwareSurface::new();
    let frame = RasterImage::from_pixels(PixelBuffer::from_pixel(20, 10, Rgba([1, 1, 1, 255])))
        .unwrap();

    let turned = rotate_by_orientation(&surface, &frame, Orientation::Left, false);
    let expected = rotated_canvas_size(frame.size(), -90.0, false);
    assert_eq!(turned.width(), expected.width.round() as u32);
    assert_eq!(turned.height(), expected.height.round() as u32);

    let mirrored = flip_horizontal(&surface, &flip_horizontal(&surface, &turned));
    assert_eq!(mirrored.pixels(), turned.pixels());
}
