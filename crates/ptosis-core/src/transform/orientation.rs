//! Device orientation handling.
//!
//! Maps the interface orientation reported by the capture screen to the
//! orientation tag a captured frame should carry, and turns images by an
//! orientation tag.

use serde::{Deserialize, Serialize};

use super::rotation::try_rotate;
use super::GeometryError;
use crate::decode::{Orientation, RasterImage};
use crate::surface::Surface;

/// The resolved device/UI orientation at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceOrientation {
    #[default]
    Unknown,
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
}

impl InterfaceOrientation {
    /// Numeric code used at the bindings boundary.
    pub fn code(self) -> u8 {
        match self {
            InterfaceOrientation::Unknown => 0,
            InterfaceOrientation::Portrait => 1,
            InterfaceOrientation::PortraitUpsideDown => 2,
            InterfaceOrientation::LandscapeLeft => 3,
            InterfaceOrientation::LandscapeRight => 4,
        }
    }
}

impl From<u8> for InterfaceOrientation {
    /// Unrecognised codes become `Unknown`.
    fn from(code: u8) -> Self {
        match code {
            1 => InterfaceOrientation::Portrait,
            2 => InterfaceOrientation::PortraitUpsideDown,
            3 => InterfaceOrientation::LandscapeLeft,
            4 => InterfaceOrientation::LandscapeRight,
            _ => InterfaceOrientation::Unknown,
        }
    }
}

/// Orientation tag for a frame captured in `interface` orientation.
///
/// The sensor is mounted landscape, so a portrait UI yields a frame that
/// must be turned a quarter clockwise to display upright.
pub fn image_orientation_for(interface: InterfaceOrientation) -> Orientation {
    match interface {
        InterfaceOrientation::Portrait => Orientation::Right,
        InterfaceOrientation::PortraitUpsideDown => Orientation::Left,
        InterfaceOrientation::LandscapeLeft => Orientation::Down,
        InterfaceOrientation::LandscapeRight => Orientation::Up,
        InterfaceOrientation::Unknown => {
            tracing::warn!("interface orientation unknown, assuming up");
            Orientation::Up
        }
    }
}

/// Rotate `image` by the quarter turns `orientation` stands for.
///
/// Mirrored orientations have no rotation equivalent; the image is returned
/// unchanged.
///
/// # Panics
///
/// Panics if the surface cannot provide a canvas.
pub fn rotate_by_orientation<S: Surface>(
    surface: &S,
    image: &RasterImage,
    orientation: Orientation,
    cropped: bool,
) -> RasterImage {
    try_rotate_by_orientation(surface, image, orientation, cropped)
        .unwrap_or_else(|e| panic!("rotate by {orientation:?}: {e}"))
}

/// Fallible form of [`rotate_by_orientation`].
///
/// # Errors
///
/// Returns `GeometryError::Surface` if the canvas cannot be created.
pub fn try_rotate_by_orientation<S: Surface>(
    surface: &S,
    image: &RasterImage,
    orientation: Orientation,
    cropped: bool,
) -> Result<RasterImage, GeometryError> {
    match quarter_turn_degrees(orientation) {
        Some(degrees) => try_rotate(surface, image, degrees, cropped),
        None => {
            tracing::warn!(?orientation, "mirrored orientation not handled, image unchanged");
            Ok(image.clone())
        }
    }
}

fn quarter_turn_degrees(orientation: Orientation) -> Option<f64> {
    match orientation {
        Orientation::Up => Some(0.0),
        Orientation::Down => Some(180.0),
        Orientation::Left => Some(-90.0),
        Orientation::Right => Some(90.0),
        Orientation::UpMirrored
        | Orientation::DownMirrored
        | Orientation::LeftMirrored
        | Orientation::RightMirrored => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelBuffer;
    use crate::surface::recording::BrokenSurface;
    use crate::surface::SoftwareSurface;
    use crate::transform::rotate;
    use image::Rgba;

    fn test_image(width: u32, height: u32) -> RasterImage {
        let pixels = PixelBuffer::from_fn(width, height, |x, y| {
            Rgba([(x * 30) as u8, (y * 30) as u8, 9, 255])
        });
        RasterImage::from_pixels(pixels).unwrap()
    }

    #[test]
    fn test_interface_mapping() {
        use InterfaceOrientation::*;
        assert_eq!(image_orientation_for(Portrait), Orientation::Right);
        assert_eq!(image_orientation_for(PortraitUpsideDown), Orientation::Left);
        assert_eq!(image_orientation_for(LandscapeLeft), Orientation::Down);
        assert_eq!(image_orientation_for(LandscapeRight), Orientation::Up);
        assert_eq!(image_orientation_for(Unknown), Orientation::Up);
    }

    #[test]
    fn test_interface_codes() {
        for code in 0..=4u8 {
            assert_eq!(InterfaceOrientation::from(code).code(), code);
        }
        assert_eq!(InterfaceOrientation::from(77), InterfaceOrientation::Unknown);
        assert_eq!(InterfaceOrientation::default(), InterfaceOrientation::Unknown);
    }

    #[test]
    fn test_rotate_by_orientation_matches_rotate() {
        let surface = SoftwareSurface::new();
        let img = test_image(6, 4);
        let cases = [
            (Orientation::Up, 0.0),
            (Orientation::Down, 180.0),
            (Orientation::Left, -90.0),
            (Orientation::Right, 90.0),
        ];

        for cropped in [true, false] {
            for (orientation, degrees) in cases {
                let by_tag = rotate_by_orientation(&surface, &img, orientation, cropped);
                let direct = rotate(&surface, &img, degrees, cropped);
                assert_eq!(by_tag, direct, "{orientation:?} cropped={cropped}");
            }
        }
    }

    #[test]
    fn test_rotate_by_right_turns_clockwise() {
        let mut pixels = PixelBuffer::new(2, 1);
        pixels.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        pixels.put_pixel(1, 0, Rgba([0, 0, 255, 255]));
        let img = RasterImage::from_pixels(pixels).unwrap();

        let result = rotate_by_orientation(&SoftwareSurface::new(), &img, Orientation::Right, false);
        assert_eq!((result.width(), result.height()), (1, 2));
        assert_eq!(result.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_try_rotate_by_orientation_reports_surface_failure() {
        let img = test_image(4, 4);
        let result = try_rotate_by_orientation(&BrokenSurface, &img, Orientation::Down, true);
        assert!(matches!(result, Err(GeometryError::Surface(_))));

        // Mirrored tags never touch the surface
        let result = try_rotate_by_orientation(&BrokenSurface, &img, Orientation::UpMirrored, true);
        assert_eq!(result, Ok(img));
    }

    #[test]
    fn test_mirrored_orientations_pass_through() {
        let surface = SoftwareSurface::new();
        let img = test_image(5, 3);
        for orientation in [
            Orientation::UpMirrored,
            Orientation::DownMirrored,
            Orientation::LeftMirrored,
            Orientation::RightMirrored,
        ] {
            let result = rotate_by_orientation(&surface, &img, orientation, true);
            assert_eq!(result, img);
        }
    }
}
