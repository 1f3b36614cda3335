//! Core image types: the raster image, its orientation tag, and decode errors.

use std::borrow::Cow;

use image::imageops;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;

/// RGBA pixel storage, row-major, 4 bytes per pixel.
pub type PixelBuffer = image::RgbaImage;

/// Error types for image decoding and construction.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The pixel buffer has no pixels.
    #[error("Image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// Pixel data length doesn't match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Scale factor is zero, negative or not finite.
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f64),
}

/// Orientation tag describing how stored pixels must be turned for display.
///
/// Discriminants are the EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Stored upright.
    #[default]
    Up = 1,
    /// Mirrored left-right.
    UpMirrored = 2,
    /// Rotated 180 degrees.
    Down = 3,
    /// Mirrored top-bottom.
    DownMirrored = 4,
    /// Mirrored across the main diagonal.
    LeftMirrored = 5,
    /// Needs a 90 degree clockwise turn for display.
    Right = 6,
    /// Mirrored across the anti-diagonal.
    RightMirrored = 7,
    /// Needs a 90 degree counter-clockwise turn for display.
    Left = 8,
}

impl Orientation {
    /// All eight orientations, in EXIF order.
    pub const ALL: [Orientation; 8] = [
        Orientation::Up,
        Orientation::UpMirrored,
        Orientation::Down,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::Right,
        Orientation::RightMirrored,
        Orientation::Left,
    ];

    /// True if the stored pixels are a quarter turn away from display.
    ///
    /// Landscape orientations swap width and height between the pixel
    /// buffer and the displayed image.
    #[inline]
    pub fn is_landscape(self) -> bool {
        matches!(
            self,
            Orientation::Left
                | Orientation::Right
                | Orientation::LeftMirrored
                | Orientation::RightMirrored
        )
    }

    /// EXIF tag value (1-8).
    pub fn exif_value(self) -> u8 {
        self as u8
    }

    /// Turn stored pixels into display pixels.
    pub fn apply(self, pixels: &PixelBuffer) -> PixelBuffer {
        match self {
            Orientation::Up => pixels.clone(),
            Orientation::UpMirrored => imageops::flip_horizontal(pixels),
            Orientation::Down => imageops::rotate180(pixels),
            Orientation::DownMirrored => imageops::flip_vertical(pixels),
            Orientation::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(pixels)),
            Orientation::Right => imageops::rotate90(pixels),
            Orientation::RightMirrored => {
                imageops::flip_horizontal(&imageops::rotate270(pixels))
            }
            Orientation::Left => imageops::rotate270(pixels),
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Up,
            2 => Orientation::UpMirrored,
            3 => Orientation::Down,
            4 => Orientation::DownMirrored,
            5 => Orientation::LeftMirrored,
            6 => Orientation::Right,
            7 => Orientation::RightMirrored,
            8 => Orientation::Left,
            _ => Orientation::Up,
        }
    }
}

/// An immutable raster image: pixels, scale factor and orientation tag.
///
/// The pixel buffer is stored as captured; `orientation` says how it is
/// turned for display. Every geometry operation returns a new image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: PixelBuffer,
    scale: f64,
    orientation: Orientation,
}

impl RasterImage {
    /// Wrap a pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::EmptyImage` for a zero-sized buffer and
    /// `DecodeError::InvalidScale` for a non-positive or non-finite scale.
    pub fn new(
        pixels: PixelBuffer,
        scale: f64,
        orientation: Orientation,
    ) -> Result<Self, DecodeError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage { width, height });
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(DecodeError::InvalidScale(scale));
        }
        Ok(Self {
            pixels,
            scale,
            orientation,
        })
    }

    /// Wrap an upright buffer at scale 1.
    pub fn from_pixels(pixels: PixelBuffer) -> Result<Self, DecodeError> {
        Self::new(pixels, 1.0, Orientation::Up)
    }

    /// Wrap a canvas read-back. Canvases are never empty and always carry a
    /// valid scale.
    pub(crate) fn from_canvas(pixels: PixelBuffer, scale: f64) -> Self {
        debug_assert!(pixels.width() > 0 && pixels.height() > 0, "empty canvas");
        debug_assert!(scale.is_finite() && scale > 0.0, "invalid canvas scale");
        Self {
            pixels,
            scale,
            orientation: Orientation::Up,
        }
    }

    /// Build an image from raw RGBA bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        rgba: Vec<u8>,
        scale: f64,
        orientation: Orientation,
    ) -> Result<Self, DecodeError> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(DecodeError::InvalidPixelData {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels = PixelBuffer::from_raw(width, height, rgba).ok_or(
            DecodeError::InvalidPixelData {
                expected,
                actual: expected,
            },
        )?;
        Self::new(pixels, scale, orientation)
    }

    /// The stored pixel buffer, not corrected for orientation.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn into_pixels(self) -> PixelBuffer {
        self.pixels
    }

    /// Stored buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Stored buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Display size in points.
    ///
    /// Pixel dimensions divided by scale, swapped for landscape orientations.
    pub fn size(&self) -> Size {
        let stored = Size::new(
            self.pixels.width() as f64 / self.scale,
            self.pixels.height() as f64 / self.scale,
        );
        if self.orientation.is_landscape() {
            stored.swapped()
        } else {
            stored
        }
    }

    /// Pixels as they appear on screen, with the orientation applied.
    pub fn display_pixels(&self) -> Cow<'_, PixelBuffer> {
        match self.orientation {
            Orientation::Up => Cow::Borrowed(&self.pixels),
            other => Cow::Owned(other.apply(&self.pixels)),
        }
    }

    /// The same image with a different orientation tag.
    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..self.clone()
        }
    }

    /// Bake the orientation into the pixels, returning an `Up` image.
    pub fn to_upright(&self) -> Self {
        Self {
            pixels: self.display_pixels().into_owned(),
            scale: self.scale,
            orientation: Orientation::Up,
        }
    }
}
