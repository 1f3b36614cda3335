//! CPU canvas backed by an RGBA pixel buffer.
//!
//! # Algorithm
//!
//! Drawing uses inverse mapping: for each canvas pixel inside the drawn
//! rect's footprint, the pixel centre is mapped back through the current
//! transform into the rect, then into source pixel coordinates:
//!
//! ```text
//! user    = ctm⁻¹ · (px + 0.5, py + 0.5)
//! (u, v)  = ((user.x - rect.x) / rect.w, (user.y - rect.y) / rect.h)
//! src     = (u * src_w - 0.5, v * src_h - 0.5)
//! ```
//!
//! and the source is sampled there. Axis-aligned draws onto whole pixels
//! skip the per-pixel mapping and go through `image::imageops::resize`.

use image::{imageops, Rgba};
use serde::{Deserialize, Serialize};

use super::{Canvas, Surface, SurfaceError};
use crate::decode::{PixelBuffer, RasterImage};
use crate::geometry::{AffineTransform, Point, Rect, Size};

/// Default canvas budget: 100 megapixels.
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Slack when deciding whether a mapped point falls inside the drawn rect.
const EDGE_TOLERANCE: f64 = 1e-9;

/// Slack when rounding a fractional extent up to whole pixels.
const EXTENT_TOLERANCE: f64 = 1e-9;

/// Filter type for resampling during draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality). Only used for
    /// axis-aligned draws; rotated draws fall back to bilinear.
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            FilterType::Nearest => imageops::FilterType::Nearest,
            FilterType::Bilinear => imageops::FilterType::Triangle,
            FilterType::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Surface that renders on the CPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftwareSurface {
    max_pixels: u64,
    filter: FilterType,
}

impl Default for SoftwareSurface {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
            filter: FilterType::default(),
        }
    }
}

impl SoftwareSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of pixels a single canvas may allocate.
    pub fn with_max_pixels(mut self, max_pixels: u64) -> Self {
        self.max_pixels = max_pixels;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter(&self) -> FilterType {
        self.filter
    }
}

impl Surface for SoftwareSurface {
    type Canvas = SoftwareCanvas;

    fn create_canvas(&self, size: Size, scale: f64) -> Result<SoftwareCanvas, SurfaceError> {
        let invalid = SurfaceError::InvalidSize {
            width: size.width,
            height: size.height,
            scale,
        };
        if size.is_empty() || !scale.is_finite() || scale <= 0.0 {
            return Err(invalid);
        }

        let width = pixel_extent(size.width * scale);
        let height = pixel_extent(size.height * scale);
        if width < 1.0 || height < 1.0 {
            return Err(invalid);
        }

        let pixels = width * height;
        if pixels > self.max_pixels as f64 || width > u32::MAX as f64 || height > u32::MAX as f64 {
            return Err(SurfaceError::TooLarge {
                pixels: pixels.min(u64::MAX as f64) as u64,
                limit: self.max_pixels,
            });
        }

        // Partial pixels are stretched onto the whole backing store
        let ctm = AffineTransform::scale(width / size.width, height / size.height);
        let (width, height) = (width as u32, height as u32);
        tracing::debug!(width, height, scale, "allocating canvas");

        Ok(SoftwareCanvas {
            target: PixelBuffer::new(width, height),
            size,
            scale,
            ctm,
            filter: self.filter,
        })
    }
}

/// An open software canvas. Memory is released on drop.
#[derive(Debug)]
pub struct SoftwareCanvas {
    target: PixelBuffer,
    size: Size,
    scale: f64,
    ctm: AffineTransform,
    filter: FilterType,
}

impl SoftwareCanvas {
    /// The current transform from user space to canvas pixels.
    pub fn transform(&self) -> AffineTransform {
        self.ctm
    }

    /// Backing store dimensions in pixels.
    pub fn pixel_dimensions(&self) -> (u32, u32) {
        self.target.dimensions()
    }

    fn paint(&mut self, image: &RasterImage, rect: Rect, bottom_up: bool) {
        if rect.is_empty() {
            return;
        }

        let (tw, th) = self.target.dimensions();
        let footprint = rect.applying(&self.ctm);
        let Some(clip) = footprint.intersection(&Rect::new(0.0, 0.0, tw as f64, th as f64)) else {
            return;
        };

        let source = image.display_pixels();

        if !bottom_up && self.is_pixel_aligned(&footprint) {
            self.blit_scaled(&source, &footprint);
            return;
        }

        let Some(inverse) = self.ctm.invert() else {
            tracing::debug!("singular transform, nothing drawn");
            return;
        };

        let (src_w, src_h) = (source.width() as f64, source.height() as f64);
        let x0 = clip.min_x().floor() as u32;
        let y0 = clip.min_y().floor() as u32;
        let x1 = (clip.max_x().ceil() as u32).min(tw);
        let y1 = (clip.max_y().ceil() as u32).min(th);

        for py in y0..y1 {
            for px in x0..x1 {
                let user = inverse.apply(Point::new(px as f64 + 0.5, py as f64 + 0.5));
                let u = (user.x - rect.x) / rect.width;
                let mut v = (user.y - rect.y) / rect.height;

                if !inside_unit(u) || !inside_unit(v) {
                    continue;
                }
                if bottom_up {
                    v = 1.0 - v;
                }

                let (sx, sy) = (u * src_w - 0.5, v * src_h - 0.5);
                let sample = match self.filter {
                    FilterType::Nearest => sample_nearest(&source, sx, sy),
                    FilterType::Bilinear | FilterType::Lanczos3 => {
                        sample_bilinear(&source, sx, sy)
                    }
                };
                composite(self.target.get_pixel_mut(px, py), sample);
            }
        }
    }

    /// True when the draw is an axis-aligned, unflipped copy onto whole pixels.
    fn is_pixel_aligned(&self, footprint: &Rect) -> bool {
        let t = &self.ctm;
        t.b == 0.0
            && t.c == 0.0
            && t.a > 0.0
            && t.d > 0.0
            && [footprint.x, footprint.y, footprint.width, footprint.height]
                .iter()
                .all(|v| (v - v.round()).abs() < 1e-6)
    }

    fn blit_scaled(&mut self, source: &PixelBuffer, footprint: &Rect) {
        let (dw, dh) = (footprint.width.round() as u32, footprint.height.round() as u32);
        if dw == 0 || dh == 0 {
            return;
        }

        let resized;
        let scaled = if source.dimensions() == (dw, dh) {
            source
        } else {
            resized = imageops::resize(source, dw, dh, self.filter.to_image_filter());
            &resized
        };

        let (ox, oy) = (footprint.x.round() as i64, footprint.y.round() as i64);
        let (tw, th) = (self.target.width() as i64, self.target.height() as i64);
        for (sx, sy, pixel) in scaled.enumerate_pixels() {
            let (tx, ty) = (ox + sx as i64, oy + sy as i64);
            if tx < 0 || ty < 0 || tx >= tw || ty >= th {
                continue;
            }
            composite(self.target.get_pixel_mut(tx as u32, ty as u32), *pixel);
        }
    }
}

impl Canvas for SoftwareCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn translate_by(&mut self, tx: f64, ty: f64) {
        self.ctm = self.ctm.translated(tx, ty);
    }

    fn scale_by(&mut self, sx: f64, sy: f64) {
        self.ctm = self.ctm.scaled(sx, sy);
    }

    fn rotate_by(&mut self, radians: f64) {
        self.ctm = self.ctm.rotated(radians);
    }

    fn draw_image(&mut self, image: &RasterImage, rect: Rect) {
        self.paint(image, rect, false);
    }

    fn draw_bitmap(&mut self, image: &RasterImage, rect: Rect) {
        self.paint(image, rect, true);
    }

    fn into_image(self) -> RasterImage {
        RasterImage::from_canvas(self.target, self.scale)
    }
}

/// Whole pixels needed to cover `extent`, ignoring float noise above an integer.
#[inline]
fn pixel_extent(extent: f64) -> f64 {
    (extent - EXTENT_TOLERANCE).ceil()
}

#[inline]
fn inside_unit(t: f64) -> bool {
    (-EDGE_TOLERANCE..=1.0 + EDGE_TOLERANCE).contains(&t)
}

fn sample_nearest(image: &PixelBuffer, x: f64, y: f64) -> Rgba<u8> {
    let px = x.round().clamp(0.0, (image.width() - 1) as f64) as u32;
    let py = y.round().clamp(0.0, (image.height() - 1) as f64) as u32;
    *image.get_pixel(px, py)
}

/// Sample a pixel using bilinear interpolation, clamping at the edges.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64) -> Rgba<u8> {
    let max_x = (image.width() - 1) as f64;
    let max_y = (image.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor();
    let y0 = y.floor();
    let x1 = (x0 + 1.0).min(max_x);
    let y1 = (y0 + 1.0).min(max_y);

    // Fractional distances
    let fx = x - x0;
    let fy = y - y0;

    let p00 = image.get_pixel(x0 as u32, y0 as u32).0;
    let p10 = image.get_pixel(x1 as u32, y0 as u32).0;
    let p01 = image.get_pixel(x0 as u32, y1 as u32).0;
    let p11 = image.get_pixel(x1 as u32, y1 as u32).0;

    let mut result = [0u8; 4];
    for i in 0..4 {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    Rgba(result)
}

/// Source-over compositing of `src` onto `dst`.
fn composite(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src.0[3] as u32;
    let da = dst.0[3] as u32;
    if sa == 255 || da == 0 {
        *dst = src;
        return;
    }
    if sa == 0 {
        return;
    }

    let dst_weight = da * (255 - sa) / 255;
    let out_a = sa + dst_weight;
    for i in 0..3 {
        let c = src.0[i] as u32 * sa + dst.0[i] as u32 * dst_weight;
        dst.0[i] = (c / out_a) as u8;
    }
    dst.0[3] = out_a as u8;
}
