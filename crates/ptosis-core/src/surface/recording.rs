//! Test doubles for the drawing-surface capability.

use std::cell::RefCell;
use std::rc::Rc;

use super::{Canvas, SoftwareCanvas, Surface, SurfaceError};
use crate::decode::{PixelBuffer, RasterImage};
use crate::geometry::{Rect, Size};

/// Canvas call recorded by `RecordingSurface`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Create(Size, f64),
    Translate(f64, f64),
    Scale(f64, f64),
    Rotate(f64),
    DrawImage(Rect),
    DrawBitmap(Rect),
}

/// Records every call made on the surface and its canvases.
#[derive(Default)]
pub(crate) struct RecordingSurface {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl RecordingSurface {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

pub(crate) struct RecordingCanvas {
    calls: Rc<RefCell<Vec<Call>>>,
    size: Size,
    scale: f64,
}

impl Surface for RecordingSurface {
    type Canvas = RecordingCanvas;

    fn create_canvas(&self, size: Size, scale: f64) -> Result<Self::Canvas, SurfaceError> {
        self.calls.borrow_mut().push(Call::Create(size, scale));
        Ok(RecordingCanvas {
            calls: Rc::clone(&self.calls),
            size,
            scale,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> Size {
        self.size
    }

    fn scale(&self) -> f64 {
        self.scale
    }

    fn translate_by(&mut self, tx: f64, ty: f64) {
        self.calls.borrow_mut().push(Call::Translate(tx, ty));
    }

    fn scale_by(&mut self, sx: f64, sy: f64) {
        self.calls.borrow_mut().push(Call::Scale(sx, sy));
    }

    fn rotate_by(&mut self, radians: f64) {
        self.calls.borrow_mut().push(Call::Rotate(radians));
    }

    fn draw_image(&mut self, _image: &RasterImage, rect: Rect) {
        self.calls.borrow_mut().push(Call::DrawImage(rect));
    }

    fn draw_bitmap(&mut self, _image: &RasterImage, rect: Rect) {
        self.calls.borrow_mut().push(Call::DrawBitmap(rect));
    }

    fn into_image(self) -> RasterImage {
        RasterImage::from_canvas(PixelBuffer::new(1, 1), self.scale)
    }
}

/// A surface that can never open a canvas.
pub(crate) struct BrokenSurface;

impl Surface for BrokenSurface {
    type Canvas = SoftwareCanvas;

    fn create_canvas(&self, size: Size, scale: f64) -> Result<Self::Canvas, SurfaceError> {
        Err(SurfaceError::InvalidSize {
            width: size.width,
            height: size.height,
            scale,
        })
    }
}
