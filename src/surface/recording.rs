use crate::foundation::core::{Canvas, Color, FrameHandle};
use crate::foundation::error::PrimeWheelResult;
use crate::surface::adapter::{FrameQueue, Glyph, Surface};

/// A single recorded surface call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// `clear(background)`.
    Clear(Color),
    /// `fill_text(glyph)`.
    Text(Glyph),
    /// `show()`.
    Show,
    /// `hide()`.
    Hide,
    /// `resize(canvas)`.
    Resize(Canvas),
}

/// In-memory surface that records every call.
///
/// Useful for headless hosts and for asserting on exactly what the engine drew.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    canvas: Canvas,
    visible: bool,
    ops: Vec<DrawOp>,
    frames: FrameQueue,
}

impl RecordingSurface {
    /// Hidden surface of the given size with nothing recorded.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            visible: false,
            ops: Vec::new(),
            frames: FrameQueue::default(),
        }
    }

    /// Every recorded call, oldest first.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Recorded glyphs, oldest first.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(g) => Some(g),
            _ => None,
        })
    }

    /// Number of recorded clears.
    pub fn clear_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Clear(_)))
            .count()
    }

    /// Frame scheduler state.
    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

}

impl Surface for RecordingSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, background: Color) {
        self.ops.push(DrawOp::Clear(background));
    }

    fn fill_text(&mut self, glyph: &Glyph) {
        self.ops.push(DrawOp::Text(glyph.clone()));
    }

    fn show(&mut self) {
        self.visible = true;
        self.ops.push(DrawOp::Show);
    }

    fn hide(&mut self) {
        self.visible = false;
        self.ops.push(DrawOp::Hide);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn schedule_frame(&mut self) -> FrameHandle {
        self.frames.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.frames.cancel(handle);
    }

    fn take_due_frame(&mut self) -> Option<FrameHandle> {
        self.frames.take_due()
    }

    fn resize(&mut self, canvas: Canvas) -> PrimeWheelResult<()> {
        canvas.validate()?;
        self.canvas = canvas;
        self.ops.push(DrawOp::Resize(canvas));
        Ok(())
    }
}
