use std::collections::VecDeque;

use crate::foundation::core::{Canvas, Color, FrameHandle, Point};
use crate::foundation::error::PrimeWheelResult;

/// One text draw: the decimal digits of a prime at a pixel position.
#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    /// Text to draw.
    pub text: String,
    /// Baseline origin in pixel space.
    pub position: Point,
    /// Fill color.
    pub color: Color,
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Font family name.
    pub font_family: String,
}

/// Drawing surface plus frame-scheduling primitive the engine draws through.
///
/// The engine owns its surface exclusively while attached. Frame scheduling is cooperative: the
/// engine asks for a frame with [`Surface::schedule_frame`], and the host later fires it by taking
/// it from [`Surface::take_due_frame`] and handing the handle back to
/// [`crate::PrimeWheels::on_frame`].
pub trait Surface {
    /// Pixel dimensions.
    fn canvas(&self) -> Canvas;

    /// Fill the whole surface with `background`, dropping everything drawn so far.
    fn clear(&mut self, background: Color);

    /// Draw one glyph.
    fn fill_text(&mut self, glyph: &Glyph);

    /// Make the surface visible.
    fn show(&mut self);

    /// Hide the surface. Drawn content is kept.
    fn hide(&mut self);

    /// Whether the surface is currently shown.
    fn is_visible(&self) -> bool;

    /// Request the next animation frame.
    fn schedule_frame(&mut self) -> FrameHandle;

    /// Cancel a previously requested frame. Unknown or already fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Oldest requested frame that has not fired or been cancelled.
    fn take_due_frame(&mut self) -> Option<FrameHandle>;

    /// Change pixel dimensions. Content is discarded.
    ///
    /// On error the surface keeps its previous size and content.
    fn resize(&mut self, canvas: Canvas) -> PrimeWheelResult<()>;
}

/// Handle bookkeeping shared by the built-in surfaces.
#[derive(Clone, Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    /// Issue a fresh handle and mark it pending.
    pub fn request(&mut self) -> FrameHandle {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending.push_back(handle);
        handle
    }

    /// Drop `handle` from the pending set, if present.
    pub fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }

    /// Pop the oldest pending handle.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Number of frames requested but not yet fired or cancelled.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Total number of frames ever requested.
    pub fn requested_total(&self) -> u64 {
        self.next
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/adapter.rs"]
mod tests;
