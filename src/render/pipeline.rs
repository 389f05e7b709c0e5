use std::path::PathBuf;

use crate::encode::ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
use crate::engine::lifecycle::{FrameOutcome, PrimeWheels};
use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};
use crate::surface::adapter::Surface;
use crate::surface::raster::RasterSurface;

/// Counters collected while driving an engine offline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames fired.
    pub frames_total: u64,
    /// Frames that ticked the scheduler.
    pub ticks: u64,
    /// Frames that arrived while paused.
    pub paused_frames: u64,
    /// Glyphs drawn.
    pub glyphs_drawn: u64,
    /// Collective resets.
    pub resets: u64,
}

impl RenderStats {
    fn record(&mut self, outcome: FrameOutcome) -> PrimeWheelResult<()> {
        match outcome {
            FrameOutcome::Idle | FrameOutcome::Ignored => {
                return Err(PrimeWheelError::not_ready(
                    "no frame in flight; start the engine before rendering",
                ));
            }
            FrameOutcome::Paused => self.paused_frames += 1,
            FrameOutcome::Ticked(r) => {
                self.ticks += 1;
                self.glyphs_drawn += r.drawn as u64;
                self.resets += u64::from(r.reset);
            }
        }
        self.frames_total += 1;
        Ok(())
    }
}

/// Fire `frames` frames through the engine's own frame chain without capturing pixels.
///
/// The engine must be started.
pub fn run_frames<S: Surface>(
    engine: &mut PrimeWheels<S>,
    frames: u64,
) -> PrimeWheelResult<RenderStats> {
    let mut stats = RenderStats::default();
    for _ in 0..frames {
        stats.record(engine.pump())?;
    }
    Ok(stats)
}

/// Fire `frames` frames and hand a snapshot of each to `sink` as `(frame_index, pixels)`.
///
/// The engine must be started.
#[tracing::instrument(skip(engine, sink))]
pub fn render_frames<F>(
    engine: &mut PrimeWheels<RasterSurface>,
    frames: u64,
    mut sink: F,
) -> PrimeWheelResult<RenderStats>
where
    F: FnMut(u64, FrameRGBA) -> PrimeWheelResult<()>,
{
    let mut stats = RenderStats::default();
    for i in 0..frames {
        stats.record(engine.pump())?;
        let frame = engine
            .surface_mut()
            .ok_or_else(|| PrimeWheelError::not_ready("no surface attached"))?
            .snapshot()?;
        sink(i, frame)?;
    }
    Ok(stats)
}

/// Options for [`render_to_mp4`].
#[derive(Clone, Debug)]
pub struct RenderToMp4Opts {
    /// Number of frames to encode.
    pub frames: u64,
    /// Output frame rate.
    pub fps: u32,
    /// Whether to overwrite `out_path` if it already exists.
    pub overwrite: bool,
}

impl Default for RenderToMp4Opts {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60,
            overwrite: true,
        }
    }
}

/// Render a started engine to an MP4 by invoking the system `ffmpeg` binary.
///
/// Alpha is flattened over the engine's background color.
#[tracing::instrument(skip(engine, out_path))]
pub fn render_to_mp4(
    engine: &mut PrimeWheels<RasterSurface>,
    out_path: impl Into<PathBuf>,
    opts: RenderToMp4Opts,
) -> PrimeWheelResult<RenderStats> {
    if opts.frames == 0 {
        return Err(PrimeWheelError::validation(
            "render_to_mp4 needs at least one frame",
        ));
    }
    if !is_ffmpeg_on_path() {
        return Err(PrimeWheelError::render(
            "ffmpeg is required for MP4 rendering, but was not found on PATH",
        ));
    }

    let canvas = engine
        .surface()
        .ok_or_else(|| PrimeWheelError::not_ready("no surface attached"))?
        .canvas();
    let cfg = EncodeConfig {
        width: canvas.width,
        height: canvas.height,
        fps: opts.fps,
        out_path: out_path.into(),
        overwrite: opts.overwrite,
    };

    let mut enc = FfmpegEncoder::new(cfg, engine.background().to_rgba8())?;
    let stats = render_frames(engine, opts.frames, |_, frame| enc.encode_frame(&frame))?;
    enc.finish()?;

    tracing::info!(?stats, "mp4 render finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
