use std::{
    io::Write as _,
    path::{Path, PathBuf},
    process::{Child, ChildStdin, Command, Stdio},
};

use anyhow::Context as _;

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};

/// Output settings for [`FfmpegEncoder`].
#[derive(Clone, Debug)]
pub struct EncodeConfig {
    /// Frame width in pixels (even).
    pub width: u32,
    /// Frame height in pixels (even).
    pub height: u32,
    /// Output frame rate.
    pub fps: u32,
    /// Destination `.mp4` path.
    pub out_path: PathBuf,
    /// Whether to replace an existing file.
    pub overwrite: bool,
}

impl EncodeConfig {
    /// Reject sizes and rates the yuv420p MP4 pipeline cannot take.
    pub fn validate(&self) -> PrimeWheelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PrimeWheelError::validation(
                "encode width/height must be non-zero",
            ));
        }
        if self.fps == 0 {
            return Err(PrimeWheelError::validation("encode fps must be non-zero"));
        }
        if !self.width.is_multiple_of(2) || !self.height.is_multiple_of(2) {
            return Err(PrimeWheelError::validation(
                "encode width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }
}

/// Whether an `ffmpeg` binary answers `-version`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> PrimeWheelResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Streams raw RGBA frames into a system `ffmpeg` process producing H.264 MP4.
pub struct FfmpegEncoder {
    cfg: EncodeConfig,
    bg_rgba: [u8; 4],
    child: Child,
    stdin: Option<ChildStdin>,
    scratch: Vec<u8>,
}

impl FfmpegEncoder {
    /// Spawn `ffmpeg`. Alpha in incoming frames is flattened over `bg_rgba`.
    pub fn new(cfg: EncodeConfig, bg_rgba: [u8; 4]) -> PrimeWheelResult<Self> {
        cfg.validate()?;
        ensure_parent_dir(&cfg.out_path)?;

        if !cfg.overwrite && cfg.out_path.exists() {
            return Err(PrimeWheelError::validation(format!(
                "output file '{}' already exists",
                cfg.out_path.display()
            )));
        }

        let mut child = Command::new("ffmpeg")
            .args(ffmpeg_args(&cfg))
            .arg(&cfg.out_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| PrimeWheelError::render(format!("cannot start ffmpeg: {e}")))?;
        let Some(stdin) = child.stdin.take() else {
            return Err(PrimeWheelError::render("ffmpeg stdin is not piped"));
        };
        tracing::debug!(out = %cfg.out_path.display(), "ffmpeg started");

        Ok(Self {
            scratch: vec![0u8; (cfg.width as usize) * (cfg.height as usize) * 4],
            cfg,
            bg_rgba,
            child,
            stdin: Some(stdin),
        })
    }

    /// Write one frame. Its size must match the encoder configuration.
    pub fn encode_frame(&mut self, frame: &FrameRGBA) -> PrimeWheelResult<()> {
        if (frame.width, frame.height) != (self.cfg.width, self.cfg.height) {
            return Err(PrimeWheelError::validation(format!(
                "frame is {}x{} but the encoder was opened for {}x{}",
                frame.width, frame.height, self.cfg.width, self.cfg.height
            )));
        }

        flatten_to_opaque_rgba8(
            &mut self.scratch,
            &frame.data,
            frame.premultiplied,
            self.bg_rgba,
        )?;

        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| PrimeWheelError::render("ffmpeg encoder already finished"))?;
        stdin
            .write_all(&self.scratch)
            .map_err(|e| PrimeWheelError::render(format!("ffmpeg pipe closed: {e}")))
    }

    /// Close the pipe and wait for `ffmpeg` to exit cleanly.
    pub fn finish(mut self) -> PrimeWheelResult<()> {
        self.stdin = None;
        let output = self
            .child
            .wait_with_output()
            .map_err(|e| PrimeWheelError::render(format!("waiting on ffmpeg: {e}")))?;
        if output.status.success() {
            tracing::debug!(out = %self.cfg.out_path.display(), "ffmpeg finished");
            return Ok(());
        }
        Err(PrimeWheelError::render(format!(
            "ffmpeg failed ({}): {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )))
    }
}

/// Everything before the output path: raw RGBA on stdin, H.264 yuv420p out.
pub(crate) fn ffmpeg_args(cfg: &EncodeConfig) -> Vec<String> {
    let overwrite = if cfg.overwrite { "-y" } else { "-n" };
    let size = format!("{}x{}", cfg.width, cfg.height);
    let rate = cfg.fps.to_string();
    [
        overwrite,
        "-loglevel",
        "error",
        "-f",
        "rawvideo",
        "-pix_fmt",
        "rgba",
        "-s",
        size.as_str(),
        "-r",
        rate.as_str(),
        "-i",
        "pipe:0",
        "-an",
        "-c:v",
        "libx264",
        "-pix_fmt",
        "yuv420p",
        "-movflags",
        "+faststart",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

pub(crate) fn flatten_to_opaque_rgba8(
    dst: &mut [u8],
    src: &[u8],
    src_is_premul: bool,
    bg_rgba: [u8; 4],
) -> PrimeWheelResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PrimeWheelError::validation(
            "flatten_to_opaque_rgba8 expects equal-length rgba8 buffers",
        ));
    }

    let bg = [
        u16::from(bg_rgba[0]),
        u16::from(bg_rgba[1]),
        u16::from(bg_rgba[2]),
    ];

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let a = u16::from(s[3]);
        let inv = 255 - a;
        for c in 0..3 {
            let fg = if src_is_premul {
                u16::from(s[c])
            } else {
                mul_div255(u16::from(s[c]), a)
            };
            d[c] = (fg + mul_div255(bg[c], inv)).min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
