//! Encoding sinks for offline renders.

/// `ffmpeg`-based MP4 output via the system binary.
pub(crate) mod ffmpeg;
