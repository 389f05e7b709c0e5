//! Primewheel renders an ambient "prime wheel" effect: independent wheels that walk the integers,
//! test each candidate for primality, and plot every prime `n` at polar coordinates
//! `(r = n / scale, theta = n)` around their own origin.
//!
//! # Pieces
//!
//! - [`is_prime`]: trial-division primality oracle.
//! - [`Wheel`] / [`WheelRegistry`]: per-wheel configuration and cursor, held in a bounded,
//!   ordered collection.
//! - [`Scheduler`]: one tick advances every wheel, draws found primes, and restarts the whole set
//!   together once every wheel has passed its bound.
//! - [`PrimeWheels`]: start / stop / pause / toggle / reset over a single run state, with at most
//!   one frame in flight.
//! - [`Surface`]: the drawing plus frame-scheduling boundary. [`RecordingSurface`] keeps calls in
//!   memory; [`RasterSurface`] rasterizes glyphs on the CPU.
//!
//! # Frame model
//!
//! The engine never loops on its own. It asks its surface for a frame, and the host fires that
//! frame back through [`PrimeWheels::on_frame`] (or [`PrimeWheels::pump`]). Each fired frame runs
//! one tick to completion and arms the next frame.
//!
//! Offline rendering ([`render_frames`], [`render_to_mp4`]) drives that same chain.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod encode;
mod engine;
mod foundation;
mod oracle;
mod render;
mod surface;
mod wheel;

pub use config::model::{DEFAULT_BASE_BOUND, EngineSettings, SceneConfig};
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, ensure_parent_dir, is_ffmpeg_on_path};
pub use engine::lifecycle::{FrameOutcome, PrimeWheels, RunState};
pub use engine::scheduler::{Scheduler, TickReport};
pub use foundation::core::{Canvas, Color, FrameHandle, FrameRGBA, MAX_CANVAS_BYTES, Point};
pub use foundation::error::{PrimeWheelError, PrimeWheelResult};
pub use oracle::prime::is_prime;
pub use render::pipeline::{RenderStats, RenderToMp4Opts, render_frames, render_to_mp4, run_frames};
pub use surface::adapter::{FrameQueue, Glyph, Surface};
pub use surface::raster::RasterSurface;
pub use surface::recording::{DrawOp, RecordingSurface};
pub use wheel::model::{FIRST_CANDIDATE, Wheel, WheelConfig};
pub use wheel::registry::{DEFAULT_MAX_WHEELS, WheelRegistry};
