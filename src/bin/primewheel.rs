use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "primewheel", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the effect for a number of ticks and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct SceneArgs {
    /// Scene JSON. Without it a single built-in wheel is used.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the random placement seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Extra directory of .ttf/.otf/.ttc fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of ticks to run before capturing.
    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to encode (one tick per frame).
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_scene(args: &SceneArgs) -> anyhow::Result<primewheel::SceneConfig> {
    let mut scene = match &args.config {
        Some(path) => primewheel::SceneConfig::load(path)
            .with_context(|| format!("load scene '{}'", path.display()))?,
        None => primewheel::SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        scene.settings.seed = seed;
    }
    Ok(scene)
}

fn build_engine(
    scene: &primewheel::SceneConfig,
    fonts_dir: Option<&Path>,
) -> anyhow::Result<primewheel::PrimeWheels<primewheel::RasterSurface>> {
    let surface = match fonts_dir {
        Some(dir) => primewheel::RasterSurface::with_fonts_dir(scene.canvas, dir)?,
        None => primewheel::RasterSurface::new(scene.canvas)?,
    };
    if surface.font_face_count() == 0 {
        tracing::warn!("no fonts found; glyphs will not be visible (try --fonts-dir)");
    }

    let mut engine = primewheel::PrimeWheels::with_surface(scene.settings.clone(), surface)?;
    for (i, wheel) in scene.wheels.iter().enumerate() {
        engine
            .add(wheel.clone())
            .with_context(|| format!("add wheel {i}"))?;
    }
    engine.start()?;
    Ok(engine)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let mut engine = build_engine(&scene, args.scene.fonts_dir.as_deref())?;

    let stats = primewheel::run_frames(&mut engine, args.ticks)?;
    let frame = engine
        .surface_mut()
        .context("engine lost its surface (bug)")?
        .snapshot()?;

    primewheel::ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &unpremultiply(&frame.data),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} ticks, {} glyphs, {} resets)",
        args.out.display(),
        stats.ticks,
        stats.glyphs_drawn,
        stats.resets
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let scene = load_scene(&args.scene)?;
    let mut engine = build_engine(&scene, args.scene.fonts_dir.as_deref())?;

    let opts = primewheel::RenderToMp4Opts {
        frames: args.frames,
        fps: scene.fps,
        overwrite: true,
    };
    let stats = primewheel::render_to_mp4(&mut engine, &args.out, opts)?;

    eprintln!(
        "wrote {} ({} frames, {} resets)",
        args.out.display(),
        stats.frames_total,
        stats.resets
    );
    Ok(())
}

/// PNG wants straight alpha; the raster surface hands out premultiplied pixels.
fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
