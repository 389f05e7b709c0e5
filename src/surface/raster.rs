use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Color, FrameHandle, FrameRGBA};
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};
use crate::surface::adapter::{FrameQueue, Glyph, Surface};

/// CPU raster surface backed by `resvg`.
///
/// Glyphs accumulate on a persistent premultiplied pixmap. Draw calls are buffered and flushed
/// onto the pixmap in one batch by [`RasterSurface::snapshot`], so each glyph is rasterized once
/// no matter how many frames are captured.
pub struct RasterSurface {
    canvas: Canvas,
    background: Color,
    visible: bool,
    pixmap: resvg::tiny_skia::Pixmap,
    pending: Vec<Glyph>,
    drawn: usize,
    frames: FrameQueue,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl RasterSurface {
    /// Hidden surface cleared to black, using the system font database.
    pub fn new(canvas: Canvas) -> PrimeWheelResult<Self> {
        Self::with_fontdb(canvas, build_fontdb(None))
    }

    /// Like [`RasterSurface::new`], also loading `.ttf`/`.otf`/`.ttc` files from `dir`.
    pub fn with_fonts_dir(canvas: Canvas, dir: &Path) -> PrimeWheelResult<Self> {
        Self::with_fontdb(canvas, build_fontdb(Some(dir)))
    }

    fn with_fontdb(canvas: Canvas, fontdb: Arc<usvg::fontdb::Database>) -> PrimeWheelResult<Self> {
        let mut pixmap = alloc_pixmap(canvas)?;
        fill_pixmap(&mut pixmap, Color::BLACK);
        Ok(Self {
            canvas,
            background: Color::BLACK,
            visible: false,
            pixmap,
            pending: Vec::new(),
            drawn: 0,
            frames: FrameQueue::default(),
            fontdb,
        })
    }

    /// Number of font faces available for glyphs.
    pub fn font_face_count(&self) -> usize {
        self.fontdb.faces().count()
    }

    /// Glyphs drawn since the last clear, including ones not yet flushed.
    pub fn glyph_count(&self) -> usize {
        self.drawn + self.pending.len()
    }

    /// Frame scheduler state.
    pub fn frames(&self) -> &FrameQueue {
        &self.frames
    }

    /// Flush buffered glyphs and copy out the current pixels.
    #[tracing::instrument(skip(self), fields(pending = self.pending.len()))]
    pub fn snapshot(&mut self) -> PrimeWheelResult<FrameRGBA> {
        self.flush()?;
        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data().to_vec(),
            premultiplied: true,
        })
    }

    fn flush(&mut self) -> PrimeWheelResult<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let svg = glyph_layer_svg(self.canvas, &self.pending);
        let opts = usvg::Options {
            fontdb: Arc::clone(&self.fontdb),
            font_resolver: make_font_resolver(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&svg, &opts).context("parse glyph layer svg")?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut self.pixmap.as_mut(),
        );

        self.drawn += self.pending.len();
        self.pending.clear();
        Ok(())
    }
}

impl Surface for RasterSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self, background: Color) {
        self.background = background;
        self.pending.clear();
        self.drawn = 0;
        fill_pixmap(&mut self.pixmap, background);
    }

    fn fill_text(&mut self, glyph: &Glyph) {
        self.pending.push(glyph.clone());
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
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
        let mut pixmap = alloc_pixmap(canvas)?;
        fill_pixmap(&mut pixmap, self.background);
        self.canvas = canvas;
        self.pixmap = pixmap;
        self.pending.clear();
        self.drawn = 0;
        Ok(())
    }
}

fn alloc_pixmap(canvas: Canvas) -> PrimeWheelResult<resvg::tiny_skia::Pixmap> {
    canvas.validate()?;
    resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height).ok_or_else(|| {
        PrimeWheelError::render(format!(
            "failed to allocate {}x{} pixmap",
            canvas.width, canvas.height
        ))
    })
}

fn fill_pixmap(pixmap: &mut resvg::tiny_skia::Pixmap, color: Color) {
    pixmap.fill(resvg::tiny_skia::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
}

/// Transparent SVG document holding one `<text>` per glyph.
pub(crate) fn glyph_layer_svg(canvas: Canvas, glyphs: &[Glyph]) -> String {
    let (w, h) = (canvas.width, canvas.height);
    let mut out = String::with_capacity(128 + glyphs.len() * 128);
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    for g in glyphs {
        let _ = write!(
            out,
            r#"<text x="{:.3}" y="{:.3}" font-family="{}" font-size="{}" fill="{}" fill-opacity="{:.4}">{}</text>"#,
            g.position.x,
            g.position.y,
            xml_escape(&g.font_family),
            g.font_size_px,
            g.color.to_hex_rgb(),
            g.color.opacity(),
            xml_escape(&g.text),
        );
    }
    out.push_str("</svg>");
    out
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn build_fontdb(extra_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = extra_dir {
        load_fonts_from_dir(&mut db, dir);
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "fonts directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        if matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc") && path.is_file()
        {
            let _ = db.load_font_file(&path);
        }
    }
}

/// Resolve the requested family, then fall back to generic families, then to any face at all.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);
            families.push(usvg::fontdb::Family::Monospace);

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style: usvg::fontdb::Style::Normal,
            };

            fontdb
                .query(&query)
                .or_else(|| fontdb.faces().next().map(|f| f.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
