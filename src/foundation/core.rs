use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};

pub use kurbo::Point;

/// Largest RGBA8 pixel buffer a canvas may describe (256 MiB, e.g. 8192x8192).
pub const MAX_CANVAS_BYTES: u64 = 256 * 1024 * 1024;

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a validated canvas.
    pub fn new(width: u32, height: u32) -> PrimeWheelResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero-sized dimensions and canvases over [`MAX_CANVAS_BYTES`].
    pub fn validate(self) -> PrimeWheelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PrimeWheelError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        let bytes = u64::from(self.width) * u64::from(self.height) * 4;
        if bytes > MAX_CANVAS_BYTES {
            return Err(PrimeWheelError::validation(format!(
                "canvas {}x{} needs {bytes} bytes, limit is {MAX_CANVAS_BYTES}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Canvas center in pixel space.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Straight-alpha RGBA8 color, written and parsed as `#RRGGBB` / `#RRGGBBAA` (or `#RGB`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 is opaque).
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque `#0000FF`, the default wheel color.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Straight-alpha channels as an array.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }

    /// `#RRGGBB` without the alpha channel.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex_rgb())
        } else {
            write!(f, "{}{:02X}", self.to_hex_rgb(), self.a)
        }
    }
}

impl FromStr for Color {
    type Err = PrimeWheelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s).map_err(PrimeWheelError::validation)
    }
}

impl serde::Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if !s.is_ascii() {
        return Err(format!("invalid hex color \"{s}\""));
    }

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        3 => {
            // #RGB expands each nibble: #0AF -> #00AAFF
            let mut out = [0u8; 3];
            for (i, c) in s.chars().enumerate() {
                let n = c
                    .to_digit(16)
                    .ok_or_else(|| format!("invalid hex digit '{c}'"))? as u8;
                out[i] = n * 17;
            }
            Ok(Color::rgb(out[0], out[1], out[2]))
        }
        6 => Ok(Color::rgb(
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
        )),
        8 => Ok(Color {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RGB, #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// Opaque handle for one requested animation frame.
///
/// Handles are issued by a surface's frame scheduler and are never reused within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)` or `None` if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
