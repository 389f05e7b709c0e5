use crate::foundation::core::{Color, Point};
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};

/// First candidate every wheel starts from.
pub const FIRST_CANDIDATE: u64 = 2;

/// Caller-facing wheel configuration.
///
/// Every field is optional when deserialized; missing fields take the defaults below. Both the
/// snake_case and camelCase spellings are accepted (`offset_x` / `offsetX`).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Horizontal draw-origin displacement from the canvas center.
    #[serde(alias = "offsetX")]
    pub offset_x: i32,
    /// Vertical draw-origin displacement from the canvas center.
    #[serde(alias = "offsetY")]
    pub offset_y: i32,
    /// Re-roll offsets at add time and at every collective reset.
    #[serde(alias = "randomOffset")]
    pub random_offset: bool,
    /// Radius divisor and bound multiplier. Must be finite and positive.
    pub scale: f64,
    /// Frames per candidate step. Must be at least 1.
    pub speed: u32,
    /// Glyph fill color.
    pub color: Color,
    /// CSS-like font size, `"8px"` or `"8"`.
    #[serde(alias = "fontSize", alias = "size")]
    pub font_size: String,
    /// Font family name.
    #[serde(alias = "fontFamily", alias = "font")]
    pub font_family: String,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            offset_x: 0,
            offset_y: 0,
            random_offset: false,
            scale: 1.0,
            speed: 5,
            color: Color::BLUE,
            font_size: "8px".to_owned(),
            font_family: "Arial".to_owned(),
        }
    }
}

impl WheelConfig {
    /// Check value ranges; returns the parsed font size in pixels.
    pub fn validate(&self) -> PrimeWheelResult<f64> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(PrimeWheelError::validation(format!(
                "wheel scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        if self.speed == 0 {
            return Err(PrimeWheelError::validation("wheel speed must be >= 1"));
        }
        if self.font_family.trim().is_empty() {
            return Err(PrimeWheelError::validation(
                "wheel font family must be non-empty",
            ));
        }
        parse_font_size_px(&self.font_size)
    }
}

pub(crate) fn parse_font_size_px(s: &str) -> PrimeWheelResult<f64> {
    let t = s.trim();
    let num = t.strip_suffix("px").unwrap_or(t).trim();
    match num.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(PrimeWheelError::validation(format!(
            "font size must look like \"8px\", got \"{s}\""
        ))),
    }
}

/// One prime-plotting animation unit: configuration plus its candidate cursor.
///
/// Wheels are owned by a [`crate::WheelRegistry`]; the engine mutates them on every tick and on
/// collective reset.
#[derive(Clone, Debug)]
pub struct Wheel {
    pub(crate) config: WheelConfig,
    pub(crate) font_size_px: f64,
    pub(crate) last_prime: u64,
    pub(crate) done: bool,
    pub(crate) frames: u32,
}

impl Wheel {
    /// Build a wheel at candidate 2 from a validated configuration.
    pub fn new(config: WheelConfig) -> PrimeWheelResult<Self> {
        let font_size_px = config.validate()?;
        Ok(Self {
            config,
            font_size_px,
            last_prime: FIRST_CANDIDATE,
            done: false,
            frames: 0,
        })
    }

    /// Current configuration, including the offsets in effect.
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Horizontal offset in effect.
    pub fn offset_x(&self) -> i32 {
        self.config.offset_x
    }

    /// Vertical offset in effect.
    pub fn offset_y(&self) -> i32 {
        self.config.offset_y
    }

    /// Glyph fill color.
    pub fn color(&self) -> Color {
        self.config.color
    }

    /// Font size in pixels.
    pub fn font_size_px(&self) -> f64 {
        self.font_size_px
    }

    /// Next candidate to test.
    pub fn last_prime(&self) -> u64 {
        self.last_prime
    }

    /// Whether the cursor has passed the wheel's bound.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Largest candidate this wheel visits: `base_bound * scale`.
    pub fn max_candidate(&self, base_bound: u64) -> f64 {
        base_bound as f64 * self.config.scale
    }

    /// Where the glyph for `candidate` lands, given the canvas center.
    ///
    /// Polar `(r = n / scale, theta = n radians)` around the offset origin; y grows downward.
    pub fn plot_point(&self, center: Point, candidate: u64) -> Point {
        let n = candidate as f64;
        let r = n / self.config.scale;
        Point::new(
            center.x + f64::from(self.config.offset_x) + r * n.cos(),
            center.y + f64::from(self.config.offset_y) - r * n.sin(),
        )
    }

    pub(crate) fn set_offsets(&mut self, offset_x: i32, offset_y: i32) {
        self.config.offset_x = offset_x;
        self.config.offset_y = offset_y;
    }

    pub(crate) fn rewind(&mut self) {
        self.last_prime = FIRST_CANDIDATE;
        self.done = false;
        self.frames = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/model.rs"]
mod tests;
