use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, Color};
use crate::foundation::error::{PrimeWheelError, PrimeWheelResult};
use crate::wheel::model::WheelConfig;
use crate::wheel::registry::DEFAULT_MAX_WHEELS;

/// Candidate bound for a wheel of scale 1.
pub const DEFAULT_BASE_BOUND: u64 = 1400;

/// Engine-wide settings.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Registry capacity. Frozen once the engine has been started.
    #[serde(alias = "maxWheels")]
    pub max_wheels: usize,
    /// Each wheel visits candidates up to `base_bound * scale`.
    #[serde(alias = "baseBound")]
    pub base_bound: u64,
    /// Color the surface is cleared to.
    #[serde(alias = "bgColor")]
    pub background: Color,
    /// Seed for random wheel placement.
    pub seed: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_wheels: DEFAULT_MAX_WHEELS,
            base_bound: DEFAULT_BASE_BOUND,
            background: Color::BLACK,
            seed: 1,
        }
    }
}

impl EngineSettings {
    /// Reject settings no engine can run with.
    pub fn validate(&self) -> PrimeWheelResult<()> {
        if self.base_bound < 2 {
            return Err(PrimeWheelError::validation("base_bound must be >= 2"));
        }
        Ok(())
    }
}

/// Complete scene description consumed by the command-line renderer.
///
/// ```json
/// {
///   "canvas": { "width": 1280, "height": 720 },
///   "fps": 60,
///   "settings": { "max_wheels": 5, "base_bound": 1400, "background": "#000000", "seed": 7 },
///   "wheels": [ { "scale": 2, "speed": 1, "color": "#00AAFF", "random_offset": true } ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Output size.
    pub canvas: Canvas,
    /// Output frame rate (one tick per frame).
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Engine-wide settings.
    #[serde(default)]
    pub settings: EngineSettings,
    /// Wheels, in draw order.
    #[serde(default)]
    pub wheels: Vec<WheelConfig>,
}

fn default_fps() -> u32 {
    60
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1280,
                height: 720,
            },
            fps: default_fps(),
            settings: EngineSettings::default(),
            wheels: vec![WheelConfig {
                scale: 2.0,
                speed: 1,
                ..WheelConfig::default()
            }],
        }
    }
}

impl SceneConfig {
    /// Parse a scene from JSON text and validate it.
    pub fn from_json(text: &str) -> PrimeWheelResult<Self> {
        let scene: Self =
            serde_json::from_str(text).map_err(|e| PrimeWheelError::serde(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> PrimeWheelResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json(&text)
    }

    /// Check the whole scene before any engine is built.
    pub fn validate(&self) -> PrimeWheelResult<()> {
        self.canvas.validate()?;
        if self.fps == 0 {
            return Err(PrimeWheelError::validation("fps must be > 0"));
        }
        self.settings.validate()?;
        if self.wheels.len() > self.settings.max_wheels {
            return Err(PrimeWheelError::validation(format!(
                "scene has {} wheels but max_wheels is {}",
                self.wheels.len(),
                self.settings.max_wheels
            )));
        }
        for (i, w) in self.wheels.iter().enumerate() {
            w.validate()
                .map_err(|e| PrimeWheelError::validation(format!("wheel {i}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
