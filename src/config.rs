//! Configuration for the measurement core and the application window.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::controller::{InteractionController, SessionPolicy};
use crate::data::hotkeys::Hotkeys;
use crate::data::measurement::{DistanceCalculator, RemainderPolicy};
use crate::data::scale::ScaleConfig;
use crate::error::{ConfigError, ConfigResult};
use crate::events::EventController;

// ─────────────────────────────────────────────────────────────────────────────
// MeasureConfig – everything the core needs
// ─────────────────────────────────────────────────────────────────────────────

/// Scale, remainder policy and session policy. Fixed once a controller is built.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MeasureConfig {
    pub scale: ScaleConfig,
    pub remainder: RemainderPolicy,
    pub session: SessionPolicy,
}

impl MeasureConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        self.scale.validate()
    }

    pub fn calculator(&self) -> DistanceCalculator {
        DistanceCalculator::new(self.scale, self.remainder)
    }

    pub fn build_controller(&self) -> InteractionController {
        InteractionController::new(self.calculator(), self.session)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings – the serializable part of the app configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Settings that can be stored in a YAML or JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Native window title.
    pub title: String,
    /// Logical overlay size in surface pixels. Default: `[400, 400]`.
    pub surface_size: [f32; 2],
    pub measure: MeasureConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Virtual Tape Measure".to_string(),
            surface_size: [400.0, 400.0],
            measure: MeasureConfig::default(),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

impl Settings {
    pub fn validate(&self) -> ConfigResult<()> {
        let [w, h] = self.surface_size;
        if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
            return Err(ConfigError::InvalidSurface(format!(
                "surface_size must be positive, got {w}x{h}"
            )));
        }
        self.measure.validate()
    }

    /// Parse settings from YAML text and validate them.
    pub fn from_yaml_str(s: &str) -> ConfigResult<Self> {
        let settings: Settings = serde_yaml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path`; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let settings: Settings = if is_json(path) {
            serde_json::from_str(&text)?
        } else {
            serde_yaml::from_str(&text)?
        };
        settings.validate()?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let text = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            serde_yaml::to_string(self)?
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, text)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// TapeConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Top-level configuration handed to [`run_tape_measure`](crate::run_tape_measure).
#[derive(Clone, Default)]
pub struct TapeConfig {
    pub settings: Settings,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
    /// Hotkeys; `None` loads `~/.tapemeasure/hotkeys.yaml` or the defaults.
    pub hotkeys: Option<Hotkeys>,
    /// Receives session, measurement and camera events.
    pub event_ctrl: Option<EventController>,
}

impl TapeConfig {
    pub fn from_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }
}
