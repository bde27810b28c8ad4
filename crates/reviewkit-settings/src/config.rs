//! Configuration and settings management for ReviewKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - Viewport tunables (wheel sensitivity, zoom limits)
//! - Gesture thresholds (discard rules, default stroke colour)
//! - Keyboard shortcuts (key name to action name)
//! - Assist fallback strings

use reviewkit_core::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Every action a shortcut may be bound to.
pub const SHORTCUT_ACTIONS: &[&str] = &[
    "temporary_hand",
    "hand",
    "pointer",
    "pen",
    "box",
    "zoom_in",
    "zoom_out",
    "cancel_gesture",
];

/// Viewport transform tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Wheel sensitivity `k` in `zoom * (1 - delta * k)`
    pub zoom_sensitivity: f64,
    /// Lower zoom bound
    pub min_zoom: f64,
    /// Upper zoom bound
    pub max_zoom: f64,
    /// Multiplicative step used by the keyboard zoom shortcuts
    pub keyboard_zoom_step: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_sensitivity: 0.001,
            min_zoom: 0.1,
            max_zoom: 5.0,
            keyboard_zoom_step: 1.2,
        }
    }
}

/// Gesture classification thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureSettings {
    /// Boxes whose width and height are both below this are discarded
    pub box_min_extent: f64,
    /// Pen strokes with fewer points are discarded
    pub pen_min_points: usize,
    /// Annotation drags shorter than this (normalized units) commit nothing
    pub drag_min_distance: f64,
    /// Stroke colour for new drawings
    pub default_color: String,
    /// Clamp pen points into the content box while capturing
    pub clamp_pen_points: bool,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            box_min_extent: 1.0,
            pen_min_points: 2,
            drag_min_distance: 0.0,
            default_color: "#ef4444".to_string(),
            clamp_pen_points: false,
        }
    }
}

/// Keyboard shortcut map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutSettings {
    /// Key name (lowercase, `space`, `escape`) to action name
    pub bindings: BTreeMap<String, String>,
}

impl Default for ShortcutSettings {
    fn default() -> Self {
        let bindings = [
            ("space", "temporary_hand"),
            ("h", "hand"),
            ("v", "pointer"),
            ("p", "pen"),
            ("i", "zoom_in"),
            ("o", "zoom_out"),
            ("escape", "cancel_gesture"),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a.to_string()))
        .collect();

        Self { bindings }
    }
}

/// Strings shown when the assist collaborator fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistSettings {
    /// Fallback for comment summaries
    pub summary_fallback: String,
    /// Fallback for reply suggestions
    pub suggestion_fallback: String,
    /// Fallback for status reports
    pub report_fallback: String,
}

impl Default for AssistSettings {
    fn default() -> Self {
        Self {
            summary_fallback: "Could not generate a summary right now.".to_string(),
            suggestion_fallback: "Could not suggest a reply right now.".to_string(),
            report_fallback: "Could not generate a status report right now.".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Viewport tunables
    pub viewport: ViewportSettings,
    /// Gesture thresholds
    pub gestures: GestureSettings,
    /// Keyboard shortcuts
    pub shortcuts: ShortcutSettings,
    /// Assist fallback strings
    pub assist: AssistSettings,
}

fn invalid(setting: &str, reason: impl Into<String>) -> Error {
    ConfigError::InvalidSetting {
        setting: setting.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn parse_error(reason: impl std::fmt::Display) -> Error {
    ConfigError::Parse {
        reason: reason.to_string(),
    }
    .into()
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.display().to_string(),
        }
        .into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config_dir>/reviewkit/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("reviewkit").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content).map_err(parse_error)?,
            Format::Toml => toml::from_str(&content).map_err(parse_error)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self).map_err(parse_error)?,
            Format::Toml => toml::to_string_pretty(self).map_err(parse_error)?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let vp = &self.viewport;
        if !(vp.zoom_sensitivity.is_finite() && vp.zoom_sensitivity > 0.0) {
            return Err(invalid("viewport.zoom_sensitivity", "must be > 0"));
        }
        if !(vp.min_zoom.is_finite() && vp.min_zoom > 0.0) {
            return Err(invalid("viewport.min_zoom", "must be > 0"));
        }
        if !(vp.max_zoom.is_finite() && vp.max_zoom > vp.min_zoom) {
            return Err(invalid("viewport.max_zoom", "must be greater than min_zoom"));
        }
        if !(vp.keyboard_zoom_step.is_finite() && vp.keyboard_zoom_step > 1.0) {
            return Err(invalid("viewport.keyboard_zoom_step", "must be > 1"));
        }

        let g = &self.gestures;
        if !(g.box_min_extent.is_finite() && g.box_min_extent >= 0.0) {
            return Err(invalid("gestures.box_min_extent", "must be >= 0"));
        }
        if g.pen_min_points < 2 {
            return Err(invalid("gestures.pen_min_points", "a stroke needs at least 2 points"));
        }
        if !(g.drag_min_distance.is_finite() && g.drag_min_distance >= 0.0) {
            return Err(invalid("gestures.drag_min_distance", "must be >= 0"));
        }
        if !is_hex_color(&g.default_color) {
            return Err(invalid(
                "gestures.default_color",
                format!("'{}' is not #RRGGBB or #RRGGBBAA", g.default_color),
            ));
        }

        for (key, action) in &self.shortcuts.bindings {
            if !SHORTCUT_ACTIONS.contains(&action.as_str()) {
                return Err(ConfigError::UnknownAction {
                    key: key.clone(),
                    action: action.clone(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// `#RRGGBB` or `#RRGGBBAA`.
pub fn is_hex_color(color: &str) -> bool {
    (color.len() == 7 || color.len() == 9)
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}
