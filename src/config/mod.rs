//! Configuration file support for docscriber.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/docscriber/config.toml`. Settings include drawing defaults,
//! viewport behavior, selection marquee styling, capture quality, and session persistence.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, SessionCompression, SessionStorageMode};
pub use types::{CaptureConfig, DrawingConfig, SelectionConfig, SessionConfig, ViewportConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::capture::{MAX_CAPTURE_SCALE, MIN_CAPTURE_SCALE};
use crate::geometry::{MAX_SCALE, MIN_SCALE};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "pen"
/// default_color = "black"
///
/// [viewport]
/// initial_scale = 1.0
/// wheel_zoom_step = 0.002
///
/// [selection]
/// border_color = "#4f46e5"
/// fill_opacity = 0.05
///
/// [capture]
/// scale = 3.0
///
/// [session]
/// persist_strokes = true
/// compress = "auto"
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (tool, color, fallback pressure)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Viewport zoom and pan behavior
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Selection marquee appearance
    #[serde(default)]
    pub selection: SelectionConfig,

    /// Region capture quality and save location
    #[serde(default)]
    pub capture: CaptureConfig,

    /// Session persistence behavior
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause undefined behavior
    /// or rendering issues. Invalid values are clamped to the nearest valid value and a
    /// warning is logged.
    ///
    /// Validated ranges:
    /// - `drawing.default_pressure`: 0.05 - 1.0
    /// - `viewport.initial_scale`: 0.1 - 10.0
    /// - `viewport.wheel_zoom_step`: 0.0001 - 0.05
    /// - `selection.fill_opacity`: 0.0 - 1.0
    /// - `selection.dash_length` / `gap_length`: 0.5 - 100.0
    /// - `capture.scale`: 2.0 - 3.0
    fn validate_and_clamp(&mut self) {
        // Fallback pressure: 0.05 - 1.0
        if !(0.05..=1.0).contains(&self.drawing.default_pressure) {
            warn!(
                "Invalid default_pressure {:.3}, clamping to 0.05-1.0 range",
                self.drawing.default_pressure
            );
            self.drawing.default_pressure = self.drawing.default_pressure.clamp(0.05, 1.0);
        }

        // Initial zoom: 0.1 - 10.0
        if !(MIN_SCALE..=MAX_SCALE).contains(&self.viewport.initial_scale) {
            warn!(
                "Invalid initial_scale {:.2}, clamping to {:.1}-{:.1} range",
                self.viewport.initial_scale, MIN_SCALE, MAX_SCALE
            );
            self.viewport.initial_scale = self.viewport.initial_scale.clamp(MIN_SCALE, MAX_SCALE);
        }

        // Wheel zoom step: 0.0001 - 0.05
        if !(0.0001..=0.05).contains(&self.viewport.wheel_zoom_step) {
            warn!(
                "Invalid wheel_zoom_step {:.5}, clamping to 0.0001-0.05 range",
                self.viewport.wheel_zoom_step
            );
            self.viewport.wheel_zoom_step = self.viewport.wheel_zoom_step.clamp(0.0001, 0.05);
        }

        // Marquee fill opacity: 0.0 - 1.0
        if !(0.0..=1.0).contains(&self.selection.fill_opacity) {
            warn!(
                "Invalid fill_opacity {:.2}, clamping to 0.0-1.0 range",
                self.selection.fill_opacity
            );
            self.selection.fill_opacity = self.selection.fill_opacity.clamp(0.0, 1.0);
        }

        // Marquee dash pattern: 0.5 - 100.0
        if !(0.5..=100.0).contains(&self.selection.dash_length) {
            warn!(
                "Invalid dash_length {:.1}, clamping to 0.5-100.0 range",
                self.selection.dash_length
            );
            self.selection.dash_length = self.selection.dash_length.clamp(0.5, 100.0);
        }
        if !(0.5..=100.0).contains(&self.selection.gap_length) {
            warn!(
                "Invalid gap_length {:.1}, clamping to 0.5-100.0 range",
                self.selection.gap_length
            );
            self.selection.gap_length = self.selection.gap_length.clamp(0.5, 100.0);
        }

        // Capture supersampling: 2.0 - 3.0
        if !(MIN_CAPTURE_SCALE..=MAX_CAPTURE_SCALE).contains(&self.capture.scale) {
            warn!(
                "Invalid capture scale {:.1}, clamping to {:.1}-{:.1} range",
                self.capture.scale, MIN_CAPTURE_SCALE, MAX_CAPTURE_SCALE
            );
            self.capture.scale = self.capture.scale.clamp(MIN_CAPTURE_SCALE, MAX_CAPTURE_SCALE);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/docscriber/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("docscriber");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at `~/.config/docscriber/config.toml`.
    /// If the file doesn't exist, returns a Config with default values. All loaded values
    /// are validated and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error here: the caller
    /// asked for this file specifically.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to file.
    ///
    /// Serializes the config to TOML format and writes it to `~/.config/docscriber/config.toml`.
    /// Creates the parent directory if it doesn't exist. This method is kept for future use
    /// (e.g., runtime config editing).
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory cannot be created
    /// - The config cannot be serialized to TOML
    /// - The file cannot be written
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        // Create directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Returns the JSON schema describing the full configuration surface.
    ///
    /// Used by the `dump_config_schema` binary so external tooling can
    /// validate and auto-complete config files.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
