//! Configuration type definitions.

use super::enums::{ColorSpec, SessionCompression, SessionStorageMode};
use crate::input::Tool;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool and ink defaults when a canvas first opens. Hosts can
/// change tool and color at runtime through the canvas API.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Tool selected when a canvas is created
    /// (pencil, pen, pen_fine, pen_gel, marker, highlighter, eraser, select)
    #[serde(default = "default_tool")]
    pub default_tool: Tool,

    /// Default ink color - a named color (red, green, blue, yellow, orange,
    /// pink, indigo, white, black), a `#rrggbb` hex string, or an RGB array
    /// like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Pressure substituted for devices that report none, such as mice
    /// (valid range: 0.05 - 1.0)
    #[serde(default = "default_pressure")]
    pub default_pressure: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            default_color: default_color(),
            default_pressure: default_pressure(),
        }
    }
}

/// Viewport behavior settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Zoom level when a canvas is created (valid range: 0.1 - 10.0)
    #[serde(default = "default_initial_scale")]
    pub initial_scale: f64,

    /// Zoom speed per wheel delta unit when the zoom modifier is held
    /// (valid range: 0.0001 - 0.05)
    #[serde(default = "default_wheel_zoom_step")]
    pub wheel_zoom_step: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            initial_scale: default_initial_scale(),
            wheel_zoom_step: default_wheel_zoom_step(),
        }
    }
}

/// Selection marquee appearance.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SelectionConfig {
    /// Marquee border color
    #[serde(default = "default_border_color")]
    pub border_color: ColorSpec,

    /// Opacity of the marquee interior fill (valid range: 0.0 - 1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,

    /// Length of each marquee dash in document units
    #[serde(default = "default_dash_length")]
    pub dash_length: f64,

    /// Gap between marquee dashes in document units
    #[serde(default = "default_gap_length")]
    pub gap_length: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            border_color: default_border_color(),
            fill_opacity: default_fill_opacity(),
            dash_length: default_dash_length(),
            gap_length: default_gap_length(),
        }
    }
}

/// Region capture settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CaptureConfig {
    /// Supersampling factor for captured regions (valid range: 2.0 - 3.0)
    #[serde(default = "default_capture_scale")]
    pub scale: f64,

    /// Directory captures are saved to when no explicit path is given
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Capture filename template (supports chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format extension
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            scale: default_capture_scale(),
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// Session persistence settings.
///
/// Controls where annotation sessions are written, when they are compressed,
/// and how much state is restored on startup.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// Persist page strokes across runs
    #[serde(default = "default_persist_strokes")]
    pub persist_strokes: bool,

    /// Restore tool, color, and viewport alongside strokes
    #[serde(default = "default_restore_tool_state")]
    pub restore_tool_state: bool,

    /// Where session files are stored (auto, config, custom)
    #[serde(default = "default_storage_mode")]
    pub storage: SessionStorageMode,

    /// Directory used when `storage = "custom"` (supports `~/`)
    #[serde(default)]
    pub custom_directory: Option<String>,

    /// Upper bound on strokes restored per page
    #[serde(default = "default_max_strokes_per_page")]
    pub max_strokes_per_page: usize,

    /// Refuse to write or read session files larger than this many megabytes
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Gzip compression preference (auto, on, off)
    #[serde(default = "default_compression")]
    pub compress: SessionCompression,

    /// Payload size in kilobytes above which `auto` compression kicks in
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Number of `.bak` rotations kept when overwriting a session (0 or 1)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist_strokes: default_persist_strokes(),
            restore_tool_state: default_restore_tool_state(),
            storage: default_storage_mode(),
            custom_directory: None,
            max_strokes_per_page: default_max_strokes_per_page(),
            max_file_size_mb: default_max_file_size_mb(),
            compress: default_compression(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            backup_retention: default_backup_retention(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_tool() -> Tool {
    Tool::Pen
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_pressure() -> f64 {
    0.5
}

fn default_initial_scale() -> f64 {
    1.0
}

fn default_wheel_zoom_step() -> f64 {
    0.002
}

fn default_border_color() -> ColorSpec {
    ColorSpec::Name("indigo".to_string())
}

fn default_fill_opacity() -> f64 {
    0.05
}

fn default_dash_length() -> f64 {
    5.0
}

fn default_gap_length() -> f64 {
    5.0
}

fn default_capture_scale() -> f64 {
    3.0
}

fn default_save_directory() -> String {
    "~/Pictures/Docscriber".to_string()
}

fn default_filename_template() -> String {
    "capture_%Y-%m-%d_%H%M%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}

fn default_persist_strokes() -> bool {
    true
}

fn default_restore_tool_state() -> bool {
    true
}

fn default_storage_mode() -> SessionStorageMode {
    SessionStorageMode::Auto
}

fn default_max_strokes_per_page() -> usize {
    10_000
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_compression() -> SessionCompression {
    SessionCompression::Auto
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_backup_retention() -> usize {
    1
}
