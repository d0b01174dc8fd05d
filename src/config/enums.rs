//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - either a color name / hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "black"
///
/// # Hex color (3, 6, or 8 digit forms)
/// default_color = "#4f46e5"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, pink, indigo, white,
    /// black) or a `#rrggbb` hex string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Strings starting with `#` parse as hex, anything else as a color name.
    /// Unknown names and malformed hex default to red with a warning. RGB
    /// arrays are converted from 0-255 range to 0.0-1.0 range with full
    /// opacity.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => {
                let parsed = if name.starts_with('#') {
                    Color::from_hex(name)
                } else {
                    Color::from_name(name)
                };
                parsed.unwrap_or_else(|| {
                    warn!("Unknown color '{}', using red", name);
                    RED
                })
            }
            ColorSpec::Rgb([r, g, b]) => Color {
                r: *r as f64 / 255.0,
                g: *g as f64 / 255.0,
                b: *b as f64 / 255.0,
                a: 1.0,
            },
        }
    }
}

/// Where session files are stored.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStorageMode {
    /// Platform data directory (e.g. `~/.local/share/docscriber`)
    Auto,
    /// Next to the configuration file
    Config,
    /// An explicit directory from `session.custom_directory`
    Custom,
}

/// Compression preference for session files.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SessionCompression {
    /// Compress when the payload exceeds the auto threshold
    Auto,
    /// Always gzip
    On,
    /// Always plain JSON
    Off,
}
