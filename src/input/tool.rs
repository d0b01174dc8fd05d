//! Drawing tool selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool decides how a pointer drag is interpreted: every tool but
/// [`Tool::Select`] produces ink, while `Select` drags out a region rectangle.
/// The tool also fixes the compositing rule a stroke keeps for its lifetime.
///
/// Serialized names use snake_case (`pen_fine`, `pen_gel`), which is the
/// vocabulary session files and configs share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Soft graphite look, thin and slightly transparent
    Pencil,
    /// Default ballpoint pen
    Pen,
    /// Fine technical pen
    PenFine,
    /// Heavier gel pen
    PenGel,
    /// Broad felt marker
    Marker,
    /// Wide translucent highlighter, multiply-composited over earlier ink
    Highlighter,
    /// Removes ink only; the background raster is untouchable
    Eraser,
    /// Region selection marquee
    Select,
}

impl Tool {
    /// True for tools that leave marks on the ink layer (all but `Select`).
    pub fn draws(self) -> bool {
        !matches!(self, Tool::Select)
    }
}
