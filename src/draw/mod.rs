//! Drawing primitives (Cairo-based).
//!
//! This module defines the core ink types used for document annotation:
//! - [`Color`]: RGBA color representation with predefined constants
//! - [`Stroke`] / [`Point`]: pressure-carrying freehand ink
//! - [`Page`]: ordered strokes over an imported background raster
//! - Tool style resolution and Cairo rendering functions

pub mod color;
pub mod page;
pub mod render;
pub mod stroke;
pub mod style;

// Re-export commonly used types at module level
pub use color::Color;
pub use page::{BackgroundError, BackgroundImage, Page};
pub use render::{render_stroke, render_strokes};
pub use stroke::{Point, Stroke, StrokeId};
pub use style::{CompositeMode, ToolStyle, composite_mode, resolve_stroke_style, tool_style};

// Re-export color constants for public API (unused internally but part of public interface)
#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, INDIGO, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
