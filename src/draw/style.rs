//! Per-tool stroke styling: base widths, opacities, compositing modes, and
//! the width resolution applied once at stroke start.

use cairo::Operator;

use crate::input::Tool;

/// Pressure multiplier applied to a tool's base width.
const PRESSURE_GAIN: f64 = 1.5;
/// Zoom level above which stroke width starts attenuating.
const WIDTH_ATTENUATION_START: f64 = 1.5;
/// Attenuation exponent applied past [`WIDTH_ATTENUATION_START`].
const WIDTH_ATTENUATION_EXPONENT: f64 = 0.25;

/// Eraser diameter in screen pixels at the zoom where the erase happens.
///
/// Divided by the stroke-start scale to get the document-space width, so the
/// eraser feels the same size regardless of zoom.
pub const ERASER_BASE_WIDTH: f64 = 36.0;

/// How a tool's ink combines with what is already on the ink layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Source-over: paints on top
    Normal,
    /// Multiply blend: overlapping ink darkens, highlighter-style
    Multiply,
    /// Subtractive: removes earlier ink, leaves the surface transparent
    Erase,
}

impl CompositeMode {
    /// The cairo operator implementing this mode.
    pub fn operator(self) -> Operator {
        match self {
            CompositeMode::Normal => Operator::Over,
            CompositeMode::Multiply => Operator::Multiply,
            CompositeMode::Erase => Operator::DestOut,
        }
    }
}

/// Compositing mode for a tool's strokes.
///
/// Only the highlighter and eraser deviate from plain source-over. `Select`
/// never produces a stroke, so its `Normal` here is inert.
pub const fn composite_mode(tool: Tool) -> CompositeMode {
    match tool {
        Tool::Highlighter => CompositeMode::Multiply,
        Tool::Eraser => CompositeMode::Erase,
        _ => CompositeMode::Normal,
    }
}

/// Static base style for an ink tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolStyle {
    /// Line width in document units before pressure/zoom adjustment
    pub base_width: f64,
    /// Paint alpha in `[0, 1]`
    pub opacity: f64,
}

/// The base width/opacity table for ink tools.
///
/// Returns `None` for tools that draw nothing (`Select`). The eraser's entry
/// is its fixed screen-space diameter; [`resolve_stroke_style`] applies the
/// different width rule it uses.
pub const fn tool_style(tool: Tool) -> Option<ToolStyle> {
    let style = match tool {
        Tool::Pencil => ToolStyle {
            base_width: 1.2,
            opacity: 0.7,
        },
        Tool::Pen => ToolStyle {
            base_width: 2.5,
            opacity: 1.0,
        },
        Tool::PenFine => ToolStyle {
            base_width: 1.0,
            opacity: 1.0,
        },
        Tool::PenGel => ToolStyle {
            base_width: 3.5,
            opacity: 1.0,
        },
        Tool::Marker => ToolStyle {
            base_width: 8.0,
            opacity: 1.0,
        },
        Tool::Highlighter => ToolStyle {
            base_width: 24.0,
            opacity: 0.4,
        },
        Tool::Eraser => ToolStyle {
            base_width: ERASER_BASE_WIDTH,
            opacity: 1.0,
        },
        Tool::Select => return None,
    };
    Some(style)
}

/// Pressure- and zoom-adjusted width for a normal ink tool.
///
/// Width grows linearly with pressure and attenuates gently past 1.5x zoom
/// so deep zooms do not turn every pen into a marker.
pub fn resolve_width(base_width: f64, pressure: f64, scale: f64) -> f64 {
    let attenuation = if scale > WIDTH_ATTENUATION_START {
        scale.powf(WIDTH_ATTENUATION_EXPONENT)
    } else {
        1.0
    };
    base_width * (pressure * PRESSURE_GAIN) / attenuation
}

/// Resolves the `(width, opacity)` a new stroke is created with.
///
/// Returns `None` for `Select`. The result is computed exactly once, at
/// stroke start, and the stroke keeps it forever; the eraser ignores
/// pressure and instead fixes its apparent size against the current zoom.
pub fn resolve_stroke_style(tool: Tool, pressure: f64, scale: f64) -> Option<(f64, f64)> {
    let style = tool_style(tool)?;
    if tool == Tool::Eraser {
        return Some((style.base_width / scale, style.opacity));
    }
    Some((resolve_width(style.base_width, pressure, scale), style.opacity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_at_half_pressure_resolves_to_1_875() {
        let (width, opacity) = resolve_stroke_style(Tool::Pen, 0.5, 1.0).unwrap();
        assert!((width - 1.875).abs() < 1e-12);
        assert_eq!(opacity, 1.0);
    }

    #[test]
    fn width_attenuates_only_past_threshold() {
        let at_one = resolve_width(2.5, 1.0, 1.0);
        let at_threshold = resolve_width(2.5, 1.0, 1.5);
        assert_eq!(at_one, at_threshold);

        let zoomed = resolve_width(2.5, 1.0, 2.0);
        assert!(zoomed < at_one);
        assert!((zoomed - 2.5 * 1.5 / 2.0_f64.powf(0.25)).abs() < 1e-12);
    }

    #[test]
    fn eraser_width_is_inverse_to_scale_and_ignores_pressure() {
        let (at_1x, _) = resolve_stroke_style(Tool::Eraser, 0.3, 1.0).unwrap();
        let (at_2x, _) = resolve_stroke_style(Tool::Eraser, 0.9, 2.0).unwrap();
        assert_eq!(at_1x, ERASER_BASE_WIDTH);
        assert_eq!(at_2x, ERASER_BASE_WIDTH / 2.0);
    }

    #[test]
    fn select_has_no_stroke_style() {
        assert!(resolve_stroke_style(Tool::Select, 0.5, 1.0).is_none());
    }

    #[test]
    fn composite_modes_follow_the_tool() {
        assert_eq!(composite_mode(Tool::Highlighter), CompositeMode::Multiply);
        assert_eq!(composite_mode(Tool::Eraser), CompositeMode::Erase);
        assert_eq!(composite_mode(Tool::Marker), CompositeMode::Normal);
        assert_eq!(CompositeMode::Erase.operator(), Operator::DestOut);
    }

    #[test]
    fn highlighter_is_wide_and_translucent() {
        let style = tool_style(Tool::Highlighter).unwrap();
        assert_eq!(style.base_width, 24.0);
        assert_eq!(style.opacity, 0.4);
    }
}
