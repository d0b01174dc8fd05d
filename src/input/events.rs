//! Generic pointer event types for cross-host compatibility.
//!
//! Embedding hosts (native windowing, web views, test drivers) map their
//! native events into these before feeding the canvas. All coordinates are
//! screen-space logical pixels; the canvas owns the document transform.

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button (left mouse button, pen tip, touch contact)
    Primary,
    /// Middle mouse button / wheel press (pan override)
    Middle,
    /// Secondary button (right mouse button, pen barrel)
    Secondary,
}

/// The class of device a pointer event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Desktop mouse; never reports pressure
    Mouse,
    /// Stylus with a pressure curve
    Pen,
    /// Finger contact
    Touch,
}

/// One pointer sample in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Screen X in logical pixels
    pub x: f64,
    /// Screen Y in logical pixels
    pub y: f64,
    /// Contact pressure in `[0, 1]`, or `None` when the device reports none.
    ///
    /// Drawing substitutes the configured default for missing pressure. A
    /// touch contact arriving with no pressure at all is treated as a pan
    /// gesture instead of ink.
    pub pressure: Option<f64>,
    /// Device class the sample came from
    pub kind: PointerKind,
}

impl PointerEvent {
    /// Sample from a mouse, which reports no pressure.
    pub fn mouse(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
            kind: PointerKind::Mouse,
        }
    }

    /// Sample from a stylus with a measured pressure.
    pub fn pen(x: f64, y: f64, pressure: f64) -> Self {
        Self {
            x,
            y,
            pressure: Some(pressure),
            kind: PointerKind::Pen,
        }
    }

    /// Sample from a touch contact; `pressure` is `None` on hardware that
    /// cannot measure it.
    pub fn touch(x: f64, y: f64, pressure: Option<f64>) -> Self {
        Self {
            x,
            y,
            pressure,
            kind: PointerKind::Touch,
        }
    }
}

/// One scroll-wheel step at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    /// Cursor screen X when the wheel turned
    pub x: f64,
    /// Cursor screen Y when the wheel turned
    pub y: f64,
    /// Horizontal wheel delta in logical pixels
    pub delta_x: f64,
    /// Vertical wheel delta in logical pixels (positive = toward the user)
    pub delta_y: f64,
    /// True while the zoom modifier (Ctrl, or a pinch mapped by the host) is
    /// held; switches the wheel from panning to zooming about the cursor.
    pub zoom_modifier: bool,
}
