//! Wheel handling: zoom about the cursor, or pan.
//!
//! The wheel works independently of the pointer gesture machine, so the view
//! can move even while a stroke or selection drag is in flight.

use log::debug;

use super::Canvas;
use crate::input::WheelEvent;

impl Canvas {
    /// Processes one wheel step.
    ///
    /// With the zoom modifier held the vertical delta scales the viewport
    /// multiplicatively about the cursor position, clamped to the scale
    /// bounds. Without it the deltas pan the view (scrolling down moves the
    /// content up, matching scroll convention).
    pub fn on_wheel(&mut self, event: WheelEvent) {
        let before = self.viewport;

        if event.zoom_modifier {
            // Guard against hosts delivering huge deltas in one step.
            let factor = (1.0 - event.delta_y * self.wheel_zoom_step).max(0.01);
            let target = self.viewport.scale * factor;
            self.viewport.zoom_at(event.x, event.y, target);
            debug!(
                "Wheel zoom: factor {:.4} -> scale {:.3}",
                factor, self.viewport.scale
            );
        } else {
            self.viewport.pan(-event.delta_x, -event.delta_y);
        }

        if self.viewport != before {
            self.needs_redraw = true;
        }
    }
}
