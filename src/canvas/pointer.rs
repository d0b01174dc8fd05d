//! Pointer press/move/release handling for the canvas gesture machine.

use log::debug;

use super::{Canvas, CanvasEvent, Gesture};
use crate::draw::{Point, Stroke, resolve_stroke_style};
use crate::geometry::DocRect;
use crate::input::{PointerButton, PointerEvent, PointerKind, Tool};

/// Pressure to draw with, after substituting the configured default.
///
/// Devices that report nothing, and touch hardware that reports a flat zero,
/// both fall back to the default.
fn effective_pressure(reported: Option<f64>, default: f64) -> f64 {
    match reported {
        Some(p) if p > 0.0 => p.min(1.0),
        _ => default,
    }
}

/// True for contacts that pan regardless of the active tool.
fn pan_override(button: PointerButton, event: &PointerEvent) -> bool {
    button == PointerButton::Middle
        || (event.kind == PointerKind::Touch && event.pressure.unwrap_or(0.0) == 0.0)
}

impl Canvas {
    /// Processes a pointer button press.
    ///
    /// # Behavior
    /// - Presses arriving mid-gesture are ignored; one gesture runs at a time
    /// - Middle button, or a touch contact with no pressure, starts a pan
    ///   regardless of the active tool
    /// - Primary press with an ink tool starts a stroke with style resolved
    ///   from tool, pressure, and the current zoom
    /// - Primary press with the select tool clears any prior selection
    ///   (reported as `SelectionFinished(None)`) and starts a new drag
    /// - Secondary presses while idle are ignored entirely
    pub fn on_pointer_down(
        &mut self,
        button: PointerButton,
        event: PointerEvent,
    ) -> Option<CanvasEvent> {
        if !matches!(self.gesture, Gesture::Idle) {
            return None;
        }

        if pan_override(button, &event) {
            self.gesture = Gesture::Panning {
                last_x: event.x,
                last_y: event.y,
            };
            return None;
        }

        if button != PointerButton::Primary {
            return None;
        }

        let (doc_x, doc_y) = self.viewport.to_document(event.x, event.y);

        if self.tool == Tool::Select {
            self.selection = None;
            self.gesture = Gesture::Selecting {
                start_x: doc_x,
                start_y: doc_y,
                current: DocRect::from_corners(doc_x, doc_y, doc_x, doc_y),
            };
            self.needs_redraw = true;
            // The old selection is void the moment a new drag starts.
            return Some(CanvasEvent::SelectionFinished(None));
        }

        let pressure = effective_pressure(event.pressure, self.default_pressure);
        let Some((width, opacity)) = resolve_stroke_style(self.tool, pressure, self.viewport.scale)
        else {
            return None;
        };

        let stroke = Stroke::start(
            self.tool,
            self.color,
            width,
            opacity,
            Point::new(doc_x, doc_y, pressure),
        );
        debug!(
            "Stroke {} started: {:?} width {:.2} at ({:.1}, {:.1})",
            stroke.id.0, self.tool, width, doc_x, doc_y
        );
        self.gesture = Gesture::Drawing { stroke };
        self.needs_redraw = true;
        None
    }

    /// Processes pointer motion.
    ///
    /// Drawing appends the raw sample (no filtering or decimation), selecting
    /// recomputes the normalized drag rectangle, panning translates the
    /// viewport by the screen-space delta. Motion while idle is ignored.
    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Drawing { stroke } => {
                let (x, y) = self.viewport.to_document(event.x, event.y);
                let pressure = effective_pressure(event.pressure, self.default_pressure);
                stroke.push_point(Point::new(x, y, pressure));
                self.needs_redraw = true;
            }
            Gesture::Panning { last_x, last_y } => {
                let dx = event.x - *last_x;
                let dy = event.y - *last_y;
                *last_x = event.x;
                *last_y = event.y;
                self.viewport.pan(dx, dy);
                self.needs_redraw = true;
            }
            Gesture::Selecting {
                start_x,
                start_y,
                current,
            } => {
                let (x, y) = self.viewport.to_document(event.x, event.y);
                *current = DocRect::from_corners(*start_x, *start_y, x, y);
                self.needs_redraw = true;
            }
        }
    }

    /// Processes a pointer button release.
    ///
    /// # Behavior
    /// - Releasing a stroke finalizes it onto the page and reports
    ///   `StrokeFinished` exactly once; the release position itself adds no
    ///   sample (the last motion already did)
    /// - Releasing a selection drag reports `SelectionFinished(Some(rect))`
    ///   for a positive-area rectangle, `SelectionFinished(None)` otherwise
    /// - Releasing a pan just returns to idle
    /// - Only the primary button can finish drawing or selecting; other
    ///   releases mid-gesture are ignored
    pub fn on_pointer_up(
        &mut self,
        button: PointerButton,
        event: PointerEvent,
    ) -> Option<CanvasEvent> {
        let _ = event;

        match &self.gesture {
            Gesture::Drawing { .. } | Gesture::Selecting { .. }
                if button != PointerButton::Primary =>
            {
                return None;
            }
            _ => {}
        }

        match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle | Gesture::Panning { .. } => None,
            Gesture::Drawing { stroke } => {
                debug!(
                    "Stroke {} finished with {} points",
                    stroke.id.0,
                    stroke.points.len()
                );
                self.page.push_stroke(stroke.clone());
                self.needs_redraw = true;
                Some(CanvasEvent::StrokeFinished(stroke))
            }
            Gesture::Selecting { current, .. } => {
                self.needs_redraw = true;
                let finished = current.non_empty();
                self.selection = finished;
                debug!("Selection finished: {:?}", finished);
                Some(CanvasEvent::SelectionFinished(finished))
            }
        }
    }
}
