//! Canvas controller: gesture state machine over the layered compositor.
//!
//! [`Canvas`] owns one [`Page`], the viewport transform, the raster layer
//! stack, and the pointer gesture state. Hosts feed it pointer and wheel
//! events, poll `needs_redraw`, call [`Canvas::render`], and present the
//! output surface. Stroke and selection completions come back as
//! [`CanvasEvent`]s from the pointer-up handler.

mod pointer;
mod render;
mod surfaces;
mod wheel;

pub use surfaces::{LayerStack, RenderError};

use crate::config::Config;
use crate::draw::{Color, Page, Stroke};
use crate::geometry::{DocRect, Viewport};
use crate::input::Tool;

/// Marquee border width in screen pixels, independent of zoom.
pub(crate) const MARQUEE_LINE_WIDTH: f64 = 2.0;
/// Dash phase advance per animation tick.
const MARQUEE_PHASE_STEP: f64 = 0.5;
/// Dash phase wraps at this value to keep the float small.
const MARQUEE_PHASE_MAX: f64 = 100.0;

/// Current pointer gesture state machine.
///
/// One gesture runs at a time; presses arriving mid-gesture are ignored.
#[derive(Debug)]
pub enum Gesture {
    /// Not interacting - waiting for a pointer press
    Idle,
    /// Ink tool held down; the stroke accumulates samples until release
    Drawing {
        /// The in-progress stroke, style already resolved
        stroke: Stroke,
    },
    /// Dragging the viewport (middle button or pressureless touch)
    Panning {
        /// Last screen position, for per-move deltas
        last_x: f64,
        last_y: f64,
    },
    /// Dragging out a selection rectangle with the select tool
    Selecting {
        /// Anchor corner in document space
        start_x: f64,
        start_y: f64,
        /// Live normalized rectangle between anchor and cursor
        current: DocRect,
    },
}

/// Completed interactions reported from pointer-up (and selection clears
/// reported from pointer-down).
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// A stroke was finalized onto the page. Reported exactly once per
    /// stroke; the page already holds an identical copy.
    StrokeFinished(Stroke),
    /// The selection changed: `Some` with a new positive-area rectangle,
    /// `None` when a selection was cleared or a drag ended with no area.
    SelectionFinished(Option<DocRect>),
}

/// Resolved marquee styling (from `[selection]` config).
pub(crate) struct MarqueeStyle {
    pub border: Color,
    pub fill: Color,
    pub dash_length: f64,
    pub gap_length: f64,
}

/// Interactive annotation canvas over one document page.
pub struct Canvas {
    /// The page being annotated. Hosts may swap stroke lists and install
    /// backgrounds directly; set `needs_redraw` after doing so.
    pub page: Page,
    /// Document-to-screen transform
    pub viewport: Viewport,
    /// Whether the next host frame should call [`Canvas::render`]
    pub needs_redraw: bool,
    layers: LayerStack,
    gesture: Gesture,
    tool: Tool,
    color: Color,
    selection: Option<DocRect>,
    marquee_phase: f64,
    marquee_style: MarqueeStyle,
    default_pressure: f64,
    wheel_zoom_step: f64,
}

impl Canvas {
    /// Creates a canvas sized to the host container.
    ///
    /// `logical_width`/`logical_height` are the container's logical pixels;
    /// `dpr` is the device pixel ratio backing rasters are multiplied by.
    pub fn new(
        config: &Config,
        logical_width: f64,
        logical_height: f64,
        dpr: f64,
    ) -> Result<Self, RenderError> {
        let border = config.selection.border_color.to_color();
        Ok(Self {
            page: Page::default(),
            viewport: Viewport::new(config.viewport.initial_scale, 0.0, 0.0),
            needs_redraw: true,
            layers: LayerStack::new(logical_width, logical_height, dpr)?,
            gesture: Gesture::Idle,
            tool: config.drawing.default_tool,
            color: config.drawing.default_color.to_color(),
            selection: None,
            marquee_phase: 0.0,
            marquee_style: MarqueeStyle {
                border,
                fill: border.with_alpha(config.selection.fill_opacity),
                dash_length: config.selection.dash_length,
                gap_length: config.selection.gap_length,
            },
            default_pressure: config.drawing.default_pressure,
            wheel_zoom_step: config.viewport.wheel_zoom_step,
        })
    }

    /// Resizes the backing rasters to a new container size.
    ///
    /// Safe mid-gesture: stroke samples live in document space, so an
    /// in-progress stroke survives and the next render re-rasterizes it.
    pub fn resize(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        dpr: f64,
    ) -> Result<(), RenderError> {
        if self.layers.resize(logical_width, logical_height, dpr)? {
            self.needs_redraw = true;
        }
        Ok(())
    }

    /// Centers the page in the container at the given scale.
    pub fn center_page(&mut self, scale: f64) {
        self.viewport = Viewport::centered(
            self.layers.logical_width(),
            self.layers.logical_height(),
            self.page.width(),
            self.page.height(),
            scale,
        );
        self.needs_redraw = true;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switches the active tool.
    ///
    /// Leaving the select tool drops any selection; an unfinished selection
    /// drag is cancelled outright. An in-progress stroke is unaffected since
    /// it already carries its own tool.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }
        self.tool = tool;
        if tool != Tool::Select {
            if self.selection.take().is_some() {
                self.needs_redraw = true;
            }
            if matches!(self.gesture, Gesture::Selecting { .. }) {
                self.gesture = Gesture::Idle;
                self.needs_redraw = true;
            }
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the color used by the next stroke. Finalized and in-progress
    /// strokes keep the color they started with.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// The committed selection rectangle, if any.
    pub fn selection(&self) -> Option<DocRect> {
        self.selection
    }

    /// Drops the current selection (hosts call this after consuming one).
    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.needs_redraw = true;
        }
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// The composited frame to present.
    pub fn output(&self) -> &cairo::ImageSurface {
        self.layers.output()
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// True while the animated marquee is on screen: select tool active and
    /// either a committed selection or a live selection drag.
    pub fn marquee_visible(&self) -> bool {
        self.active_marquee_rect().is_some()
    }

    /// Advances the marching-ants dash phase one tick.
    ///
    /// Hosts drive this from their frame timer only while
    /// [`Canvas::marquee_visible`] returns true; nothing else in the canvas
    /// needs periodic wakeups.
    pub fn advance_marquee(&mut self) {
        if !self.marquee_visible() {
            return;
        }
        self.marquee_phase = (self.marquee_phase + MARQUEE_PHASE_STEP) % MARQUEE_PHASE_MAX;
        self.needs_redraw = true;
    }

    /// The rectangle the marquee should show right now: the live drag rect
    /// while selecting, otherwise the committed selection. `None` whenever
    /// the select tool is not active.
    pub(crate) fn active_marquee_rect(&self) -> Option<DocRect> {
        if self.tool != Tool::Select {
            return None;
        }
        if let Gesture::Selecting { current, .. } = &self.gesture {
            return Some(*current);
        }
        self.selection
    }
}
