//! Stroke data model: pressure-carrying points and finalized ink strokes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::input::Tool;

/// One sampled pointer position in document space.
///
/// `pressure` is the value the stroke was captured with, after the default
/// has been substituted for devices that report none. Stored per point so a
/// future pressure-varying renderer can use it; the current renderer resolves
/// width once per stroke.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub pressure: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, pressure: f64) -> Self {
        Self { x, y, pressure }
    }
}

static NEXT_STROKE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique stroke identifier.
///
/// Minted from a monotonic counter; loading a stored session advances the
/// counter past every persisted id so later strokes never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrokeId(pub u64);

impl StrokeId {
    /// Mints the next unused id.
    pub fn next() -> Self {
        Self(NEXT_STROKE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Moves the mint counter past `id` if it is not already.
    pub fn advance_past(id: StrokeId) {
        NEXT_STROKE_ID.fetch_max(id.0 + 1, Ordering::Relaxed);
    }
}

/// A single ink stroke.
///
/// Width and opacity are resolved once when the stroke starts (from tool,
/// initial pressure, and the zoom at that moment) and never change afterward,
/// so zooming or re-rendering cannot alter finalized ink. Points accumulate
/// while the stroke is active and are immutable once it lands on a page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    pub tool: Tool,
    pub color: Color,
    /// Resolved line width in document units
    pub width: f64,
    /// Resolved paint alpha in `[0, 1]`
    pub opacity: f64,
    /// Document-space samples in capture order; never empty once finalized
    pub points: Vec<Point>,
}

impl Stroke {
    /// Starts a stroke at its first sample with already-resolved style.
    pub fn start(tool: Tool, color: Color, width: f64, opacity: f64, first: Point) -> Self {
        Self {
            id: StrokeId::next(),
            tool,
            color,
            width,
            opacity,
            points: vec![first],
        }
    }

    /// Appends a sample. Input points are kept raw; no smoothing or
    /// decimation happens before rendering.
    pub fn push_point(&mut self, point: Point) {
        self.points.push(point);
    }
}
