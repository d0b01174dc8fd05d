//! Viewport transform and document-space geometry.
//!
//! The document lives in its own logical coordinate space; the viewport maps
//! it onto the screen with a uniform scale plus a translation:
//! `screen = doc * scale + offset`. Device pixel ratio is applied separately
//! at the raster level and never leaks into these coordinates.

use serde::{Deserialize, Serialize};

/// Minimum viewport zoom factor.
pub const MIN_SCALE: f64 = 0.1;
/// Maximum viewport zoom factor.
pub const MAX_SCALE: f64 = 10.0;

/// Uniform scale + translation mapping document space to screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// Creates a viewport with the given scale (clamped) and offset.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale: scale.clamp(MIN_SCALE, MAX_SCALE),
            offset_x,
            offset_y,
        }
    }

    /// Creates a viewport that centers a page inside a container.
    ///
    /// A page larger than the container ends up with a negative offset so its
    /// center still lands on the container's center.
    pub fn centered(
        container_width: f64,
        container_height: f64,
        page_width: f64,
        page_height: f64,
        scale: f64,
    ) -> Self {
        let scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        Self {
            scale,
            offset_x: (container_width - page_width * scale) / 2.0,
            offset_y: (container_height - page_height * scale) / 2.0,
        }
    }

    /// Maps a screen point to document space.
    pub fn to_document(&self, screen_x: f64, screen_y: f64) -> (f64, f64) {
        (
            (screen_x - self.offset_x) / self.scale,
            (screen_y - self.offset_y) / self.scale,
        )
    }

    /// Maps a document point to screen space.
    pub fn to_screen(&self, doc_x: f64, doc_y: f64) -> (f64, f64) {
        (
            doc_x * self.scale + self.offset_x,
            doc_y * self.scale + self.offset_y,
        )
    }

    /// Rescales around a screen-space anchor point.
    ///
    /// The document point currently under the anchor stays under it after the
    /// zoom. The new scale is clamped to `[MIN_SCALE, MAX_SCALE]`; a request
    /// outside that range degrades to the boundary instead of failing.
    pub fn zoom_at(&mut self, anchor_x: f64, anchor_y: f64, new_scale: f64) {
        let new_scale = new_scale.clamp(MIN_SCALE, MAX_SCALE);
        let (doc_x, doc_y) = self.to_document(anchor_x, anchor_y);
        self.scale = new_scale;
        self.offset_x = anchor_x - doc_x * new_scale;
        self.offset_y = anchor_y - doc_y * new_scale;
    }

    /// Translates the viewport by a screen-space delta. Scale is untouched.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }
}

/// Axis-aligned rectangle in document space.
///
/// Always normalized: `(x, y)` is the minimum corner and the extents are
/// non-negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DocRect {
    /// Creates a rectangle with positive area, or `None` otherwise.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Option<Self> {
        if width <= 0.0 || height <= 0.0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a normalized rectangle from two opposite corners.
    ///
    /// The corners may arrive in any order (a selection drag can move up and
    /// left); the result always has the minimum corner at `(x, y)`. The area
    /// may be zero while a drag has not moved yet.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: (bx - ax).abs(),
            height: (by - ay).abs(),
        }
    }

    /// Returns true if the rectangle has positive area.
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Converts to `Some(self)` only when the rectangle has positive area.
    pub fn non_empty(self) -> Option<Self> {
        if self.has_area() { Some(self) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_document_round_trip() {
        let vp = Viewport::new(2.0, 35.0, -12.0);
        let (dx, dy) = vp.to_document(120.0, 48.0);
        let (sx, sy) = vp.to_screen(dx, dy);
        assert!((sx - 120.0).abs() < 1e-9);
        assert!((sy - 48.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_keeps_anchor_point_stationary() {
        let mut vp = Viewport::default();
        let (doc_x, doc_y) = vp.to_document(200.0, 200.0);

        vp.zoom_at(200.0, 200.0, 2.0);

        let (sx, sy) = vp.to_screen(doc_x, doc_y);
        assert!((sx - 200.0).abs() < 1e-9);
        assert!((sy - 200.0).abs() < 1e-9);
        assert!((vp.offset_x - -200.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_clamps_to_scale_bounds() {
        let mut vp = Viewport::default();
        vp.zoom_at(0.0, 0.0, 50.0);
        assert_eq!(vp.scale, MAX_SCALE);
        vp.zoom_at(0.0, 0.0, 0.0001);
        assert_eq!(vp.scale, MIN_SCALE);
    }

    #[test]
    fn pan_moves_offset_only() {
        let mut vp = Viewport::new(3.0, 10.0, 10.0);
        vp.pan(-4.0, 6.0);
        assert_eq!(vp.scale, 3.0);
        assert_eq!(vp.offset_x, 6.0);
        assert_eq!(vp.offset_y, 16.0);
    }

    #[test]
    fn centered_splits_leftover_space_evenly() {
        let vp = Viewport::centered(1000.0, 800.0, 600.0, 400.0, 1.0);
        assert_eq!(vp.offset_x, 200.0);
        assert_eq!(vp.offset_y, 200.0);

        // Page wider than the container: the offset goes negative.
        let vp = Viewport::centered(500.0, 800.0, 600.0, 400.0, 1.0);
        assert_eq!(vp.offset_x, -50.0);
    }

    #[test]
    fn rect_from_corners_normalizes_any_drag_direction() {
        let rect = DocRect::from_corners(100.0, 80.0, 60.0, 120.0);
        assert_eq!(rect.x, 60.0);
        assert_eq!(rect.y, 80.0);
        assert_eq!(rect.width, 40.0);
        assert_eq!(rect.height, 40.0);
    }

    #[test]
    fn zero_area_rect_is_not_a_selection() {
        let rect = DocRect::from_corners(10.0, 10.0, 10.0, 50.0);
        assert!(!rect.has_area());
        assert!(rect.non_empty().is_none());
        assert!(DocRect::new(0.0, 0.0, 0.0, 5.0).is_none());
    }
}
