//! Cairo-based stroke rendering.
//!
//! Strokes render as smoothed paths with round caps and joins. The tool picks
//! the compositing operator: plain ink paints source-over, the highlighter
//! multiplies against earlier ink, and the eraser punches transparency with
//! `DestOut`. Callers decide which surface a stroke lands on; the eraser
//! contract (ink only, never the background raster) is enforced there.

use std::f64::consts::PI;

use super::stroke::{Point, Stroke};
use super::style::composite_mode;
use crate::input::Tool;

/// Renders a slice of strokes in order (first stroke = bottom).
pub fn render_strokes(ctx: &cairo::Context, strokes: &[Stroke]) {
    for stroke in strokes {
        render_stroke(ctx, stroke);
    }
}

/// Renders a single stroke with its tool's compositing mode.
///
/// Graphics state is saved and restored around the call so the operator
/// switch cannot leak into later drawing.
pub fn render_stroke(ctx: &cairo::Context, stroke: &Stroke) {
    let points = &stroke.points;
    if points.is_empty() {
        return;
    }

    ctx.save().ok();
    ctx.set_operator(composite_mode(stroke.tool).operator());

    if stroke.tool == Tool::Eraser {
        // Only the source alpha matters under DestOut.
        ctx.set_source_rgba(0.0, 0.0, 0.0, 1.0);
    } else {
        let c = stroke.color;
        ctx.set_source_rgba(c.r, c.g, c.b, c.a * stroke.opacity);
    }
    ctx.set_line_width(stroke.width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    if points.len() == 1 {
        // Single tap: a round dot of the stroke width.
        ctx.arc(points[0].x, points[0].y, stroke.width / 2.0, 0.0, 2.0 * PI);
        let _ = ctx.fill();
    } else {
        stroke_path(ctx, points);
        let _ = ctx.stroke();
    }

    ctx.restore().ok();
}

/// Builds the path for a multi-point stroke.
///
/// Two samples make a straight segment. With three or more, the path runs
/// through the midpoint of each consecutive sample pair using the interior
/// sample as the curve's control point, which rounds off raw pointer jitter
/// without moving the endpoints.
fn stroke_path(ctx: &cairo::Context, points: &[Point]) {
    ctx.move_to(points[0].x, points[0].y);

    if points.len() == 2 {
        ctx.line_to(points[1].x, points[1].y);
        return;
    }

    for i in 1..points.len() - 1 {
        let mid_x = (points[i].x + points[i + 1].x) / 2.0;
        let mid_y = (points[i].y + points[i + 1].y) / 2.0;
        quadratic_to(ctx, points[i].x, points[i].y, mid_x, mid_y);
    }

    // The last curve ends on a midpoint; close the gap to the final sample.
    if let Some(last) = points.last() {
        ctx.line_to(last.x, last.y);
    }
}

/// Quadratic curve from the current point, expressed as the exact cubic
/// equivalent (cairo has no native quadratic segment).
fn quadratic_to(ctx: &cairo::Context, ctrl_x: f64, ctrl_y: f64, x: f64, y: f64) {
    let (sx, sy) = ctx.current_point().unwrap_or((ctrl_x, ctrl_y));
    ctx.curve_to(
        sx + 2.0 / 3.0 * (ctrl_x - sx),
        sy + 2.0 / 3.0 * (ctrl_y - sy),
        x + 2.0 / 3.0 * (ctrl_x - x),
        y + 2.0 / 3.0 * (ctrl_y - y),
        x,
        y,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use cairo::{Context, Format, ImageSurface};

    fn test_surface() -> ImageSurface {
        ImageSurface::create(Format::ARgb32, 60, 60).unwrap()
    }

    fn pixel_at(surface: &mut ImageSurface, x: usize, y: usize) -> u32 {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    fn stroke_with(tool: Tool, width: f64, points: Vec<Point>) -> Stroke {
        Stroke {
            id: crate::draw::StrokeId::next(),
            tool,
            color: RED,
            width,
            opacity: 1.0,
            points,
        }
    }

    #[test]
    fn single_point_renders_as_a_dot() {
        let mut surface = test_surface();
        {
            let ctx = Context::new(&surface).unwrap();
            let stroke = stroke_with(Tool::Pen, 8.0, vec![Point::new(30.0, 30.0, 0.5)]);
            render_stroke(&ctx, &stroke);
        }
        assert_ne!(pixel_at(&mut surface, 30, 30), 0);
        // Well outside the dot radius nothing is painted.
        assert_eq!(pixel_at(&mut surface, 10, 10), 0);
    }

    #[test]
    fn smoothed_path_still_reaches_both_endpoints() {
        let mut surface = test_surface();
        {
            let ctx = Context::new(&surface).unwrap();
            let stroke = stroke_with(
                Tool::Pen,
                4.0,
                vec![
                    Point::new(5.0, 30.0, 0.5),
                    Point::new(30.0, 10.0, 0.5),
                    Point::new(55.0, 30.0, 0.5),
                ],
            );
            render_stroke(&ctx, &stroke);
        }
        assert_ne!(pixel_at(&mut surface, 5, 30), 0);
        assert_ne!(pixel_at(&mut surface, 55, 30), 0);
    }

    #[test]
    fn eraser_clears_previously_painted_ink() {
        let mut surface = test_surface();
        {
            let ctx = Context::new(&surface).unwrap();
            let ink = stroke_with(
                Tool::Marker,
                10.0,
                vec![Point::new(5.0, 30.0, 0.5), Point::new(55.0, 30.0, 0.5)],
            );
            render_stroke(&ctx, &ink);
        }
        assert_ne!(pixel_at(&mut surface, 30, 30), 0);

        {
            let ctx = Context::new(&surface).unwrap();
            let mut eraser = stroke_with(
                Tool::Eraser,
                20.0,
                vec![Point::new(25.0, 30.0, 0.5), Point::new(35.0, 30.0, 0.5)],
            );
            eraser.color = BLACK;
            render_stroke(&ctx, &eraser);
        }
        assert_eq!(pixel_at(&mut surface, 30, 30), 0);
        // Ink outside the erased span survives.
        assert_ne!(pixel_at(&mut surface, 8, 30), 0);
    }

    #[test]
    fn operator_switch_does_not_leak_between_strokes() {
        let mut surface = test_surface();
        {
            let ctx = Context::new(&surface).unwrap();
            let eraser = stroke_with(
                Tool::Eraser,
                10.0,
                vec![Point::new(5.0, 10.0, 0.5), Point::new(55.0, 10.0, 0.5)],
            );
            render_stroke(&ctx, &eraser);
            let ink = stroke_with(
                Tool::Pen,
                6.0,
                vec![Point::new(5.0, 40.0, 0.5), Point::new(55.0, 40.0, 0.5)],
            );
            render_stroke(&ctx, &ink);
        }
        assert_ne!(pixel_at(&mut surface, 30, 40), 0);
    }
}
