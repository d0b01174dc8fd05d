//! Full-frame compositing render pass.
//!
//! Every pass clears and redraws all three layers, then flattens them into
//! the output surface at identity. There is no damage tracking: pan and zoom
//! invalidate the whole frame anyway, and unconditional redraw keeps layer
//! contents trivially consistent with the model.

use cairo::{Context, Filter, Operator};
use log::debug;

use super::surfaces::clear_surface;
use super::{Canvas, Gesture, MARQUEE_LINE_WIDTH, RenderError};
use crate::draw::{render_stroke, render_strokes};

impl Canvas {
    /// Renders a complete frame into the output surface.
    ///
    /// Pass order: background raster under the viewport transform, all
    /// finalized strokes plus the in-progress one onto the ink layer, the
    /// selection marquee onto the overlay, then the three layers composited
    /// source-over at identity. Clears `needs_redraw`.
    pub fn render(&mut self) -> Result<(), RenderError> {
        debug!(
            "Render pass: scale {:.3} offset ({:.1}, {:.1}), {} strokes",
            self.viewport.scale,
            self.viewport.offset_x,
            self.viewport.offset_y,
            self.page.strokes().len()
        );

        self.paint_background()?;
        self.paint_ink()?;
        self.paint_overlay()?;
        self.composite()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Applies device pixel ratio and the document transform.
    fn apply_view_transform(&self, ctx: &Context) {
        let dpr = self.layers.dpr();
        ctx.scale(dpr, dpr);
        ctx.translate(self.viewport.offset_x, self.viewport.offset_y);
        ctx.scale(self.viewport.scale, self.viewport.scale);
    }

    fn paint_background(&self) -> Result<(), RenderError> {
        let ctx = Context::new(self.layers.background())?;
        clear_surface(&ctx)?;

        if let Some(bg) = self.page.background() {
            if bg.width_px() > 0 && bg.height_px() > 0 {
                self.apply_view_transform(&ctx);
                // Map the raster's native pixels onto the page's logical extent.
                ctx.scale(
                    self.page.width() / bg.width_px() as f64,
                    self.page.height() / bg.height_px() as f64,
                );
                ctx.set_source_surface(bg.surface(), 0.0, 0.0)?;
                ctx.source().set_filter(Filter::Good);
                ctx.paint()?;
            }
        }
        Ok(())
    }

    fn paint_ink(&self) -> Result<(), RenderError> {
        let ctx = Context::new(self.layers.ink())?;
        clear_surface(&ctx)?;
        self.apply_view_transform(&ctx);

        render_strokes(&ctx, self.page.strokes());
        if let Gesture::Drawing { stroke } = &self.gesture {
            render_stroke(&ctx, stroke);
        }
        Ok(())
    }

    fn paint_overlay(&self) -> Result<(), RenderError> {
        let ctx = Context::new(self.layers.overlay())?;
        clear_surface(&ctx)?;

        let Some(rect) = self.active_marquee_rect() else {
            return Ok(());
        };
        if !rect.has_area() {
            return Ok(());
        }

        self.apply_view_transform(&ctx);
        let style = &self.marquee_style;

        ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
        ctx.set_source_rgba(style.fill.r, style.fill.g, style.fill.b, style.fill.a);
        let _ = ctx.fill_preserve();

        // Marching ants: constant 2 screen px wide, dashes in document units,
        // phase animated by the host tick.
        ctx.set_source_rgba(style.border.r, style.border.g, style.border.b, style.border.a);
        ctx.set_line_width(MARQUEE_LINE_WIDTH / self.viewport.scale);
        ctx.set_dash(&[style.dash_length, style.gap_length], -self.marquee_phase);
        let _ = ctx.stroke();
        Ok(())
    }

    /// Flattens background, ink, and overlay into the output at identity.
    fn composite(&self) -> Result<(), RenderError> {
        let ctx = Context::new(self.layers.output())?;
        ctx.set_operator(Operator::Clear);
        ctx.paint()?;
        ctx.set_operator(Operator::Over);

        ctx.set_source_surface(self.layers.background(), 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_source_surface(self.layers.ink(), 0.0, 0.0)?;
        ctx.paint()?;
        ctx.set_source_surface(self.layers.overlay(), 0.0, 0.0)?;
        ctx.paint()?;

        drop(ctx);
        self.layers.output().flush();
        Ok(())
    }
}
