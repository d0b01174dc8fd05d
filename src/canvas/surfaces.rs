//! Raster layer management for the compositor.
//!
//! Four ARgb32 image surfaces back one canvas: background, ink, selection
//! overlay, and the composited output the host presents. All four share the
//! same device-pixel size (logical size times the device pixel ratio) and are
//! recreated together whenever that size changes.

use cairo::{Context, Format, ImageSurface, Operator};
use log::debug;
use thiserror::Error;

/// Errors from raster allocation or compositing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cairo rendering failed: {0}")]
    Cairo(#[from] cairo::Error),
}

/// The four surfaces compositing a canvas frame.
pub struct LayerStack {
    logical_width: f64,
    logical_height: f64,
    dpr: f64,
    device_width: i32,
    device_height: i32,
    background: ImageSurface,
    ink: ImageSurface,
    overlay: ImageSurface,
    output: ImageSurface,
}

impl LayerStack {
    /// Allocates the stack for a logical size and device pixel ratio.
    pub fn new(logical_width: f64, logical_height: f64, dpr: f64) -> Result<Self, RenderError> {
        let (device_width, device_height) = device_size(logical_width, logical_height, dpr);
        debug!(
            "Allocating layer stack: {}x{} logical at {}x ({}x{} device px)",
            logical_width, logical_height, dpr, device_width, device_height
        );
        Ok(Self {
            logical_width,
            logical_height,
            dpr,
            device_width,
            device_height,
            background: ImageSurface::create(Format::ARgb32, device_width, device_height)?,
            ink: ImageSurface::create(Format::ARgb32, device_width, device_height)?,
            overlay: ImageSurface::create(Format::ARgb32, device_width, device_height)?,
            output: ImageSurface::create(Format::ARgb32, device_width, device_height)?,
        })
    }

    /// Recreates every surface if the requested size differs from the current
    /// one. Returns true when a reallocation happened; surface contents do
    /// not survive it, so callers must re-render.
    pub fn resize(
        &mut self,
        logical_width: f64,
        logical_height: f64,
        dpr: f64,
    ) -> Result<bool, RenderError> {
        let (device_width, device_height) = device_size(logical_width, logical_height, dpr);
        if device_width == self.device_width
            && device_height == self.device_height
            && dpr == self.dpr
        {
            self.logical_width = logical_width;
            self.logical_height = logical_height;
            return Ok(false);
        }

        debug!(
            "Resizing layer stack to {}x{} device px",
            device_width, device_height
        );
        *self = Self::new(logical_width, logical_height, dpr)?;
        Ok(true)
    }

    pub fn logical_width(&self) -> f64 {
        self.logical_width
    }

    pub fn logical_height(&self) -> f64 {
        self.logical_height
    }

    pub fn dpr(&self) -> f64 {
        self.dpr
    }

    pub fn device_width(&self) -> i32 {
        self.device_width
    }

    pub fn device_height(&self) -> i32 {
        self.device_height
    }

    pub fn background(&self) -> &ImageSurface {
        &self.background
    }

    pub fn ink(&self) -> &ImageSurface {
        &self.ink
    }

    pub fn overlay(&self) -> &ImageSurface {
        &self.overlay
    }

    /// The composited frame the host presents.
    pub fn output(&self) -> &ImageSurface {
        &self.output
    }
}

fn device_size(logical_width: f64, logical_height: f64, dpr: f64) -> (i32, i32) {
    let w = (logical_width * dpr).ceil().max(1.0) as i32;
    let h = (logical_height * dpr).ceil().max(1.0) as i32;
    (w, h)
}

/// Clears a surface to full transparency and restores normal compositing.
pub(crate) fn clear_surface(ctx: &Context) -> Result<(), cairo::Error> {
    ctx.set_operator(Operator::Clear);
    ctx.paint()?;
    ctx.set_operator(Operator::Over);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_size_applies_dpr_and_rounds_up() {
        let stack = LayerStack::new(800.0, 600.5, 2.0).unwrap();
        assert_eq!(stack.device_width(), 1600);
        assert_eq!(stack.device_height(), 1201);
        assert_eq!(stack.background().width(), 1600);
    }

    #[test]
    fn resize_reports_whether_surfaces_were_recreated() {
        let mut stack = LayerStack::new(400.0, 300.0, 1.0).unwrap();
        assert!(!stack.resize(400.0, 300.0, 1.0).unwrap());
        assert!(stack.resize(500.0, 300.0, 1.0).unwrap());
        assert_eq!(stack.output().width(), 500);
    }

    #[test]
    fn degenerate_sizes_clamp_to_one_pixel() {
        let stack = LayerStack::new(0.0, 0.0, 1.0).unwrap();
        assert_eq!(stack.device_width(), 1);
        assert_eq!(stack.device_height(), 1);
    }
}
