//! Region capture: pixel-accurate PNG export of a document rectangle.
//!
//! Captures re-render from the model onto fresh surfaces instead of copying
//! screen pixels, so the result is independent of the current zoom, pan, and
//! window size. The selection overlay is not part of the model and therefore
//! never appears in a capture.

pub mod file;

#[cfg(test)]
mod tests;

use cairo::{Context, Filter, Format, ImageSurface};
use log::{debug, info};
use thiserror::Error;

use crate::draw::{Page, render_strokes};
use crate::geometry::DocRect;

/// Lower bound for the capture supersampling factor.
pub const MIN_CAPTURE_SCALE: f64 = 2.0;
/// Upper bound for the capture supersampling factor.
pub const MAX_CAPTURE_SCALE: f64 = 3.0;
/// Default supersampling factor for captures.
pub const DEFAULT_CAPTURE_SCALE: f64 = 3.0;

/// Errors that can occur during region capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("page has no background raster to capture")]
    NoBackground,

    #[error("capture region has no area")]
    EmptyRegion,

    #[error("cairo rendering failed: {0}")]
    Render(#[from] cairo::Error),

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] cairo::IoError),

    #[error("failed to save capture: {0}")]
    Save(#[from] std::io::Error),
}

/// Renders a document-space rectangle to a fresh surface at `factor`
/// supersampling (clamped to `[2, 3]`).
///
/// Strokes composite onto a dedicated ink surface which is then flattened
/// over the background, so an eraser stroke cuts ink but can never punch a
/// transparent hole into the captured background.
pub fn render_region(
    page: &Page,
    rect: DocRect,
    factor: f64,
) -> Result<ImageSurface, CaptureError> {
    let Some(background) = page.background() else {
        return Err(CaptureError::NoBackground);
    };
    if !rect.has_area() {
        return Err(CaptureError::EmptyRegion);
    }

    let factor = factor.clamp(MIN_CAPTURE_SCALE, MAX_CAPTURE_SCALE);
    let width_px = (rect.width * factor).ceil().max(1.0) as i32;
    let height_px = (rect.height * factor).ceil().max(1.0) as i32;
    debug!(
        "Capturing region {:.1}x{:.1} at ({:.1}, {:.1}) -> {}x{} px",
        rect.width, rect.height, rect.x, rect.y, width_px, height_px
    );

    let ink = ImageSurface::create(Format::ARgb32, width_px, height_px)?;
    {
        let ctx = Context::new(&ink)?;
        ctx.scale(factor, factor);
        ctx.translate(-rect.x, -rect.y);
        render_strokes(&ctx, page.strokes());
    }

    let output = ImageSurface::create(Format::ARgb32, width_px, height_px)?;
    {
        let ctx = Context::new(&output)?;
        if background.width_px() > 0 && background.height_px() > 0 {
            ctx.save()?;
            ctx.scale(factor, factor);
            ctx.translate(-rect.x, -rect.y);
            ctx.scale(
                page.width() / background.width_px() as f64,
                page.height() / background.height_px() as f64,
            );
            ctx.set_source_surface(background.surface(), 0.0, 0.0)?;
            ctx.source().set_filter(Filter::Best);
            ctx.paint()?;
            ctx.restore()?;
        }

        ctx.set_source_surface(&ink, 0.0, 0.0)?;
        ctx.paint()?;
    }

    Ok(output)
}

/// Captures a document-space rectangle as PNG bytes.
pub fn capture_region(page: &Page, rect: DocRect, factor: f64) -> Result<Vec<u8>, CaptureError> {
    let surface = render_region(page, rect, factor)?;
    let mut bytes = Vec::new();
    surface.write_to_png(&mut bytes)?;
    info!(
        "Captured {:.0}x{:.0} region as {} PNG bytes",
        rect.width,
        rect.height,
        bytes.len()
    );
    Ok(bytes)
}

/// Captures the entire page as PNG bytes.
pub fn capture_page(page: &Page, factor: f64) -> Result<Vec<u8>, CaptureError> {
    let rect = page.rect().ok_or(CaptureError::EmptyRegion)?;
    capture_region(page, rect, factor)
}
