//! Page model: ordered ink strokes plus the imported background raster.

use std::io::Read;

use cairo::ImageSurface;
use thiserror::Error;

use super::stroke::Stroke;
use crate::geometry::DocRect;

/// Fallback page size in document units when no background has loaded yet.
pub const DEFAULT_PAGE_WIDTH: f64 = 800.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 1100.0;

/// Errors importing a background raster.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("failed to decode PNG background: {0}")]
    Decode(#[from] cairo::IoError),
}

/// Decoded document page raster handed over by the host.
///
/// The surface keeps its native pixel size; rendering scales it onto the
/// page's logical extent, so hosts may rasterize at higher quality than one
/// pixel per document unit.
pub struct BackgroundImage {
    surface: ImageSurface,
    width_px: i32,
    height_px: i32,
}

impl BackgroundImage {
    /// Wraps an already-decoded raster.
    pub fn from_surface(surface: ImageSurface) -> Self {
        let width_px = surface.width();
        let height_px = surface.height();
        Self {
            surface,
            width_px,
            height_px,
        }
    }

    /// Decodes a PNG stream into a background raster.
    pub fn from_png<R: Read>(reader: &mut R) -> Result<Self, BackgroundError> {
        let surface = ImageSurface::create_from_png(reader)?;
        Ok(Self::from_surface(surface))
    }

    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn width_px(&self) -> i32 {
        self.width_px
    }

    pub fn height_px(&self) -> i32 {
        self.height_px
    }
}

/// One document page: its background raster, logical size, and ink.
///
/// Strokes are strictly ordered by insertion; rendering replays them in that
/// order. The whole stroke list can be taken out and replaced so a host can
/// swap pages while keeping a single canvas alive.
pub struct Page {
    strokes: Vec<Stroke>,
    background: Option<BackgroundImage>,
    width: f64,
    height: f64,
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH, DEFAULT_PAGE_HEIGHT)
    }
}

impl Page {
    /// Creates an empty page with an explicit logical size.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            strokes: Vec::new(),
            background: None,
            width,
            height,
        }
    }

    /// Installs a background raster, sizing the page one document unit per
    /// raster pixel.
    pub fn set_background(&mut self, background: BackgroundImage) {
        self.width = background.width_px() as f64;
        self.height = background.height_px() as f64;
        self.background = Some(background);
    }

    /// Installs a background raster with an explicit logical page size, for
    /// hosts that rasterize at higher density than one pixel per unit.
    pub fn set_background_with_size(
        &mut self,
        background: BackgroundImage,
        width: f64,
        height: f64,
    ) {
        self.width = width;
        self.height = height;
        self.background = Some(background);
    }

    /// Decodes a PNG stream and installs it as the background.
    pub fn load_background_png<R: Read>(&mut self, reader: &mut R) -> Result<(), BackgroundError> {
        let background = BackgroundImage::from_png(reader)?;
        self.set_background(background);
        Ok(())
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// The full page as a document-space rectangle.
    pub fn rect(&self) -> Option<DocRect> {
        DocRect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// Appends a finalized stroke at the top of the stacking order.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Removes all ink. The background stays.
    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
    }

    /// Takes the stroke list out, leaving the page blank (page switching).
    pub fn take_strokes(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    /// Replaces the stroke list wholesale (page switching, session load).
    pub fn set_strokes(&mut self, strokes: Vec<Stroke>) {
        self.strokes = strokes;
    }
}
