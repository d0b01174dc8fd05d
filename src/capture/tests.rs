use cairo::{Context, Format, ImageSurface};

use super::{CaptureError, capture_page, capture_region, render_region};
use crate::draw::{BackgroundImage, Page, Point, Stroke, color};
use crate::geometry::DocRect;
use crate::input::Tool;

/// Builds a page backed by a solid-color raster, one pixel per document unit.
fn solid_page(width: i32, height: i32, r: f64, g: f64, b: f64) -> Page {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(r, g, b);
        ctx.paint().unwrap();
    }
    let mut page = Page::new(width as f64, height as f64);
    page.set_background(BackgroundImage::from_surface(surface));
    page
}

fn pixel_at(surface: &mut ImageSurface, x: i32, y: i32) -> u32 {
    surface.flush();
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y as usize * stride + x as usize * 4;
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn line_stroke(tool: Tool, width: f64, from: (f64, f64), to: (f64, f64)) -> Stroke {
    let mut stroke = Stroke::start(
        tool,
        color::BLACK,
        width,
        1.0,
        Point::new(from.0, from.1, 0.5),
    );
    stroke.push_point(Point::new(to.0, to.1, 0.5));
    stroke
}

#[test]
fn test_capture_produces_png_signature() {
    let page = solid_page(100, 80, 1.0, 0.0, 0.0);
    let rect = page.rect().unwrap();

    let bytes = capture_region(&page, rect, 3.0).unwrap();
    assert!(!bytes.is_empty());
    // PNG signature
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
}

#[test]
fn test_capture_without_background_fails() {
    let page = Page::default();
    let rect = DocRect::new(0.0, 0.0, 50.0, 50.0).unwrap();

    let err = capture_region(&page, rect, 3.0).unwrap_err();
    match err {
        CaptureError::NoBackground => {}
        other => panic!("expected NoBackground, got {:?}", other),
    }
}

#[test]
fn test_capture_empty_region_fails() {
    let page = solid_page(40, 40, 1.0, 1.0, 1.0);
    let rect = DocRect::from_corners(10.0, 10.0, 10.0, 10.0);

    let err = capture_region(&page, rect, 3.0).unwrap_err();
    match err {
        CaptureError::EmptyRegion => {}
        other => panic!("expected EmptyRegion, got {:?}", other),
    }
}

#[test]
fn test_capture_factor_is_clamped() {
    let page = solid_page(40, 30, 1.0, 1.0, 1.0);
    let rect = page.rect().unwrap();

    let oversized = render_region(&page, rect, 10.0).unwrap();
    assert_eq!(oversized.width(), 120);
    assert_eq!(oversized.height(), 90);

    let undersized = render_region(&page, rect, 0.5).unwrap();
    assert_eq!(undersized.width(), 80);
    assert_eq!(undersized.height(), 60);
}

#[test]
fn test_region_origin_maps_to_surface_origin() {
    let mut page = solid_page(100, 100, 1.0, 0.0, 0.0);
    // One-point stroke renders as a round dot centered at (50, 40).
    page.push_stroke(Stroke::start(
        Tool::Pen,
        color::BLACK,
        6.0,
        1.0,
        Point::new(50.0, 40.0, 0.5),
    ));

    let rect = DocRect::new(40.0, 30.0, 20.0, 20.0).unwrap();
    let mut surface = render_region(&page, rect, 2.0).unwrap();
    assert_eq!(surface.width(), 40);
    assert_eq!(surface.height(), 40);

    // The dot center lands at ((50-40)*2, (40-30)*2).
    assert_eq!(pixel_at(&mut surface, 20, 20), 0xFF000000);
    // Away from the dot the background shows through.
    assert_eq!(pixel_at(&mut surface, 2, 2), 0xFFFF0000);
}

#[test]
fn test_eraser_cuts_ink_but_not_background() {
    let mut page = solid_page(60, 60, 1.0, 0.0, 0.0);
    page.push_stroke(line_stroke(Tool::Marker, 8.0, (10.0, 30.0), (50.0, 30.0)));
    page.push_stroke(line_stroke(Tool::Eraser, 12.0, (30.0, 10.0), (30.0, 50.0)));

    let rect = page.rect().unwrap();
    let mut surface = render_region(&page, rect, 2.0).unwrap();

    // Where the eraser crossed the marker, the background is intact.
    assert_eq!(pixel_at(&mut surface, 60, 60), 0xFFFF0000);
    // Marker ink survives away from the eraser path.
    assert_eq!(pixel_at(&mut surface, 30, 60), 0xFF000000);
    // Untouched background corner.
    assert_eq!(pixel_at(&mut surface, 10, 10), 0xFFFF0000);
}

#[test]
fn test_capture_page_covers_full_extent() {
    let page = solid_page(50, 40, 0.0, 1.0, 0.0);

    let bytes = capture_page(&page, 2.0).unwrap();
    let decoded = ImageSurface::create_from_png(&mut bytes.as_slice()).unwrap();
    assert_eq!(decoded.width(), 100);
    assert_eq!(decoded.height(), 80);
}

#[test]
fn test_capture_ignores_viewport_state() {
    // Captures re-render from the model; two captures of the same page are
    // byte-identical regardless of any host-side zoom or pan.
    let mut page = solid_page(40, 40, 1.0, 1.0, 1.0);
    page.push_stroke(line_stroke(Tool::Pen, 2.5, (5.0, 5.0), (35.0, 35.0)));

    let first = capture_region(&page, page.rect().unwrap(), 2.0).unwrap();
    let second = capture_region(&page, page.rect().unwrap(), 2.0).unwrap();
    assert_eq!(first, second);

    let decoded = ImageSurface::create_from_png(&mut first.as_slice()).unwrap();
    assert_eq!(decoded.width(), 80);
    assert_eq!(decoded.height(), 80);
}
