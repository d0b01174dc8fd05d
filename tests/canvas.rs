use cairo::{Context, Format, ImageSurface, Operator};
use tempfile::TempDir;

use docscriber::capture::capture_page;
use docscriber::config::Config;
use docscriber::draw::{BackgroundImage, color};
use docscriber::input::{PointerButton, PointerEvent, Tool};
use docscriber::session::{
    CompressionMode, SessionOptions, apply_snapshot, load_snapshot, save_snapshot,
    snapshot_from_canvas,
};
use docscriber::{Canvas, Viewport};

fn canvas(width: f64, height: f64) -> Canvas {
    Canvas::new(&Config::default(), width, height, 1.0).unwrap()
}

fn solid_background(canvas: &mut Canvas, width: i32, height: i32, r: f64, g: f64, b: f64) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(r, g, b);
        ctx.paint().unwrap();
    }
    canvas
        .page
        .set_background(BackgroundImage::from_surface(surface));
}

/// Copies a surface so its pixels can be read without mutable access.
fn pixel_at(surface: &ImageSurface, x: usize, y: usize) -> u32 {
    let mut copy =
        ImageSurface::create(Format::ARgb32, surface.width(), surface.height()).unwrap();
    {
        let ctx = Context::new(&copy).unwrap();
        ctx.set_operator(Operator::Source);
        ctx.set_source_surface(surface, 0.0, 0.0).unwrap();
        ctx.paint().unwrap();
    }
    copy.flush();
    let stride = copy.stride() as usize;
    let data = copy.data().unwrap();
    let offset = y * stride + x * 4;
    u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Drags a full-pressure stroke between two screen positions.
fn drag(canvas: &mut Canvas, tool: Tool, from: (f64, f64), to: (f64, f64)) {
    canvas.set_tool(tool);
    canvas.on_pointer_down(
        PointerButton::Primary,
        PointerEvent::pen(from.0, from.1, 1.0),
    );
    canvas.on_pointer_move(PointerEvent::pen(to.0, to.1, 1.0));
    canvas.on_pointer_up(PointerButton::Primary, PointerEvent::pen(to.0, to.1, 1.0));
}

#[test]
fn drawn_ink_reaches_the_composited_output() {
    let mut canvas = canvas(100.0, 80.0);
    solid_background(&mut canvas, 100, 80, 1.0, 0.0, 0.0);

    canvas.set_color(color::BLACK);
    drag(&mut canvas, Tool::Marker, (10.0, 40.0), (70.0, 40.0));
    canvas.render().unwrap();

    assert_eq!(pixel_at(canvas.output(), 40, 40), 0xFF000000);
    // Off the stroke the page raster shows through untouched.
    assert_eq!(pixel_at(canvas.output(), 85, 40), 0xFFFF0000);
}

#[test]
fn eraser_restores_the_background_in_the_output() {
    let mut canvas = canvas(100.0, 80.0);
    solid_background(&mut canvas, 100, 80, 1.0, 0.0, 0.0);

    canvas.set_color(color::BLACK);
    drag(&mut canvas, Tool::Marker, (10.0, 40.0), (70.0, 40.0));
    canvas.render().unwrap();
    assert_eq!(pixel_at(canvas.output(), 40, 40), 0xFF000000);

    drag(&mut canvas, Tool::Eraser, (40.0, 10.0), (40.0, 70.0));
    canvas.render().unwrap();

    // The eraser punched the ink layer only; the page shows through.
    assert_eq!(pixel_at(canvas.output(), 40, 40), 0xFFFF0000);
    // Ink outside the eraser path survives.
    assert_eq!(pixel_at(canvas.output(), 12, 40), 0xFF000000);
}

#[test]
fn later_ink_paints_over_earlier_ink() {
    let mut canvas = canvas(100.0, 80.0);

    canvas.set_color(color::RED);
    drag(&mut canvas, Tool::Marker, (10.0, 40.0), (70.0, 40.0));
    canvas.set_color(color::BLUE);
    drag(&mut canvas, Tool::Marker, (40.0, 10.0), (40.0, 70.0));
    canvas.render().unwrap();

    assert_eq!(pixel_at(canvas.output(), 40, 40), 0xFF0000FF);
    assert_eq!(pixel_at(canvas.output(), 12, 40), 0xFFFF0000);
}

#[test]
fn highlighter_tints_the_page_but_never_hides_ink() {
    let mut canvas = canvas(100.0, 80.0);
    solid_background(&mut canvas, 100, 80, 1.0, 1.0, 1.0);

    canvas.set_color(color::BLACK);
    drag(&mut canvas, Tool::Marker, (10.0, 40.0), (70.0, 40.0));
    canvas.set_color(color::YELLOW);
    drag(&mut canvas, Tool::Highlighter, (40.0, 10.0), (40.0, 70.0));
    canvas.render().unwrap();

    // Multiply keeps the crossing opaque black.
    assert_eq!(pixel_at(canvas.output(), 40, 40), 0xFF000000);

    // Where only the highlighter passed, the white page picked up the tint.
    let tinted = pixel_at(canvas.output(), 40, 60);
    assert_ne!(tinted, 0xFFFFFFFF);
    assert_eq!(tinted & 0xFF000000, 0xFF000000);
}

#[test]
fn strokes_drawn_while_zoomed_export_in_document_space() {
    let mut canvas = canvas(100.0, 80.0);
    solid_background(&mut canvas, 100, 80, 1.0, 0.0, 0.0);
    canvas.viewport = Viewport::new(2.0, 0.0, 0.0);

    // A dot at screen (80, 60) is document (40, 30) under 2x zoom.
    canvas.set_color(color::BLACK);
    canvas.set_tool(Tool::Marker);
    canvas.on_pointer_down(PointerButton::Primary, PointerEvent::pen(80.0, 60.0, 1.0));
    canvas.on_pointer_up(PointerButton::Primary, PointerEvent::pen(80.0, 60.0, 1.0));

    let bytes = capture_page(&canvas.page, 2.0).unwrap();
    let decoded = ImageSurface::create_from_png(&mut bytes.as_slice()).unwrap();
    assert_eq!(decoded.width(), 200);
    assert_eq!(decoded.height(), 160);

    assert_eq!(pixel_at(&decoded, 80, 60), 0xFF000000);
    assert_eq!(pixel_at(&decoded, 10, 10), 0xFFFF0000);
}

#[test]
fn session_round_trip_restores_the_frame() {
    let dir = TempDir::new().unwrap();
    let mut options = SessionOptions::new(dir.path().to_path_buf(), "roundtrip");
    options.compression = CompressionMode::Off;

    let mut first = canvas(100.0, 80.0);
    first.set_color(color::BLUE);
    drag(&mut first, Tool::Marker, (10.0, 40.0), (70.0, 40.0));
    first.viewport = Viewport::new(2.0, -10.0, -5.0);

    let snapshot = snapshot_from_canvas(&first, &options).unwrap();
    save_snapshot(&snapshot, &options).unwrap();

    let mut second = canvas(100.0, 80.0);
    let loaded = load_snapshot(&options).unwrap().unwrap();
    apply_snapshot(&mut second, &loaded, &options);

    assert_eq!(second.page.strokes().len(), 1);
    assert_eq!(second.viewport, first.viewport);
    assert_eq!(second.tool(), Tool::Marker);
    assert_eq!(second.color(), color::BLUE);

    first.render().unwrap();
    second.render().unwrap();
    // Document (40, 40) maps to screen (70, 75) under the restored view.
    assert_eq!(pixel_at(second.output(), 70, 75), 0xFF0000FF);
    assert_eq!(
        pixel_at(second.output(), 70, 75),
        pixel_at(first.output(), 70, 75)
    );
}
