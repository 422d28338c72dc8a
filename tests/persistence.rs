use egui::{Color32, Pos2};
use image::{Rgb, RgbImage};
use std::path::PathBuf;

use raster_paint::{FileHandler, PaintApp, PaintError, PointerEvent, RasterBuffer, Surface, Tool};

/// Unique path in the temp dir; removed when dropped.
struct TempPath(PathBuf);

impl TempPath {
    fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!("raster_paint_{}_{name}", std::process::id())))
    }
}

impl Drop for TempPath {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

/// Resampling may be off by one from rounding.
fn assert_close(actual: [u8; 3], expected: [u8; 3]) {
    for (a, e) in actual.into_iter().zip(expected) {
        assert!((a as i32 - e as i32).abs() <= 1, "{actual:?} vs {expected:?}");
    }
}

fn sample_buffer() -> RasterBuffer {
    let mut buffer = RasterBuffer::new(120, 80, Color32::WHITE);
    buffer.paint_disc(Pos2::new(30.0, 30.0), 12.0, Color32::from_rgb(200, 30, 40));
    buffer.paint_rect_outline(Pos2::new(60.0, 10.0), Pos2::new(110.0, 70.0), 3.0, Color32::BLUE);
    buffer.paint_line(Pos2::new(0.0, 79.0), Pos2::new(119.0, 0.0), 2.0, Color32::BLACK);
    buffer
}

#[test]
fn test_png_round_trip_is_lossless() {
    let path = TempPath::new("roundtrip.png");
    let buffer = sample_buffer();
    let mut files = FileHandler::new();

    let written = files.save(&path.0, &buffer).unwrap();
    assert_eq!(written, path.0);
    let loaded = files.load(&path.0, buffer.width(), buffer.height()).unwrap();

    assert!(loaded == buffer.export());
    assert_eq!(files.last_path(), Some(path.0.as_path()));
}

#[test]
fn test_jpeg_round_trip_within_tolerance() {
    let path = TempPath::new("roundtrip.jpg");
    let mut buffer = RasterBuffer::new(64, 64, Color32::from_rgb(240, 240, 240));
    buffer.paint_disc(Pos2::new(32.0, 32.0), 20.0, Color32::from_rgb(20, 90, 160));
    let mut files = FileHandler::new();

    files.save(&path.0, &buffer).unwrap();
    let loaded = files.load(&path.0, 64, 64).unwrap();

    // Sample away from edges, where compression artifacts concentrate.
    for (x, y) in [(32, 32), (30, 36), (2, 2), (61, 61)] {
        let expected = buffer.pixel(x, y).unwrap();
        let actual = loaded.get_pixel(x, y);
        for (e, a) in [expected.r(), expected.g(), expected.b()].into_iter().zip(actual.0) {
            assert!((e as i32 - a as i32).abs() <= 12, "({x}, {y}): {expected:?} vs {actual:?}");
        }
    }
}

#[test]
fn test_save_without_extension_writes_png() {
    let base = TempPath::new("no_extension");
    let expected = TempPath(base.0.with_extension("png"));
    let mut files = FileHandler::new();

    let written = files.save(&base.0, &sample_buffer()).unwrap();
    assert_eq!(written, expected.0);
    assert_eq!(image::ImageFormat::from_path(&written).unwrap(), image::ImageFormat::Png);
    assert!(written.exists());
}

#[test]
fn test_load_stretches_to_requested_size() {
    let path = TempPath::new("small.png");
    let mut small = RgbImage::from_pixel(10, 5, Rgb([0, 128, 0]));
    small.put_pixel(0, 0, Rgb([255, 0, 0]));
    small.save(&path.0).unwrap();

    let loaded = FileHandler::new().load(&path.0, 800, 500).unwrap();
    assert_eq!(loaded.dimensions(), (800, 500));
    assert_close(loaded.get_pixel(400, 250).0, [0, 128, 0]);
}

#[test]
fn test_garbage_file_is_unsupported_format() {
    let path = TempPath::new("garbage.png");
    std::fs::write(&path.0, b"definitely not an image").unwrap();

    let result = FileHandler::new().load(&path.0, 10, 10);
    assert!(matches!(result, Err(PaintError::UnsupportedFormat { .. })));
}

#[test]
fn test_unwritable_path_is_io_error() {
    let path = std::env::temp_dir()
        .join("raster_paint_missing_dir")
        .join("nested")
        .join("out.png");
    let result = FileHandler::new().save(&path, &sample_buffer());
    assert!(matches!(result, Err(PaintError::Io { .. })));
}

#[test]
fn test_app_load_replaces_both_surfaces() {
    let path = TempPath::new("app_load.png");
    RgbImage::from_pixel(40, 25, Rgb([10, 20, 30])).save(&path.0).unwrap();

    let mut app = PaintApp::default();
    app.handle_pointer(PointerEvent::Down(Pos2::new(5.0, 5.0)));
    app.handle_pointer(PointerEvent::Move(Pos2::new(5.0, 5.0)));
    app.handle_pointer(PointerEvent::Up(Pos2::new(5.0, 5.0)));
    app.load_from(&path.0);

    let [width, height] = app.canvas_size();
    assert_eq!(app.raster().size(), [width, height]);
    let loaded = app.raster().pixel(5, 5).unwrap();
    assert_close([loaded.r(), loaded.g(), loaded.b()], [10, 20, 30]);
    assert_eq!(app.canvas().image_size(), Some([width as usize, height as usize]));
    assert!(app.canvas().ops().is_empty());
    assert!(app.status().is_some_and(|s| s.starts_with("Loaded")));
}

#[test]
fn test_app_failed_load_keeps_drawing() {
    let mut app = PaintApp::default();
    app.controller_mut().select_tool(Tool::Brush);
    app.handle_pointer(PointerEvent::Down(Pos2::new(5.0, 5.0)));
    app.handle_pointer(PointerEvent::Move(Pos2::new(5.0, 5.0)));
    let before = app.raster().export();

    app.load_from(&std::env::temp_dir().join("raster_paint_nothing_here.png"));

    assert!(app.raster().export() == before);
    assert_eq!(app.canvas().ops().len(), 1);
    assert!(app.status().is_some_and(|s| s.starts_with("I/O error")));
}
