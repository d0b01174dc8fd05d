use std::path::{Path, PathBuf};

use assert_cmd::Command;
use cairo::{Context, Format, ImageSurface};
use predicates::prelude::*;
use tempfile::TempDir;

use docscriber::draw::{Point, Stroke, color};
use docscriber::input::Tool;
use docscriber::session::{SessionOptions, SessionSnapshot, save_snapshot};

fn docscriber_cmd() -> Command {
    Command::cargo_bin("docscriber").expect("binary exists")
}

fn write_background_png(path: &Path, width: i32, height: i32) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(1.0, 1.0, 1.0);
        ctx.paint().unwrap();
    }
    let mut file = std::fs::File::create(path).unwrap();
    surface.write_to_png(&mut file).unwrap();
}

fn write_session(dir: &Path) -> PathBuf {
    let options = SessionOptions::new(dir.to_path_buf(), "export");
    let mut stroke = Stroke::start(
        Tool::Marker,
        color::BLACK,
        12.0,
        1.0,
        Point::new(10.0, 20.0, 1.0),
    );
    stroke.push_point(Point::new(30.0, 20.0, 1.0));

    let mut snapshot = SessionSnapshot::new(0);
    snapshot.set_page_strokes(0, vec![stroke]);
    save_snapshot(&snapshot, &options).unwrap();
    options.session_file_path()
}

#[test]
fn help_prints_usage() {
    docscriber_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Headless exporter for docscriber annotation sessions",
        ));
}

#[test]
fn version_includes_the_build_hash() {
    docscriber_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docscriber 0.3.0 ("));
}

#[test]
fn no_flags_prints_usage_summary() {
    let temp = TempDir::new().unwrap();
    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn export_renders_session_to_png() {
    let temp = TempDir::new().unwrap();
    let session_path = write_session(temp.path());
    let background_path = temp.path().join("page.png");
    write_background_png(&background_path, 40, 30);
    let output_path = temp.path().join("out.png");

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(&session_path)
        .arg("--background")
        .arg(&background_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("out.png"));

    let bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(&bytes[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);

    // Default capture scale is 3x.
    let decoded = ImageSurface::create_from_png(&mut bytes.as_slice()).unwrap();
    assert_eq!(decoded.width(), 120);
    assert_eq!(decoded.height(), 90);
}

#[test]
fn region_export_respects_scale() {
    let temp = TempDir::new().unwrap();
    let session_path = write_session(temp.path());
    let background_path = temp.path().join("page.png");
    write_background_png(&background_path, 40, 30);
    let output_path = temp.path().join("region.png");

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(&session_path)
        .arg("--background")
        .arg(&background_path)
        .arg("--output")
        .arg(&output_path)
        .args(["--region", "10,5x20x10", "--scale", "2"])
        .assert()
        .success();

    let bytes = std::fs::read(&output_path).unwrap();
    let decoded = ImageSurface::create_from_png(&mut bytes.as_slice()).unwrap();
    assert_eq!(decoded.width(), 40);
    assert_eq!(decoded.height(), 20);
}

#[test]
fn session_and_background_are_required_together() {
    let temp = TempDir::new().unwrap();
    let session_path = write_session(temp.path());

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(&session_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("required together"));
}

#[test]
fn malformed_region_is_rejected() {
    let temp = TempDir::new().unwrap();
    let session_path = write_session(temp.path());
    let background_path = temp.path().join("page.png");
    write_background_png(&background_path, 40, 30);

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(&session_path)
        .arg("--background")
        .arg(&background_path)
        .args(["--region", "nonsense"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed region"));
}

#[test]
fn missing_background_file_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let session_path = write_session(temp.path());

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(&session_path)
        .arg("--background")
        .arg(temp.path().join("missing.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open background"));
}

#[test]
fn missing_session_file_fails_cleanly() {
    let temp = TempDir::new().unwrap();
    let background = temp.path().join("page.png");
    write_background_png(&background, 40, 30);

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path())
        .arg("--session")
        .arg(temp.path().join("missing.json"))
        .arg("--background")
        .arg(&background)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load session"));
}

#[test]
fn session_info_reports_missing_session() {
    let temp = TempDir::new().unwrap();
    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .args(["--session-info", "ghost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exists: no"));
}

#[test]
fn clear_session_removes_stored_files() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir_all(data.join("docscriber")).unwrap();
    std::fs::write(data.join("docscriber/session-doc1.json"), b"{}").unwrap();

    docscriber_cmd()
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("XDG_DATA_HOME", &data)
        .args(["--clear-session", "doc1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared session for 'doc1'"));

    assert!(!data.join("docscriber/session-doc1.json").exists());
}
