use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use tempfile::TempDir;

fn sketchboard_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sketchboard").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_prints_usage() {
    let temp = TempDir::new().unwrap();
    sketchboard_cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing surface with region export",
        ));
}

#[test]
fn print_config_shows_defaults() {
    let temp = TempDir::new().unwrap();
    sketchboard_cmd(&temp)
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("selection_filename = \"selection.png\""))
        .stdout(predicate::str::contains("on_pointer_leave = \"finish\""));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    sketchboard_cmd(&temp)
        .args(["--config", "/nonexistent/sketchboard.toml", "--print-config"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn crop_clamps_and_flattens_onto_background() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("source.png");
    let mut source = RgbaImage::new(20, 10);
    source.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
    source.save(&input).unwrap();
    let out_dir = temp.path().join("out");

    sketchboard_cmd(&temp)
        .arg("crop")
        .arg(&input)
        .args(["--rect", "-5,0,10,10", "--name", "region.png", "-o"])
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 5x10"));

    let written = image::open(out_dir.join("region.png")).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (5, 10));
    assert!(written.pixels().all(|p| p.0[3] == 255));
    assert_eq!(written.get_pixel(2, 3).0, [255, 0, 0, 255]);
    assert_eq!(written.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn crop_outside_image_fails() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("source.png");
    RgbaImage::new(8, 8).save(&input).unwrap();

    sketchboard_cmd(&temp)
        .arg("crop")
        .arg(&input)
        .args(["--rect", "50,50,10,10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not overlap"));
}

#[test]
fn replay_exports_confirmed_selection() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    std::fs::write(
        &script,
        "# draw, then export a region\n\
         down 150 150\n\
         move 200 200\n\
         up\n\
         save\n\
         down 100 100\n\
         move 300 250\n\
         up\n\
         confirm\n",
    )
    .unwrap();
    let out_dir = temp.path().join("exports");

    sketchboard_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 200x150"))
        .stdout(predicate::str::contains("Replayed 8 events, 1 exported"));

    let written = image::open(out_dir.join("selection.png")).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (200, 150));
}

#[test]
fn replay_cancelled_session_exports_nothing() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    std::fs::write(&script, "save\ndown 10 10\nmove 50 50\nup\ncancel\nconfirm\n").unwrap();
    let out_dir = temp.path().join("exports");

    sketchboard_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .arg("-o")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replayed 6 events, 0 exported"));

    assert!(!out_dir.join("selection.png").exists());
}

#[test]
fn replay_rejects_oversized_canvas() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    std::fs::write(&script, "export-canvas\n").unwrap();

    sketchboard_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .args(["--width", "4294967295", "--height", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--width"));
}

#[test]
fn replay_rejects_oversized_resize() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    std::fs::write(&script, "resize 4294967295 4294967295\nexport-canvas\n").unwrap();

    sketchboard_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the 16384px limit"));
}

#[test]
fn replay_rejects_unknown_events() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.txt");
    std::fs::write(&script, "save\nwiggle 1 2\n").unwrap();

    sketchboard_cmd(&temp)
        .arg("replay")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Line 2"));
}
