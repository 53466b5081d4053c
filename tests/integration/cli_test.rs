//! Binary-level tests: argument handling, exit codes and cleanup

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::{entries, source_fixture};

/// The binary with an isolated (absent) config file and no color.
fn braille_play(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("braille-play").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("BRAILLE_PLAY_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_argument_is_usage_error() {
    let config = TempDir::new().unwrap();
    braille_play(&config)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_describes_source_argument() {
    let config = TempDir::new().unwrap();
    braille_play(&config)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<SOURCE>"))
        .stdout(predicate::str::contains("--fps"));
}

#[test]
fn version_includes_commit() {
    let config = TempDir::new().unwrap();
    braille_play(&config)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")))
        .stdout(predicate::str::contains("commit"));
}

#[test]
fn missing_source_exits_with_failure() {
    let config = TempDir::new().unwrap();
    braille_play(&config)
        .arg("/nonexistent/clip.mp4")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source video not found"));
}

#[test]
fn invalid_channel_offset_is_rejected() {
    let config = TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();
    braille_play(&config)
        .args(["--channel-offset", "4"])
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("channel offset 4"));
}

#[test]
fn broken_config_file_is_reported() {
    let config = TempDir::new().unwrap();
    fs::write(config.path().join("config.toml"), "[playback\nfps = ").unwrap();
    let (_src_dir, source) = source_fixture();
    braille_play(&config)
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config file"));
}

#[test]
fn explicit_config_must_exist() {
    let config = TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();
    braille_play(&config)
        .arg("--config")
        .arg(config.path().join("missing.toml"))
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[cfg(unix)]
#[test]
fn failing_transcoder_leaves_no_working_directory() {
    let config = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();

    braille_play(&config)
        .args(["--ffmpeg", "false", "--work-dir"])
        .arg(parent.path())
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("External tool 'ffmpeg' failed"));

    assert_eq!(entries(parent.path()), 0);
}

#[test]
fn missing_transcoder_binary_is_reported() {
    let config = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();

    braille_play(&config)
        .args(["--ffmpeg", "/nonexistent/ffmpeg-binary", "--work-dir"])
        .arg(parent.path())
        .arg(&source)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to launch"));

    assert_eq!(entries(parent.path()), 0);
}

#[cfg(unix)]
#[test]
fn ctrl_c_during_transcoding_removes_working_directory() {
    use std::os::unix::fs::PermissionsExt;

    let config = TempDir::new().unwrap();
    let parent = TempDir::new().unwrap();
    let (src_dir, source) = source_fixture();

    // Stand-in ffmpeg: leaves one bitmap behind, then sends SIGINT to
    // braille-play as a terminal would on Ctrl-C.
    let script = src_dir.path().join("fake-ffmpeg.sh");
    fs::write(
        &script,
        "#!/bin/sh\n\
         for last; do :; done\n\
         printf 'BM' > \"$(dirname \"$last\")/image_1.bmp\"\n\
         kill -INT $PPID\n\
         sleep 1\n\
         exit 0\n",
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

    braille_play(&config)
        .arg("--ffmpeg")
        .arg(&script)
        .arg("--work-dir")
        .arg(parent.path())
        .arg(&source)
        .assert()
        .code(130)
        .stderr(predicate::str::contains("Interrupted during transcoding"));

    assert_eq!(entries(parent.path()), 0);
}
