//! Integration tests for the termimage binary

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use super::helpers::write_png;

/// Helper to run the termimage CLI and capture output
fn run_termimage(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_termimage"))
        .args(args)
        .output()
        .expect("Failed to execute termimage");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn missing_path_prints_usage() {
    Command::cargo_bin("termimage")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_describes_arguments() {
    let (stdout, _stderr, exit_code) = run_termimage(&["--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("<PATH>"));
    assert!(stdout.contains("--repeat"));
}

#[test]
fn still_png_is_printed_once_and_exits_zero() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "still.png", &[&[[255, 255, 255], [204, 0, 0]]]);
    let palette = dir.path().join("palette.png");

    let (stdout, _stderr, exit_code) = run_termimage(&[
        png.to_str().unwrap(),
        "--quiet",
        "--palette",
        palette.to_str().unwrap(),
    ]);

    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("\n\n\x1b["));
    assert!(stdout.ends_with("\x1b[0m\n"));
    assert_eq!(stdout.matches("\x1b[0m").count(), 1);

    // All rows have the same width
    let body = stdout.trim_start_matches('\n').trim_end_matches("\x1b[0m\n");
    let widths: Vec<usize> = body
        .lines()
        .map(|line| line.chars().filter(|c| *c == '█').count())
        .collect();
    assert!(!widths.is_empty());
    assert!(widths.iter().all(|w| *w == widths[0] && *w > 0));

    assert!(palette.exists(), "palette image should be regenerated");
}

#[test]
fn unreadable_input_without_transcoder_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"not an image").unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[video]\nffmpeg = \"termimage-missing-ffmpeg\"\n").unwrap();
    let palette = dir.path().join("palette.png");

    let (_stdout, stderr, exit_code) = run_termimage(&[
        input.to_str().unwrap(),
        "--quiet",
        "--config",
        config.to_str().unwrap(),
        "--palette",
        palette.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Failed to display"), "stderr: {}", stderr);
    assert!(!dir.path().join("clip.mp4.temp.gif").exists());
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "still.png", &[&[[255, 255, 255]]]);
    let config = dir.path().join("config.toml");
    fs::write(&config, "[render]\nmargin = -3\n").unwrap();

    let (_stdout, stderr, exit_code) =
        run_termimage(&[png.to_str().unwrap(), "--config", config.to_str().unwrap()]);

    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Invalid config"), "stderr: {}", stderr);
}

#[test]
fn status_line_is_written_to_stderr_unless_quiet() {
    let dir = TempDir::new().unwrap();
    let png = write_png(&dir, "still.png", &[&[[255, 255, 255]]]);
    let palette = dir.path().join("palette.png");

    let output = Command::new(env!("CARGO_BIN_EXE_termimage"))
        .env_remove("TERMIMAGE_LOG")
        .args([png.to_str().unwrap(), "--palette", palette.to_str().unwrap()])
        .output()
        .expect("Failed to execute termimage");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr).replace('\r', "<CR>");
    insta::with_settings!({filters => vec![
        (r"time=\s*\d+ms", "time=[ms]"),
        (r"chars=\s*\d+", "chars=[n]"),
    ]}, {
        insta::assert_snapshot!(stderr.trim_end(), @"<CR>frame=   1 time=[ms] chars=[n]");
    });
}

#[test]
fn video_fallback_announces_conversion() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("clip.mp4");
    fs::write(&input, b"not an image").unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[video]\nffmpeg = \"termimage-missing-ffmpeg\"\n").unwrap();
    let palette = dir.path().join("palette.png");

    let (_stdout, stderr, exit_code) = run_termimage(&[
        input.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--palette",
        palette.to_str().unwrap(),
    ]);

    assert_ne!(exit_code, 0);
    let notice = stderr.find("Start converting video into gif").expect("notice on stderr");
    let error = stderr.find("Failed to display").expect("error on stderr");
    assert!(notice < error, "stderr: {}", stderr);
}
