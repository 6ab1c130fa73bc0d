//! Integration tests for decode -> quantize -> render -> sequence

use std::path::Path;
use std::time::Duration;

use tempfile::TempDir;

use super::helpers::{sequencer, visible, write_gif, write_png, FailingTranscoder};
use termimage::sequence::{FrameProgress, DEFAULT_FRAME_DURATION};
use termimage::{Loader, NullStatus, TerminalImage};

const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [204, 0, 0];
const BLACK: [u8; 3] = [30, 34, 36];

fn load(cols: u16, rows: u16, path: &Path) -> TerminalImage {
    let sequencer = sequencer(cols, rows);
    let loader = Loader {
        sequencer: &sequencer,
        transcoder: &FailingTranscoder { code: 1 },
        palette_image: Path::new("unused-palette.png"),
    };
    loader.load(path, &mut NullStatus).expect("load fixture")
}

#[test]
fn golden_render_of_small_png() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "small.png", &[&[WHITE, WHITE, RED, RED], &[RED, BLACK, BLACK, WHITE]]);

    // 6x4 terminal minus the 2-cell margin is exactly the image size
    let image = load(6, 4, &path);
    insta::assert_snapshot!(
        visible(image.first().display()),
        @"<37m<1m██<31m<22m██|█<30m<2m██<37m<1m█<0m"
    );
}

#[test]
fn golden_render_of_upscaled_png() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "pair.png", &[&[WHITE, RED]]);

    let image = load(6, 4, &path);
    insta::assert_snapshot!(
        visible(image.first().display()),
        @"<37m<1m██<31m<22m██|<37m<1m██<31m<22m██<0m"
    );
}

#[test]
fn rendering_is_byte_identical_across_runs() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "mixed.png", &[&[WHITE, RED, BLACK], &[BLACK, WHITE, RED], &[RED, BLACK, WHITE]]);

    let first = load(40, 12, &path);
    let second = load(40, 12, &path);
    assert_eq!(first.first().display(), second.first().display());
}

#[test]
fn still_image_has_one_frame() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "still.png", &[&[WHITE]]);

    let image = load(20, 10, &path);
    assert_eq!(image.len(), 1);
    assert_eq!(image.first().duration(), DEFAULT_FRAME_DURATION);
}

#[test]
fn animated_gif_keeps_frame_order_and_timing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[(WHITE, 30), (RED, 60), (BLACK, 0)]);

    let image = load(10, 6, &path);
    assert_eq!(image.len(), 3);

    let durations: Vec<_> = image.frames().iter().map(|f| f.duration()).collect();
    assert_eq!(
        durations,
        vec![Duration::from_millis(30), Duration::from_millis(60), DEFAULT_FRAME_DURATION]
    );
    // Each 8x4 frame is one solid color: a single styled glyph, then bare blocks
    for frame in image.frames() {
        assert_eq!(frame.display().matches('\x1b').count(), 3);
    }
}

#[test]
fn status_sink_sees_each_frame() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[(WHITE, 10), (RED, 10)]);

    let sequencer = sequencer(10, 6);
    let loader = Loader {
        sequencer: &sequencer,
        transcoder: &FailingTranscoder { code: 1 },
        palette_image: Path::new("unused-palette.png"),
    };
    let mut status: Vec<FrameProgress> = Vec::new();
    let image = loader.load(&path, &mut status).unwrap();

    assert_eq!(status.len(), 2);
    assert_eq!(status[1].chars, image.char_count());
}
