//! Integration tests for playing loaded images

use std::cell::RefCell;
use std::io::{self, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use tempfile::TempDir;

use super::helpers::{sequencer, write_gif, write_png, FailingTranscoder};
use termimage::player::{Pacer, Player, PlayerState, RecordingPacer, Repeat};
use termimage::{Loader, NullStatus, TerminalImage};

fn load(path: &Path) -> TerminalImage {
    let sequencer = sequencer(12, 6);
    let loader = Loader {
        sequencer: &sequencer,
        transcoder: &FailingTranscoder { code: 1 },
        palette_image: Path::new("unused-palette.png"),
    };
    loader.load(path, &mut NullStatus).unwrap()
}

fn play(image: &TerminalImage, animated: bool, repeat: Repeat) -> (String, Vec<Duration>) {
    let mut player = Player::new(Vec::new(), RecordingPacer::default());
    player.show(image, animated, repeat).unwrap();
    assert_eq!(player.state(), PlayerState::Stopped);
    let (out, pacer) = player.into_parts();
    (String::from_utf8(out).unwrap(), pacer.waits)
}

fn expected(frames: &[&str]) -> String {
    frames.iter().map(|f| format!("\n\n{}\n", f)).collect()
}

#[test]
fn animation_with_repeat_two_prints_every_frame_three_times() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[([255, 255, 255], 20), ([204, 0, 0], 40), ([78, 154, 6], 60)]);
    let image = load(&path);
    assert_eq!(image.len(), 3);

    let (out, waits) = play(&image, true, Repeat::Times(2));

    let frames: Vec<&str> = image.iter().collect();
    let order: Vec<&str> = (0..3).flat_map(|_| frames.iter().copied()).collect();
    assert_eq!(out, expected(&order));

    let ms: Vec<u128> = waits.iter().map(|d| d.as_millis()).collect();
    assert_eq!(ms, vec![20, 40, 60, 20, 40, 60, 20, 40, 60]);
}

#[test]
fn still_image_prints_once_whatever_the_repeat() {
    let dir = TempDir::new().unwrap();
    let path = write_png(&dir, "still.png", &[&[[255, 255, 255], [30, 34, 36]]]);
    let image = load(&path);

    for repeat in [Repeat::Times(0), Repeat::Times(3), Repeat::Forever] {
        let (out, waits) = play(&image, false, repeat);
        assert_eq!(out, expected(&[image.first().display()]));
        assert_eq!(waits.len(), 1);
    }
}

#[test]
fn non_animated_show_of_gif_uses_first_frame_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[([255, 255, 255], 20), ([204, 0, 0], 40)]);
    let image = load(&path);

    let (out, waits) = play(&image, false, Repeat::Times(5));
    assert_eq!(out, expected(&[image.first().display()]));
    assert_eq!(waits, vec![Duration::from_millis(20)]);
}

#[test]
fn every_printed_frame_ends_with_style_reset() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[([255, 255, 255], 10), ([204, 0, 0], 10)]);
    let image = load(&path);

    let (out, _) = play(&image, true, Repeat::Times(0));
    assert!(out.ends_with("\x1b[0m\n"));
    assert_eq!(out.matches("\x1b[0m").count(), 2);
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Wait(Duration),
    Print(String),
}

type Timeline = Rc<RefCell<Vec<Event>>>;

/// Pacer that logs each wait to the shared timeline.
struct TimelinePacer(Timeline);

impl Pacer for TimelinePacer {
    fn wait(&mut self, duration: Duration) {
        self.0.borrow_mut().push(Event::Wait(duration));
    }
}

/// Writer that logs everything written up to each flush as one print.
struct TimelineWriter {
    timeline: Timeline,
    pending: Vec<u8>,
}

impl Write for TimelineWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let text = String::from_utf8(std::mem::take(&mut self.pending)).unwrap();
            self.timeline.borrow_mut().push(Event::Print(text));
        }
        Ok(())
    }
}

#[test]
fn each_frame_waits_its_duration_before_printing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("anim.gif");
    write_gif(&path, &[([255, 255, 255], 20), ([204, 0, 0], 40), ([78, 154, 6], 60)]);
    let image = load(&path);

    let timeline: Timeline = Rc::default();
    let writer = TimelineWriter {
        timeline: Rc::clone(&timeline),
        pending: Vec::new(),
    };
    let mut player = Player::new(writer, TimelinePacer(Rc::clone(&timeline)));
    player.show(&image, true, Repeat::Times(2)).unwrap();

    let pass = image.frames().iter().flat_map(|frame| {
        [
            Event::Wait(frame.duration()),
            Event::Print(format!("\n\n{}\n", frame.display())),
        ]
    });
    let expected: Vec<Event> = (0..3).flat_map(|_| pass.clone()).collect();
    assert_eq!(*timeline.borrow(), expected);
}
