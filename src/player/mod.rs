//! Terminal image player
//!
//! Writes the frames of a [`TerminalImage`] to a terminal over time:
//!
//! - each frame waits out its duration, then is printed after two blank lines
//! - stills are shown exactly once
//! - animations repeat a fixed number of times or loop until interrupted
//!
//! # Architecture
//!
//! - `state`: [`PlayerState`] lifecycle and the [`Repeat`] policy
//! - `pacer`: the [`Pacer`] seam used to wait between frames
//!
//! Whenever playback ends abnormally (a write error or the stop flag being
//! raised) a style reset is written before the error is returned, so the
//! terminal is never left colored.
//!
//! # Usage
//!
//! ```no_run
//! use termimage::player::{Player, Repeat, ThreadPacer};
//! # fn demo(image: &termimage::TerminalImage) -> Result<(), termimage::player::PlayError> {
//! let mut player = Player::new(std::io::stdout().lock(), ThreadPacer);
//! player.show(image, true, Repeat::Times(2))?;
//! # Ok(())
//! # }
//! ```

mod pacer;
mod state;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::palette::RESET;
use crate::sequence::{RenderedFrame, TerminalImage};

pub use pacer::{Pacer, RecordingPacer, ThreadPacer};
pub use state::{PlayerState, Repeat};

/// Errors that end playback.
#[derive(Debug, thiserror::Error)]
pub enum PlayError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] io::Error),

    #[error("Playback interrupted")]
    Interrupted,
}

/// Writes a style reset on drop unless disarmed.
struct StyleGuard<'a, W: Write> {
    out: &'a mut W,
    armed: bool,
}

impl<'a, W: Write> StyleGuard<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, armed: true }
    }

    fn write_frame(&mut self, frame: &RenderedFrame) -> io::Result<()> {
        self.out.write_all(b"\n\n")?;
        self.out.write_all(frame.display().as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<W: Write> Drop for StyleGuard<'_, W> {
    fn drop(&mut self) {
        if self.armed {
            // Best effort: the original error is what gets reported
            let _ = self.out.write_all(RESET.as_bytes());
            let _ = self.out.write_all(b"\n");
            let _ = self.out.flush();
            tracing::debug!("reset terminal style after aborted playback");
        }
    }
}

/// Plays terminal images on a writer.
pub struct Player<W: Write, P: Pacer> {
    out: W,
    pacer: P,
    stop: Arc<AtomicBool>,
    state: PlayerState,
}

impl<W: Write, P: Pacer> Player<W, P> {
    pub fn new(out: W, pacer: P) -> Self {
        Self {
            out,
            pacer,
            stop: Arc::new(AtomicBool::new(false)),
            state: PlayerState::Idle,
        }
    }

    /// Share an externally controlled stop flag (e.g. set from a Ctrl-C handler).
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// The flag that interrupts playback when set.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn into_parts(self) -> (W, P) {
        (self.out, self.pacer)
    }

    /// Animate images with more than one frame, show stills once.
    pub fn play(&mut self, image: &TerminalImage, repeat: Repeat) -> Result<(), PlayError> {
        if image.is_animated() {
            self.show(image, true, repeat)
        } else {
            self.show(image, false, Repeat::Times(0))
        }
    }

    /// Show `image`.
    ///
    /// When `animated` is false only the first frame is shown, once, and
    /// `repeat` is ignored. Otherwise the whole sequence is played as many
    /// times as `repeat` asks for.
    pub fn show(
        &mut self,
        image: &TerminalImage,
        animated: bool,
        repeat: Repeat,
    ) -> Result<(), PlayError> {
        let (frames, passes) = if animated {
            (image.frames(), repeat.passes())
        } else {
            (&image.frames()[..1], Some(1))
        };

        self.state = PlayerState::Playing;
        tracing::debug!(frames = frames.len(), ?passes, "starting playback");

        let pacer = &mut self.pacer;
        let stop = &self.stop;
        let mut guard = StyleGuard::new(&mut self.out);

        let result = match passes {
            Some(passes) => {
                (0..passes).try_for_each(|_| play_pass(frames, &mut guard, &mut *pacer, stop))
            }
            None => loop {
                if let Err(e) = play_pass(frames, &mut guard, &mut *pacer, stop) {
                    break Err(e);
                }
            },
        };

        if result.is_ok() {
            guard.disarm();
        } else {
            drop(guard);
        }
        self.state = PlayerState::Stopped;
        result
    }
}

fn play_pass<W: Write, P: Pacer>(
    frames: &[RenderedFrame],
    guard: &mut StyleGuard<'_, W>,
    pacer: &mut P,
    stop: &AtomicBool,
) -> Result<(), PlayError> {
    for frame in frames {
        check_stop(stop)?;
        pacer.wait(frame.duration());
        check_stop(stop)?;
        guard.write_frame(frame)?;
    }
    Ok(())
}

fn check_stop(stop: &AtomicBool) -> Result<(), PlayError> {
    if stop.load(Ordering::SeqCst) {
        Err(PlayError::Interrupted)
    } else {
        Ok(())
    }
}
