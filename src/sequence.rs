//! Frame sequencing: decoded frames in, rendered terminal image out.
//!
//! The [`Sequencer`] owns the palette, its quantizer cube and the render
//! settings. It renders every frame of a decoded image exactly once and
//! collects the results into an immutable [`TerminalImage`].

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::decode::{DecodedFrame, DecodedImage};
use crate::palette::Palette;
use crate::quantize::Quantizer;
use crate::render::{render_image, RenderSettings};

/// Frame duration used when the source carries no timing.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(200);

/// A frame ready for the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFrame {
    display: String,
    duration: Duration,
}

impl RenderedFrame {
    pub fn new(display: String, duration: Duration) -> Self {
        Self { display, duration }
    }

    /// The styled text, ending in a style reset.
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    /// Length of the display string in characters.
    pub fn char_count(&self) -> usize {
        self.display.chars().count()
    }
}

/// An ordered, non-empty sequence of rendered frames.
#[derive(Clone, PartialEq, Eq)]
pub struct TerminalImage {
    frames: Vec<RenderedFrame>,
    char_count: usize,
}

impl TerminalImage {
    /// Wrap already rendered frames. Returns `None` for an empty list.
    pub fn from_frames(frames: Vec<RenderedFrame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        let char_count = frames.iter().map(RenderedFrame::char_count).sum();
        Some(Self { frames, char_count })
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[RenderedFrame] {
        &self.frames
    }

    pub fn first(&self) -> &RenderedFrame {
        &self.frames[0]
    }

    /// Total characters across all frames.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Iterate over the display strings in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(RenderedFrame::display)
    }
}

impl fmt::Display for TerminalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.first().display())
    }
}

impl fmt::Debug for TerminalImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalImage")
            .field("frames", &self.frames.len())
            .field("chars", &self.char_count)
            .finish()
    }
}

/// Progress report emitted after each frame is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameProgress {
    /// 1-based frame number
    pub frame: usize,
    /// Time since sequencing started
    pub elapsed: Duration,
    /// Characters rendered so far, this frame included
    pub chars: usize,
}

/// Receiver for per-frame progress while a terminal image is built.
pub trait StatusSink {
    fn frame_rendered(&mut self, progress: &FrameProgress);

    /// A one-line notice about what loading is doing next.
    fn notice(&mut self, _message: &str) {}

    /// Called once after the last frame.
    fn finished(&mut self) {}
}

/// Discards progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullStatus;

impl StatusSink for NullStatus {
    fn frame_rendered(&mut self, _progress: &FrameProgress) {}
}

/// Rewrites a single status line on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrStatus;

impl StderrStatus {
    /// Format one status line, without the trailing newline.
    pub fn format(progress: &FrameProgress) -> String {
        format!(
            "\rframe={:4} time={:6.0}ms chars={:9}",
            progress.frame,
            progress.elapsed.as_secs_f64() * 1000.0,
            progress.chars
        )
    }
}

impl StatusSink for StderrStatus {
    fn frame_rendered(&mut self, progress: &FrameProgress) {
        let mut stderr = io::stderr().lock();
        // Status output is best effort
        let _ = stderr.write_all(Self::format(progress).as_bytes());
        let _ = stderr.flush();
    }

    fn notice(&mut self, message: &str) {
        let _ = writeln!(io::stderr(), "{}", message);
    }

    fn finished(&mut self) {
        let _ = writeln!(io::stderr());
    }
}

impl StatusSink for Vec<FrameProgress> {
    fn frame_rendered(&mut self, progress: &FrameProgress) {
        self.push(*progress);
    }
}

/// Sequencing was stopped through the stop flag before the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Rendering interrupted")]
pub struct Interrupted;

/// Renders decoded images into terminal images.
#[derive(Debug, Clone)]
pub struct Sequencer {
    palette: Palette,
    quantizer: Quantizer,
    settings: RenderSettings,
    default_duration: Duration,
    stop: Arc<AtomicBool>,
}

impl Sequencer {
    /// Build the quantizer cube for `palette` and keep it for every frame.
    pub fn new(palette: Palette, settings: RenderSettings) -> Self {
        let quantizer = Quantizer::new(&palette);
        Self {
            palette,
            quantizer,
            settings,
            default_duration: DEFAULT_FRAME_DURATION,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the duration used for frames without timing.
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Share an externally controlled stop flag (e.g. set from a Ctrl-C handler).
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Whether the stop flag has been raised.
    pub fn is_stopped(&self) -> bool {
        self.stop.load(Ordering::SeqCst)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Render one frame.
    pub fn render_frame(&self, frame: &DecodedFrame) -> RenderedFrame {
        let display = render_image(&frame.image, &self.quantizer, &self.palette, &self.settings);
        RenderedFrame::new(display, frame.delay.unwrap_or(self.default_duration))
    }

    /// Render every frame of `decoded` in source order.
    ///
    /// The stop flag is checked before each frame.
    pub fn sequence(
        &self,
        decoded: &DecodedImage,
        status: &mut dyn StatusSink,
    ) -> Result<TerminalImage, Interrupted> {
        let start = Instant::now();
        let mut frames = Vec::with_capacity(decoded.len());
        let mut chars = 0;

        for (i, source) in decoded.frames().iter().enumerate() {
            if self.is_stopped() {
                tracing::debug!(rendered = i, "sequencing interrupted");
                return Err(Interrupted);
            }
            let frame = self.render_frame(source);
            chars += frame.char_count();
            frames.push(frame);

            let progress = FrameProgress {
                frame: i + 1,
                elapsed: start.elapsed(),
                chars,
            };
            tracing::debug!(
                frame = progress.frame,
                elapsed_ms = progress.elapsed.as_millis() as u64,
                chars,
                "rendered frame"
            );
            status.frame_rendered(&progress);
        }
        status.finished();

        Ok(TerminalImage {
            frames,
            char_count: chars,
        })
    }
}
