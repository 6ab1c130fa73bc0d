//! Frame pacing.

use std::thread;
use std::time::Duration;

/// Waits out a frame's display duration.
pub trait Pacer {
    fn wait(&mut self, duration: Duration);
}

/// Blocks the current thread with `thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Records requested waits without sleeping.
#[derive(Debug, Default, Clone)]
pub struct RecordingPacer {
    pub waits: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn wait(&mut self, duration: Duration) {
        (**self).wait(duration);
    }
}
