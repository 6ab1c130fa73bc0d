//! Player state and repeat policy.

/// Lifecycle of a [`Player`](super::Player).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing shown yet
    Idle,
    /// Frames are being written
    Playing,
    /// Playback finished, failed, or was interrupted
    Stopped,
}

/// How many extra times an animation is replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop until interrupted
    Forever,
    /// Play the sequence `n + 1` times
    Times(u32),
}

impl Repeat {
    /// Interpret a signed repeat count: any negative value loops forever.
    pub fn from_count(count: i64) -> Self {
        if count < 0 {
            Self::Forever
        } else {
            Self::Times(count.min(u32::MAX as i64) as u32)
        }
    }

    /// Total passes over the frame sequence, `None` when unbounded.
    pub fn passes(&self) -> Option<u64> {
        match self {
            Self::Forever => None,
            Self::Times(n) => Some(*n as u64 + 1),
        }
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Times(0)
    }
}
