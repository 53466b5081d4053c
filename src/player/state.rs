//! Playback clock state
//!
//! The scheduler is a two-state machine: `Playing` while diffs remain,
//! `Done` once the index reaches the end of the sequence.

use std::time::Duration;

/// Playback phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Diffs remain to be applied
    Playing,
    /// Sequence exhausted, no further ticks
    Done,
}

/// What a tick should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    /// Apply the diff list at this index
    Apply(usize),
    /// Stop scheduling ticks
    Finish,
}

/// Frame index and tick period for one playback.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    /// Index of the next diff list to apply
    pub frame_index: usize,
    /// Fixed duration of one tick
    pub tick_period: Duration,
    /// Current phase
    pub phase: Phase,
}

impl PlaybackClock {
    pub fn new(tick_period: Duration) -> Self {
        Self {
            frame_index: 0,
            tick_period,
            phase: Phase::Playing,
        }
    }

    /// Tick period for a frame rate (`1000 / fps` milliseconds).
    pub fn from_fps(fps: u32) -> Self {
        Self::new(tick_period_for(fps))
    }

    /// Advance one tick over a sequence of `len` diff lists.
    pub fn tick(&mut self, len: usize) -> TickAction {
        if self.phase == Phase::Done || self.frame_index >= len {
            self.phase = Phase::Done;
            return TickAction::Finish;
        }
        let index = self.frame_index;
        self.frame_index += 1;
        TickAction::Apply(index)
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }
}

/// Duration of one tick at `fps` frames per second.
pub fn tick_period_for(fps: u32) -> Duration {
    Duration::from_secs(1) / fps.max(1)
}
