//! Tick-driven replay of a diff sequence.

use std::time::Duration;

use anyhow::Result;

use super::cancel::CancelToken;
use super::state::{PlaybackClock, TickAction};
use super::ticker::Ticker;
use crate::diff::DiffSequence;
use crate::terminal::Canvas;

/// Counters for a finished playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStats {
    /// Diff lists applied
    pub frames: usize,
    /// Wall time from the first tick to the last
    pub elapsed: Duration,
}

/// How a playback ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackResult {
    /// Every diff list was applied
    Completed(PlaybackStats),
    /// Cancelled before the end of the sequence
    Interrupted(PlaybackStats),
}

impl PlaybackResult {
    pub fn stats(&self) -> PlaybackStats {
        match self {
            Self::Completed(s) | Self::Interrupted(s) => *s,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Apply one diff list per tick until the sequence is exhausted.
///
/// Each tick first checks `cancel`, then either draws the diff list at the
/// current index as one frame or finishes. A sequence of `n` lists played at
/// period `p` completes on tick `n`, roughly `n * p` after the start.
pub fn play_diffs<C: Canvas + ?Sized>(
    diffs: &DiffSequence,
    tick_period: Duration,
    canvas: &mut C,
    cancel: &CancelToken,
) -> Result<PlaybackResult> {
    let mut clock = PlaybackClock::new(tick_period);
    let mut ticker = Ticker::new(clock.tick_period);

    tracing::info!(
        frames = diffs.len(),
        period_ms = tick_period.as_millis() as u64,
        "playback started"
    );

    loop {
        ticker.wait();

        if cancel.is_cancelled() {
            let stats = PlaybackStats {
                frames: clock.frame_index,
                elapsed: ticker.elapsed(),
            };
            tracing::info!(frames = stats.frames, "playback interrupted");
            return Ok(PlaybackResult::Interrupted(stats));
        }

        match clock.tick(diffs.len()) {
            TickAction::Apply(index) => {
                canvas.begin_frame()?;
                for d in diffs.get(index).unwrap_or_default() {
                    canvas.put_glyph(d.col, d.row, d.glyph)?;
                }
                canvas.end_frame()?;
            }
            TickAction::Finish => break,
        }
    }

    let stats = PlaybackStats {
        frames: clock.frame_index,
        elapsed: ticker.elapsed(),
    };
    tracing::info!(
        frames = stats.frames,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        "playback finished"
    );
    Ok(PlaybackResult::Completed(stats))
}
