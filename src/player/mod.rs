//! Playback of diff sequences
//!
//! # Architecture
//!
//! - `state`: `PlaybackClock`, the {Playing, Done} state machine
//! - `ticker`: fixed-rate tick source
//! - `cancel`: cooperative cancellation token (wired to Ctrl-C by the CLI)
//! - `scheduler`: the tick loop that applies one diff list per tick
//!
//! # Usage
//!
//! ```no_run
//! use braille_play::diff::DiffSequence;
//! use braille_play::player::{play_diffs, tick_period_for, CancelToken, PlaybackResult};
//! use braille_play::terminal::TerminalCanvas;
//!
//! let diffs = DiffSequence::default();
//! let mut canvas = TerminalCanvas::stdout();
//! match play_diffs(&diffs, tick_period_for(30), &mut canvas, &CancelToken::new()).unwrap() {
//!     PlaybackResult::Completed(stats) => println!("Played {} frames", stats.frames),
//!     PlaybackResult::Interrupted(_) => println!("Stopped by user"),
//! }
//! ```

mod cancel;
mod scheduler;
pub mod state;
mod ticker;

pub use cancel::CancelToken;
pub use scheduler::{play_diffs, PlaybackResult, PlaybackStats};
pub use state::{tick_period_for, Phase, PlaybackClock, TickAction};
pub use ticker::Ticker;
