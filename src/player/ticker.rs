//! Fixed-rate tick source.
//!
//! Tick `k` is due at `start + k * period`; the first tick fires immediately.
//! A late tick fires as soon as it is waited on. Ticks are never skipped or
//! merged, so a slow frame delays the following ones instead of dropping them.

use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    start: Option<Instant>,
    ticks: u32,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            start: None,
            ticks: 0,
        }
    }

    /// Block until the next tick is due. Returns the tick number.
    pub fn wait(&mut self) -> u32 {
        let start = *self.start.get_or_insert_with(Instant::now);
        let due = start + self.period * self.ticks;
        let now = Instant::now();
        if due > now {
            thread::sleep(due - now);
        }
        let tick = self.ticks;
        self.ticks += 1;
        tick
    }

    /// Time since the first tick.
    pub fn elapsed(&self) -> Duration {
        self.start.map(|s| s.elapsed()).unwrap_or_default()
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }
}
