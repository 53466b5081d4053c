//! In-memory canvas that mirrors what a terminal would display.

use anyhow::{bail, Result};

use super::Canvas;
use crate::frame::{FrameText, Geometry};
use crate::glyph::Glyph;

/// Simulated terminal screen.
///
/// Keeps the current cell contents plus a few counters, so callers can check
/// what a playback actually drew.
#[derive(Debug, Clone)]
pub struct BufferCanvas {
    screen: FrameText,
    frames: usize,
    writes: usize,
    in_frame: bool,
}

impl BufferCanvas {
    pub fn new(geometry: Geometry) -> Self {
        Self::from_frame(FrameText::blank(geometry))
    }

    /// Start from an already painted screen.
    pub fn from_frame(screen: FrameText) -> Self {
        Self {
            screen,
            frames: 0,
            writes: 0,
            in_frame: false,
        }
    }

    pub fn screen(&self) -> &FrameText {
        &self.screen
    }

    /// Completed frames (`end_frame` calls).
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Total glyph writes.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Canvas for BufferCanvas {
    fn begin_frame(&mut self) -> Result<()> {
        if self.in_frame {
            bail!("frame {} was never finished", self.frames);
        }
        self.in_frame = true;
        Ok(())
    }

    fn put_glyph(&mut self, col: u16, row: u16, glyph: Glyph) -> Result<()> {
        if !self.screen.geometry().contains(col, row) {
            bail!(
                "cell ({}, {}) is outside the {} screen",
                col,
                row,
                self.screen.geometry()
            );
        }
        self.screen.set(col, row, glyph);
        self.writes += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        if !self.in_frame {
            bail!("end_frame without begin_frame");
        }
        self.in_frame = false;
        self.frames += 1;
        Ok(())
    }
}
