//! Terminal output.
//!
//! Playback writes through the [`Canvas`] trait so the scheduler does not
//! depend on a real terminal:
//! - [`TerminalCanvas`]: crossterm-backed output to any writer (stdout in the CLI)
//! - [`BufferCanvas`]: in-memory cell grid, used to verify replays

mod buffer;
mod tty;

pub use buffer::BufferCanvas;
pub use tty::{terminal_geometry, TerminalCanvas};

use anyhow::Result;

use crate::frame::FrameText;
use crate::glyph::Glyph;

/// A fixed grid of glyph cells that frames are drawn onto.
pub trait Canvas {
    /// Start a frame (saves the cursor position on real terminals).
    fn begin_frame(&mut self) -> Result<()>;

    /// Write one glyph at a zero-based cell position.
    fn put_glyph(&mut self, col: u16, row: u16, glyph: Glyph) -> Result<()>;

    /// Finish a frame (restores the cursor and flushes).
    fn end_frame(&mut self) -> Result<()>;

    /// Draw every cell of `frame` as one frame.
    fn paint(&mut self, frame: &FrameText) -> Result<()> {
        self.begin_frame()?;
        for (row, cells) in frame.rows().enumerate() {
            for (col, &glyph) in cells.iter().enumerate() {
                self.put_glyph(col as u16, row as u16, glyph)?;
            }
        }
        self.end_frame()
    }
}
