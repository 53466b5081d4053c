//! Crossterm-backed canvas.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, RestorePosition, SavePosition, Show},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};

use super::Canvas;
use crate::frame::Geometry;
use crate::glyph::Glyph;

/// Query the attached terminal's size as a cell geometry.
///
/// Returns `None` when no terminal is attached (pipes, CI).
pub fn terminal_geometry() -> Option<Geometry> {
    match terminal::size() {
        Ok((cols, rows)) if cols > 0 && rows > 0 => Some(Geometry::new(cols, rows)),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "terminal size unavailable");
            None
        }
    }
}

/// Writes glyphs with cursor-addressed escape sequences.
pub struct TerminalCanvas<W: Write> {
    out: W,
    entered: bool,
}

impl TerminalCanvas<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalCanvas<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            entered: false,
        }
    }

    /// Clear the screen and hide the cursor for playback.
    pub fn enter(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0), Hide)?;
        self.out.flush().context("Failed to prepare terminal")?;
        self.entered = true;
        Ok(())
    }

    /// Show the cursor again and move it below the animation.
    pub fn exit(&mut self, rows: u16) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        queue!(self.out, MoveTo(0, rows.saturating_sub(1)), Print("\r\n"), Show)?;
        self.out.flush().context("Failed to restore terminal")?;
        self.entered = false;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn begin_frame(&mut self) -> Result<()> {
        queue!(self.out, SavePosition)?;
        Ok(())
    }

    fn put_glyph(&mut self, col: u16, row: u16, glyph: Glyph) -> Result<()> {
        queue!(self.out, MoveTo(col, row), Print(glyph.as_char()))?;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        queue!(self.out, RestorePosition)?;
        self.out.flush().context("Failed to flush frame")?;
        Ok(())
    }
}
