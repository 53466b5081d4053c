//! Frame text: a full grid of braille glyphs for one video frame.
//!
//! Frames are persisted between stages as plain text, one newline-terminated
//! line per cell row.

mod store;

use std::fmt;
use std::path::Path;

use crate::error::PipelineError;
use crate::glyph::{Glyph, BLOCK_HEIGHT, BLOCK_WIDTH};

pub use store::WorkDir;

/// Cell dimensions of a run. Fixed for every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    /// Width in cells
    pub cols: u16,
    /// Height in cells
    pub rows: u16,
}

impl Geometry {
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Source bitmap width in pixels (two dots per cell).
    pub fn pixel_width(&self) -> u32 {
        self.cols as u32 * BLOCK_WIDTH as u32
    }

    /// Source bitmap height in pixels (four dots per cell).
    pub fn pixel_height(&self) -> u32 {
        self.rows as u32 * BLOCK_HEIGHT as u32
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col < self.cols && row < self.rows
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} cells", self.cols, self.rows)
    }
}

/// One rendered frame. Cells are stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameText {
    geometry: Geometry,
    cells: Vec<Glyph>,
}

impl FrameText {
    /// A frame with every dot off.
    pub fn blank(geometry: Geometry) -> Self {
        Self {
            geometry,
            cells: vec![Glyph::BLANK; geometry.cell_count()],
        }
    }

    /// Build a frame by evaluating `glyph_at(col, row)` in row-major order.
    pub fn from_fn(geometry: Geometry, mut glyph_at: impl FnMut(u16, u16) -> Glyph) -> Self {
        let mut cells = Vec::with_capacity(geometry.cell_count());
        for row in 0..geometry.rows {
            for col in 0..geometry.cols {
                cells.push(glyph_at(col, row));
            }
        }
        Self { geometry, cells }
    }

    /// Build a frame from row-major cells. Returns `None` if the cell count
    /// does not match the geometry.
    pub fn from_cells(geometry: Geometry, cells: Vec<Glyph>) -> Option<Self> {
        (cells.len() == geometry.cell_count()).then_some(Self { geometry, cells })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn get(&self, col: u16, row: u16) -> Option<Glyph> {
        self.index(col, row).map(|i| self.cells[i])
    }

    /// Overwrite one cell. Out-of-bounds writes are ignored.
    pub fn set(&mut self, col: u16, row: u16, glyph: Glyph) {
        if let Some(i) = self.index(col, row) {
            self.cells[i] = glyph;
        }
    }

    pub fn cells(&self) -> &[Glyph] {
        &self.cells
    }

    /// Iterate over rows as glyph slices.
    pub fn rows(&self) -> impl Iterator<Item = &[Glyph]> {
        // chunks() panics on zero, and a zero-width frame has no cells anyway
        self.cells.chunks(self.geometry.cols.max(1) as usize)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|g| g.is_blank())
    }

    /// Serialize as one newline-terminated line per row.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.geometry.rows as usize);
        for row in self.rows() {
            out.extend(row.iter().map(|g| g.as_char()));
            out.push('\n');
        }
        out
    }

    /// Parse a persisted frame. `path` is only used for error messages.
    pub fn parse(text: &str, path: &Path) -> Result<Self, PipelineError> {
        let invalid = |message: String| PipelineError::InvalidFrameText {
            path: path.to_path_buf(),
            message,
        };

        let mut cells = Vec::with_capacity(text.len() / 3);
        let mut cols: Option<usize> = None;
        let mut rows = 0usize;

        for (row, line) in text.lines().enumerate() {
            let before = cells.len();
            for ch in line.chars() {
                let glyph = Glyph::from_char(ch).ok_or_else(|| {
                    invalid(format!("non-braille character {:?} on line {}", ch, row + 1))
                })?;
                cells.push(glyph);
            }
            let width = cells.len() - before;
            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(invalid(format!(
                        "line {} has {} cells, expected {}",
                        row + 1,
                        width,
                        expected
                    )));
                }
                Some(_) => {}
            }
            rows += 1;
        }

        let cols = cols.unwrap_or(0);
        let geometry = match (u16::try_from(cols), u16::try_from(rows)) {
            (Ok(cols), Ok(rows)) => Geometry::new(cols, rows),
            _ => return Err(invalid(format!("{}x{} cells is too large", cols, rows))),
        };

        Ok(Self { geometry, cells })
    }

    fn index(&self, col: u16, row: u16) -> Option<usize> {
        if !self.geometry.contains(col, row) {
            return None;
        }
        Some(row as usize * self.geometry.cols as usize + col as usize)
    }
}
