//! Braille glyph encoding.
//!
//! A terminal cell covers a 2x4 block of source pixels. Each of the eight
//! dots has a fixed weight in the Unicode braille block (U+2800..U+28FF):
//!
//! ```text
//!   col 0  col 1
//!   0x01   0x08    row 0
//!   0x02   0x10    row 1
//!   0x04   0x20    row 2
//!   0x40   0x80    row 3
//! ```
//!
//! The glyph's code point is `0x2800 + sum(weight * bit)`.

use std::fmt;

/// First code point of the braille patterns block (all dots off).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Dot columns per cell.
pub const BLOCK_WIDTH: usize = 2;

/// Dot rows per cell.
pub const BLOCK_HEIGHT: usize = 4;

/// Dot weights in canonical order (left column top-to-bottom, then right column).
const DOT_WEIGHTS: [u8; 8] = [0x01, 0x02, 0x04, 0x40, 0x08, 0x10, 0x20, 0x80];

/// A single braille character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph(char);

impl Glyph {
    /// All dots off.
    pub const BLANK: Glyph = Glyph::from_bits(0);

    /// All dots on.
    pub const FULL: Glyph = Glyph::from_bits(0xFF);

    /// Build a glyph from its dot bits (bit `n` set means weight `1 << n` is on).
    pub const fn from_bits(bits: u8) -> Self {
        match char::from_u32(BRAILLE_BASE + bits as u32) {
            Some(ch) => Glyph(ch),
            // U+2800..=U+28FF contains no surrogates
            None => unreachable!(),
        }
    }

    /// Accept a character only if it lies in the braille patterns block.
    pub fn from_char(ch: char) -> Option<Self> {
        let code = ch as u32;
        (BRAILLE_BASE..=BRAILLE_BASE + 0xFF)
            .contains(&code)
            .then_some(Glyph(ch))
    }

    /// Dot bits of this glyph.
    pub fn bits(self) -> u8 {
        (self.0 as u32 - BRAILLE_BASE) as u8
    }

    pub fn as_char(self) -> char {
        self.0
    }

    pub fn is_blank(self) -> bool {
        self == Self::BLANK
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Thresholded 2x4 pixel block, in canonical dot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelBlock([bool; 8]);

impl PixelBlock {
    /// Wrap dots given in canonical order.
    pub fn new(dots: [bool; 8]) -> Self {
        Self(dots)
    }

    /// Build a block by sampling `on(dx, dy)` for `dx` in 0..2, `dy` in 0..4.
    pub fn from_fn(mut on: impl FnMut(usize, usize) -> bool) -> Self {
        let mut dots = [false; 8];
        for dx in 0..BLOCK_WIDTH {
            for dy in 0..BLOCK_HEIGHT {
                dots[dx * BLOCK_HEIGHT + dy] = on(dx, dy);
            }
        }
        Self(dots)
    }

    /// Unpack an 8-bit pattern where bit `i` is canonical dot `i`.
    pub fn from_pattern(pattern: u8) -> Self {
        let mut dots = [false; 8];
        for (i, dot) in dots.iter_mut().enumerate() {
            *dot = pattern & (1 << i) != 0;
        }
        Self(dots)
    }

    pub fn dots(&self) -> &[bool; 8] {
        &self.0
    }
}

/// Encode one pixel block as a braille glyph.
pub fn encode(block: &PixelBlock) -> Glyph {
    let bits = block
        .0
        .iter()
        .zip(DOT_WEIGHTS)
        .fold(0u8, |acc, (&on, weight)| acc | (weight * on as u8));
    Glyph::from_bits(bits)
}
