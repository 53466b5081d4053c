//! Frame rasterization: decoded bitmaps to braille frame text.
//!
//! # Module Structure
//!
//! - [`decode`] - BMP decoding and luminance channel extraction
//! - [`batch`] - Bounded, order-preserving parallel processing of frame batches
//!
//! Each output cell `(cx, cy)` samples the source pixels
//! `(cx*2 + dx, cy*4 + dy)` for `dx` in 0..2 and `dy` in 0..4. A pixel is on
//! when its luminance is strictly greater than the threshold.

mod batch;
mod decode;

pub use batch::{BatchProgress, BatchRasterizer};
pub use decode::decode_bitmap;

use crate::error::PipelineError;
use crate::frame::{FrameText, Geometry};
use crate::glyph::{encode, PixelBlock, BLOCK_HEIGHT, BLOCK_WIDTH};

/// Midpoint of the 0-255 luminance range.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Which byte of an interleaved pixel carries the luminance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSelect {
    offset: usize,
    stride: usize,
}

impl ChannelSelect {
    /// Bytes per pixel of the decoder's RGBA output.
    pub const RGBA_STRIDE: usize = 4;

    pub fn new(offset: usize, stride: usize) -> Result<Self, PipelineError> {
        if stride == 0 || offset >= stride {
            return Err(PipelineError::InvalidConfig(format!(
                "channel offset {} is outside a {}-byte pixel",
                offset, stride
            )));
        }
        Ok(Self { offset, stride })
    }

    /// Select byte `offset` of each 4-byte RGBA pixel.
    pub fn rgba(offset: usize) -> Result<Self, PipelineError> {
        Self::new(offset, Self::RGBA_STRIDE)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn stride(&self) -> usize {
        self.stride
    }
}

impl Default for ChannelSelect {
    /// Green channel of RGBA.
    fn default() -> Self {
        Self {
            offset: 1,
            stride: Self::RGBA_STRIDE,
        }
    }
}

/// A single-channel, row-major luminance buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaFrame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl LumaFrame {
    /// Returns `None` if `pixels` does not hold exactly `width * height` bytes.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Extract one channel from interleaved pixel bytes.
    pub fn from_interleaved(
        bytes: &[u8],
        width: u32,
        height: u32,
        channel: ChannelSelect,
    ) -> Option<Self> {
        let count = width as usize * height as usize;
        if bytes.len() != count * channel.stride {
            return None;
        }
        let pixels = bytes
            .iter()
            .skip(channel.offset)
            .step_by(channel.stride)
            .copied()
            .collect();
        Self::new(width, height, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

/// Converts luminance frames of one fixed geometry into frame texts.
#[derive(Debug, Clone, Copy)]
pub struct Rasterizer {
    geometry: Geometry,
    threshold: u8,
}

impl Rasterizer {
    pub fn new(geometry: Geometry, threshold: u8) -> Self {
        Self {
            geometry,
            threshold,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Rasterize one frame. The bitmap must be exactly the run's pixel size.
    pub fn rasterize(&self, luma: &LumaFrame) -> Result<FrameText, PipelineError> {
        let expected = (self.geometry.pixel_width(), self.geometry.pixel_height());
        if (luma.width, luma.height) != expected {
            return Err(PipelineError::pixel_mismatch(
                "rasterizer input",
                expected,
                (luma.width, luma.height),
            ));
        }

        Ok(FrameText::from_fn(self.geometry, |col, row| {
            let (px, py) = (
                col as u32 * BLOCK_WIDTH as u32,
                row as u32 * BLOCK_HEIGHT as u32,
            );
            encode(&PixelBlock::from_fn(|dx, dy| {
                luma.pixel(px + dx as u32, py + dy as u32) > self.threshold
            }))
        }))
    }
}
