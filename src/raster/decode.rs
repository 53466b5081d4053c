//! BMP decoding.
//!
//! Bitmaps are decoded with the `image` crate and normalised to RGBA8, so the
//! luminance byte sits at a fixed offset inside each 4-byte pixel.

use std::fs;
use std::path::Path;

use image::ImageFormat;

use super::{ChannelSelect, LumaFrame};
use crate::error::PipelineError;

/// Decode one bitmap file and extract its luminance channel.
pub fn decode_bitmap(path: &Path, channel: ChannelSelect) -> Result<LumaFrame, PipelineError> {
    let decode_err = |message: String| PipelineError::Decode {
        path: path.to_path_buf(),
        message,
    };

    let bytes = fs::read(path).map_err(|e| decode_err(e.to_string()))?;
    let image = image::load_from_memory_with_format(&bytes, ImageFormat::Bmp)
        .map_err(|e| decode_err(e.to_string()))?;

    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    let raw = rgba.into_raw();

    LumaFrame::from_interleaved(&raw, width, height, channel).ok_or_else(|| {
        decode_err(format!(
            "{} bytes do not hold {}x{} pixels of {} bytes",
            raw.len(),
            width,
            height,
            channel.stride()
        ))
    })
}
