//! Video transcoding into numbered bitmaps.
//!
//! The transcoder is an external tool behind the [`Transcoder`] trait. It
//! receives the source path, the target pixel size and frame rate, and must
//! leave `image_1.bmp`, `image_2.bmp`, ... in the output directory. Its
//! output is never parsed; the frame count is read back from the directory.

mod ffmpeg;

use std::path::Path;

pub use ffmpeg::Ffmpeg;

use crate::error::PipelineError;

/// Parameters for one transcoding run.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeRequest<'a> {
    pub source: &'a Path,
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    pub fps: u32,
    /// `printf`-style output pattern, e.g. `<dir>/image_%d.bmp`
    pub output_pattern: &'a Path,
}

/// A tool that turns a video into a directory of bitmaps.
pub trait Transcoder: Send + Sync {
    /// Tool name for error messages and logging.
    fn name(&self) -> &str;

    /// Run the tool to completion.
    fn transcode(&self, request: &TranscodeRequest<'_>) -> Result<(), PipelineError>;
}
