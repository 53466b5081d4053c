//! Shared test helpers: a scripted transcoder and source fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use braille_play::transcode::{TranscodeRequest, Transcoder};
use braille_play::PipelineError;
use image::{GrayImage, ImageFormat, Luma};
use tempfile::TempDir;

/// Transcoder that writes a fixed list of grayscale bitmaps.
///
/// Each frame is given as a predicate over pixel coordinates; lit pixels are
/// white, the rest black. Bitmaps are scaled to the requested size.
pub struct ScriptedTranscoder {
    frames: Vec<Box<dyn Fn(u32, u32) -> bool + Send + Sync>>,
}

impl ScriptedTranscoder {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    pub fn frame(mut self, lit: impl Fn(u32, u32) -> bool + Send + Sync + 'static) -> Self {
        self.frames.push(Box::new(lit));
        self
    }
}

impl Transcoder for ScriptedTranscoder {
    fn name(&self) -> &str {
        "scripted"
    }

    fn transcode(&self, request: &TranscodeRequest<'_>) -> Result<(), PipelineError> {
        let pattern = request.output_pattern.to_string_lossy();
        for (i, lit) in self.frames.iter().enumerate() {
            let path = PathBuf::from(pattern.replace("%d", &(i + 1).to_string()));
            let img = GrayImage::from_fn(request.width, request.height, |x, y| {
                Luma([if lit(x, y) { 255 } else { 0 }])
            });
            img.save_with_format(&path, ImageFormat::Bmp)
                .map_err(|e| PipelineError::ExternalTool {
                    tool: "scripted".into(),
                    message: e.to_string(),
                })?;
        }
        Ok(())
    }
}

/// A placeholder source video inside a fresh temp dir.
///
/// The scripted transcoder never reads it; it only has to exist.
pub fn source_fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("clip.mp4");
    fs::write(&path, b"not really a video").expect("Failed to write source fixture");
    (dir, path)
}

/// Entries directly under `dir`.
pub fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}
