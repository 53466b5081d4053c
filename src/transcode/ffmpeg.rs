//! ffmpeg transcoder.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::{TranscodeRequest, Transcoder};
use crate::error::PipelineError;

/// Number of stderr lines kept in error messages.
const STDERR_TAIL_LINES: usize = 5;

/// Runs an `ffmpeg` binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Ffmpeg {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Build the video filter graph.
    ///
    /// Deinterlace, keep only the luma plane, square the pixels, resample to
    /// `fps`, fit inside `width x height` and pad with black to the exact size.
    pub fn filter_graph(width: u32, height: u32, fps: u32) -> String {
        [
            "yadif=deint=interlaced".to_string(),
            "extractplanes=y".to_string(),
            "scale=w=trunc(ih*dar/2)*2:h=trunc(ih/2)*2".to_string(),
            "setsar=1/1".to_string(),
            format!("fps={}", fps),
            format!(
                "scale=w={}:h={}:force_original_aspect_ratio=decrease",
                width, height
            ),
            format!(
                "pad=w={}:h={}:x=(ow-iw)/2:y=(oh-ih)/2:color=black",
                width, height
            ),
        ]
        .join(",")
    }

    /// Full argument list for one request.
    pub fn args(request: &TranscodeRequest<'_>) -> Vec<String> {
        vec![
            "-loglevel".into(),
            "error".into(),
            "-nostdin".into(),
            "-y".into(),
            "-i".into(),
            request.source.to_string_lossy().into_owned(),
            "-vf".into(),
            Self::filter_graph(request.width, request.height, request.fps),
            "-vcodec".into(),
            "bmp".into(),
            request.output_pattern.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder for Ffmpeg {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn transcode(&self, request: &TranscodeRequest<'_>) -> Result<(), PipelineError> {
        let args = Self::args(request);
        tracing::debug!(binary = %self.binary.display(), ?args, "running transcoder");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| PipelineError::ExternalTool {
                tool: self.name().to_string(),
                message: format!("failed to launch {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail: Vec<&str> = stderr
                .lines()
                .filter(|l| !l.trim().is_empty())
                .collect();
            let tail = tail[tail.len().saturating_sub(STDERR_TAIL_LINES)..].join("\n");

            let message = if tail.is_empty() {
                format!("exited with {}", output.status)
            } else {
                format!("exited with {}: {}", output.status, tail)
            };
            return Err(PipelineError::ExternalTool {
                tool: self.name().to_string(),
                message,
            });
        }

        Ok(())
    }
}
