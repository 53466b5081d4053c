//! Pipeline errors.
//!
//! Every variant is fatal: the run is aborted, the working directory is
//! removed and the process exits non-zero. `Interrupted` is the user
//! pressing Ctrl-C, not a failure of any stage.

use std::path::PathBuf;

use crate::frame::Geometry;

/// Errors that can occur while preparing or playing an animation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Source video not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("External tool '{tool}' failed: {message}")]
    ExternalTool { tool: String, message: String },

    #[error("External tool '{tool}' produced no frames")]
    NoFrames { tool: String },

    #[error("Failed to decode bitmap {path}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Geometry mismatch in {context}: expected {expected}, got {actual}")]
    GeometryMismatch {
        context: String,
        expected: String,
        actual: String,
    },

    #[error("Invalid frame text {path}: {message}")]
    InvalidFrameText { path: PathBuf, message: String },

    #[error("Failed to {action} {path}: {source}")]
    Resource {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Interrupted during {stage}")]
    Interrupted { stage: &'static str },
}

impl PipelineError {
    /// Mismatch between two cell grids.
    pub fn cell_mismatch(context: impl Into<String>, expected: Geometry, actual: Geometry) -> Self {
        Self::GeometryMismatch {
            context: context.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Mismatch between the run's pixel size and a decoded bitmap.
    pub fn pixel_mismatch(
        context: impl Into<String>,
        expected: (u32, u32),
        actual: (u32, u32),
    ) -> Self {
        Self::GeometryMismatch {
            context: context.into(),
            expected: format!("{}x{} px", expected.0, expected.1),
            actual: format!("{}x{} px", actual.0, actual.1),
        }
    }

    pub(crate) fn resource(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Resource {
            action,
            path: path.into(),
            source,
        }
    }
}
