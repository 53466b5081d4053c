//! Configuration file handling.
//!
//! Settings are read from `<config_dir>/braille-play/config.toml` (or the
//! file named by `BRAILLE_PLAY_CONFIG`). Every field is optional; a missing
//! file means all defaults.
//!
//! ```toml
//! [playback]
//! fps = 30
//!
//! [render]
//! threshold = 128
//! channel_offset = 1
//! batch_size = 100
//! workers = 4
//!
//! [transcode]
//! ffmpeg = "/usr/local/bin/ffmpeg"
//!
//! [storage]
//! work_dir_parent = "/var/tmp"
//!
//! [terminal]
//! fallback_cols = 80
//! fallback_rows = 24
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::frame::Geometry;
use crate::pipeline::{PipelineOptions, DEFAULT_BATCH_SIZE, DEFAULT_FPS};
use crate::raster::{ChannelSelect, DEFAULT_THRESHOLD};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "BRAILLE_PLAY_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub playback: PlaybackConfig,
    pub render: RenderConfig,
    pub transcode: TranscodeConfig,
    pub storage: StorageConfig,
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Frames per second for both sampling and playback
    pub fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Luminance above this value lights a dot
    pub threshold: u8,
    /// Byte of each RGBA pixel that carries the luminance
    pub channel_offset: usize,
    /// Frames rasterized per batch
    pub batch_size: usize,
    /// Rasterizer threads (defaults to one per CPU)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            channel_offset: ChannelSelect::default().offset(),
            batch_size: DEFAULT_BATCH_SIZE,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscodeConfig {
    /// ffmpeg binary name or path
    pub ffmpeg: PathBuf,
}

impl Default for TranscodeConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Where to create the working directory (system temp dir if unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir_parent: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Columns used when no terminal is attached
    pub fallback_cols: u16,
    /// Rows used when no terminal is attached
    pub fallback_rows: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            fallback_cols: 80,
            fallback_rows: 24,
        }
    }
}

impl Config {
    /// Default config file path.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("braille-play").join("config.toml"))
    }

    /// Load from the default location, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.playback.fps == 0 {
            bail!("playback.fps must be at least 1");
        }
        if self.render.batch_size == 0 {
            bail!("render.batch_size must be at least 1");
        }
        if self.render.workers == Some(0) {
            bail!("render.workers must be at least 1");
        }
        if self.terminal.fallback_cols == 0 || self.terminal.fallback_rows == 0 {
            bail!("terminal fallback size must be at least 1x1");
        }
        ChannelSelect::rgba(self.render.channel_offset)?;
        Ok(())
    }

    pub fn pipeline_options(&self) -> Result<PipelineOptions, PipelineError> {
        Ok(PipelineOptions {
            fps: self.playback.fps,
            threshold: self.render.threshold,
            channel: ChannelSelect::rgba(self.render.channel_offset)?,
            batch_size: self.render.batch_size,
            workers: self.render.workers,
        })
    }

    pub fn fallback_geometry(&self) -> Geometry {
        Geometry::new(self.terminal.fallback_cols, self.terminal.fallback_rows)
    }
}
