//! Command-line interface definition.
//!
//! Lives in the library so the xtask crate can render the man page from the
//! same definition.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Short commit hash, or "unknown"/"release" when unavailable.
pub const GIT_SHA: &str = match option_env!("VERGEN_GIT_SHA") {
    Some(sha) => sha,
    None => "unknown",
};

pub const BUILD_DATE: &str = match option_env!("BRAILLE_PLAY_BUILD_DATE") {
    Some(date) => date,
    None => "unknown",
};

/// Text shown by `--version`.
pub fn long_version() -> String {
    format!(
        "{} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        GIT_SHA,
        BUILD_DATE
    )
}

/// A count of at least one that fits the platform's `usize`.
fn parse_positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "braille-play",
    version,
    long_version = long_version(),
    about = "Play a video as braille dot-matrix art in the terminal",
    long_about = "Play a video as braille dot-matrix art in the terminal.\n\n\
        The video is sampled with ffmpeg at the terminal's resolution (2x4 pixels \
        per character cell), thresholded to black and white and played back by \
        redrawing only the cells that change between frames.\n\n\
        Press Ctrl-C to stop playback.",
    after_help = "\x1b[1mExamples:\x1b[0m\n  \
        braille-play clip.mp4                Play at 30 fps\n  \
        braille-play --fps 12 clip.mp4       Sample and play at 12 fps\n  \
        braille-play --threshold 90 clip.mp4 Light more dots in dark footage\n\n\
        \x1b[1mEnvironment:\x1b[0m\n  \
        BRAILLE_PLAY_CONFIG   Path to the config file\n  \
        RUST_LOG              Log filter for diagnostics on stderr\n  \
        NO_COLOR              Disable colored status output"
)]
pub struct Cli {
    /// Video file to play
    pub source: PathBuf,

    /// Frames per second for sampling and playback
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,

    /// Luminance (0-255) above which a dot is lit
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Byte of each RGBA pixel that carries the luminance (0-3)
    #[arg(long, value_name = "OFFSET")]
    pub channel_offset: Option<usize>,

    /// Frames rasterized per batch
    #[arg(long, value_name = "FRAMES", value_parser = parse_positive)]
    pub batch_size: Option<usize>,

    /// Rasterizer threads [default: one per CPU]
    #[arg(long, value_name = "N", value_parser = parse_positive)]
    pub workers: Option<usize>,

    /// ffmpeg binary to run
    #[arg(long, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// Directory in which the temporary working directory is created
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Overlay command-line flags on top of file settings.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(fps) = self.fps {
            config.playback.fps = fps;
        }
        if let Some(threshold) = self.threshold {
            config.render.threshold = threshold;
        }
        if let Some(offset) = self.channel_offset {
            config.render.channel_offset = offset;
        }
        if let Some(batch_size) = self.batch_size {
            config.render.batch_size = batch_size;
        }
        if let Some(workers) = self.workers {
            config.render.workers = Some(workers);
        }
        if let Some(ffmpeg) = &self.ffmpeg {
            config.transcode.ffmpeg = ffmpeg.clone();
        }
        if let Some(dir) = &self.work_dir {
            config.storage.work_dir_parent = Some(dir.clone());
        }
    }
}
