//! braille-play - play videos as braille dot-matrix art in the terminal
//!
//! A video is transcoded by ffmpeg into black-and-white bitmaps sized to the
//! terminal (each character cell covers 2x4 pixels), every bitmap becomes a
//! grid of braille glyphs, and consecutive grids are diffed so playback only
//! redraws the cells that change.
//!
//! # Modules
//!
//! - [`glyph`]: 2x4 pixel block to braille character encoding
//! - [`frame`]: cell grids (`FrameText`) and the temporary working directory
//! - [`raster`]: bitmap decoding and parallel batch rasterization
//! - [`diff`]: per-transition cell diffs
//! - [`transcode`]: the external video transcoder
//! - [`pipeline`]: the preparation stages wired together
//! - [`player`]: fixed-rate playback with cancellation
//! - [`terminal`]: canvases that playback draws on

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod frame;
pub mod glyph;
pub mod pipeline;
pub mod player;
pub mod raster;
pub mod terminal;
pub mod transcode;

pub use config::Config;
pub use error::PipelineError;
pub use frame::{FrameText, Geometry};
pub use glyph::Glyph;
pub use pipeline::{prepare, Animation, PipelineEvent, PipelineOptions};
