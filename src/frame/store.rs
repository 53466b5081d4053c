//! Working directory for intermediate artifacts.
//!
//! Holds the transcoder's bitmaps (`image_<n>.bmp`, numbered from 1) and the
//! rendered frame texts (`frame_<n>.txt`, frame 0 is the blank baseline).
//! The directory is removed by [`WorkDir::close`] or, on any other exit path,
//! when the value is dropped.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::FrameText;
use crate::error::PipelineError;

const BITMAP_PREFIX: &str = "image_";
const BITMAP_EXT: &str = "bmp";
const FRAME_PREFIX: &str = "frame_";
const FRAME_EXT: &str = "txt";

/// A fresh temporary directory owned by one run.
#[derive(Debug)]
pub struct WorkDir {
    dir: TempDir,
}

impl WorkDir {
    /// Create a new working directory, under `parent` if given.
    pub fn create(parent: Option<&Path>) -> Result<Self, PipelineError> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("braille-play-");
            b
        };
        let dir = match parent {
            Some(parent) => builder
                .tempdir_in(parent)
                .map_err(|e| PipelineError::resource("create working directory in", parent, e))?,
            None => builder.tempdir().map_err(|e| {
                PipelineError::resource("create working directory in", std::env::temp_dir(), e)
            })?,
        };
        tracing::debug!(path = %dir.path().display(), "created working directory");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Pattern handed to the transcoder (`image_%d.bmp`).
    pub fn bitmap_pattern(&self) -> PathBuf {
        self.path()
            .join(format!("{}%d.{}", BITMAP_PREFIX, BITMAP_EXT))
    }

    pub fn bitmap_path(&self, index: usize) -> PathBuf {
        self.path()
            .join(format!("{}{}.{}", BITMAP_PREFIX, index, BITMAP_EXT))
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.path()
            .join(format!("{}{}.{}", FRAME_PREFIX, index, FRAME_EXT))
    }

    /// Count the bitmaps the transcoder left behind.
    pub fn count_bitmaps(&self) -> Result<usize, PipelineError> {
        let entries = fs::read_dir(self.path())
            .map_err(|e| PipelineError::resource("read working directory", self.path(), e))?;

        let mut count = 0;
        for entry in entries {
            let entry =
                entry.map_err(|e| PipelineError::resource("read working directory", self.path(), e))?;
            if is_bitmap_name(&entry.file_name().to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Count frame texts written so far.
    pub fn count_frames(&self) -> Result<usize, PipelineError> {
        let entries = fs::read_dir(self.path())
            .map_err(|e| PipelineError::resource("read working directory", self.path(), e))?;
        Ok(entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                let name = e.file_name();
                let name = name.to_string_lossy();
                name.starts_with(FRAME_PREFIX) && name.ends_with(FRAME_EXT)
            })
            .count())
    }

    pub fn write_frame(&self, index: usize, frame: &FrameText) -> Result<(), PipelineError> {
        let path = self.frame_path(index);
        fs::write(&path, frame.to_text())
            .map_err(|e| PipelineError::resource("write frame text", path, e))
    }

    pub fn read_frame(&self, index: usize) -> Result<FrameText, PipelineError> {
        let path = self.frame_path(index);
        let text = fs::read_to_string(&path)
            .map_err(|e| PipelineError::resource("read frame text", &path, e))?;
        FrameText::parse(&text, &path)
    }

    /// Read frames back one at a time, in index order.
    pub fn read_frames(
        &self,
        range: RangeInclusive<usize>,
    ) -> impl Iterator<Item = Result<FrameText, PipelineError>> + '_ {
        range.map(move |i| self.read_frame(i))
    }

    /// Remove the directory, reporting failure instead of ignoring it.
    pub fn close(self) -> Result<(), PipelineError> {
        let path = self.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| PipelineError::resource("remove working directory", path, e))
    }
}

fn is_bitmap_name(name: &str) -> bool {
    name.strip_prefix(BITMAP_PREFIX)
        .and_then(|rest| rest.strip_suffix(BITMAP_EXT))
        .and_then(|stem| stem.strip_suffix('.'))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
