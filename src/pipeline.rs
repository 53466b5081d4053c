//! Preparation pipeline: video -> bitmaps -> frame texts -> diff sequence.
//!
//! Progress is reported as [`PipelineEvent`] values; how (or whether) they
//! are displayed is up to the caller.

use std::path::Path;

use crate::diff::DiffSequence;
use crate::error::PipelineError;
use crate::frame::{FrameText, Geometry, WorkDir};
use crate::player::CancelToken;
use crate::raster::{BatchProgress, BatchRasterizer, ChannelSelect, Rasterizer, DEFAULT_THRESHOLD};
use crate::transcode::{TranscodeRequest, Transcoder};

/// Frames rasterized per batch.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Playback and sampling rate.
pub const DEFAULT_FPS: u32 = 30;

/// Tunables for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub fps: u32,
    pub threshold: u8,
    pub channel: ChannelSelect,
    pub batch_size: usize,
    /// Dedicated rasterizer threads; `None` uses the global rayon pool
    pub workers: Option<usize>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            threshold: DEFAULT_THRESHOLD,
            channel: ChannelSelect::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            workers: None,
        }
    }
}

/// Progress notifications emitted by [`prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PipelineEvent {
    /// The transcoder is running
    Transcoding,
    /// The transcoder finished with this many bitmaps
    Transcoded { frames: usize },
    /// One batch of frames was rasterized
    Rasterized(BatchProgress),
    /// Frame texts are being diffed
    Diffing,
    /// The diff sequence is complete
    Diffed { changed_cells: usize },
}

/// Everything playback needs.
#[derive(Debug, Clone)]
pub struct Animation {
    /// Baseline frame painted before the first tick (all blank)
    pub first: FrameText,
    /// One diff list per transition
    pub diffs: DiffSequence,
}

impl Animation {
    pub fn geometry(&self) -> Geometry {
        self.first.geometry()
    }

    /// Frames including the blank baseline.
    pub fn frame_count(&self) -> usize {
        self.diffs.len() + 1
    }
}

/// Run every preparation stage for `source`.
///
/// Intermediate files live in `work`; the caller owns its removal.
/// `cancel` is checked after transcoding and after every batch; a cancelled
/// run returns [`PipelineError::Interrupted`].
pub fn prepare(
    source: &Path,
    geometry: Geometry,
    transcoder: &dyn Transcoder,
    work: &WorkDir,
    options: &PipelineOptions,
    cancel: &CancelToken,
    mut on_event: impl FnMut(PipelineEvent),
) -> Result<Animation, PipelineError> {
    if !source.is_file() {
        return Err(PipelineError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    on_event(PipelineEvent::Transcoding);
    let pattern = work.bitmap_pattern();
    let transcoded = transcoder.transcode(&TranscodeRequest {
        source,
        width: geometry.pixel_width(),
        height: geometry.pixel_height(),
        fps: options.fps,
        output_pattern: &pattern,
    });
    // Ctrl-C reaches the transcoder too, so its failure is not the cause
    check_cancel(cancel, "transcoding")?;
    transcoded?;

    let bitmaps = work.count_bitmaps()?;
    if bitmaps == 0 {
        return Err(PipelineError::NoFrames {
            tool: transcoder.name().to_string(),
        });
    }
    tracing::info!(bitmaps, %geometry, "transcoding finished");
    on_event(PipelineEvent::Transcoded { frames: bitmaps });

    let first = FrameText::blank(geometry);
    work.write_frame(0, &first)?;

    let rasterizer = Rasterizer::new(geometry, options.threshold);
    let mut batches =
        BatchRasterizer::new(work, rasterizer, options.channel, bitmaps, options.batch_size);
    if let Some(workers) = options.workers {
        batches = batches.with_workers(workers)?;
    }
    for progress in batches {
        on_event(PipelineEvent::Rasterized(progress?));
        check_cancel(cancel, "rasterizing")?;
    }

    on_event(PipelineEvent::Diffing);
    let diffs = DiffSequence::build(first.clone(), work.read_frames(1..=bitmaps))?;
    if diffs.len() != bitmaps {
        return Err(PipelineError::GeometryMismatch {
            context: "diff sequence".to_string(),
            expected: format!("{} transitions", bitmaps),
            actual: format!("{} transitions", diffs.len()),
        });
    }
    tracing::info!(
        transitions = diffs.len(),
        changed_cells = diffs.changed_cells(),
        "diff sequence built"
    );
    on_event(PipelineEvent::Diffed {
        changed_cells: diffs.changed_cells(),
    });

    Ok(Animation { first, diffs })
}

fn check_cancel(cancel: &CancelToken, stage: &'static str) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        tracing::info!(stage, "preparation interrupted");
        return Err(PipelineError::Interrupted { stage });
    }
    Ok(())
}
