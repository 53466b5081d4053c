//! Batched frame rasterization.
//!
//! Frames are processed in fixed-size batches. Within a batch every frame is
//! decoded, rasterized and written on the rayon pool; the batch is a barrier,
//! so at most one batch of decoded bitmaps is resident at a time. Results are
//! keyed by frame index, never by completion order.

use rayon::prelude::*;
use rayon::ThreadPool;

use super::{decode_bitmap, ChannelSelect, Rasterizer};
use crate::error::PipelineError;
use crate::frame::WorkDir;

/// Progress after a completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Frames rasterized so far
    pub completed: usize,
    /// Frames to rasterize in total
    pub total: usize,
}

impl BatchProgress {
    /// Completed fraction in `0.0..=1.0`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round().min(100.0) as u8
    }

    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// Iterator that rasterizes one batch per `next()` call.
///
/// Bitmaps `1..=frame_count` are read from the working directory and frame
/// texts are written to the same index. Iteration stops after the last batch
/// or the first error.
pub struct BatchRasterizer<'a> {
    work: &'a WorkDir,
    rasterizer: Rasterizer,
    channel: ChannelSelect,
    frame_count: usize,
    batch_size: usize,
    pool: Option<ThreadPool>,
    next_frame: usize,
    failed: bool,
}

impl<'a> BatchRasterizer<'a> {
    pub fn new(
        work: &'a WorkDir,
        rasterizer: Rasterizer,
        channel: ChannelSelect,
        frame_count: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            work,
            rasterizer,
            channel,
            frame_count,
            batch_size: batch_size.max(1),
            pool: None,
            next_frame: 1,
            failed: false,
        }
    }

    /// Use a dedicated pool of `workers` threads instead of the global one.
    pub fn with_workers(mut self, workers: usize) -> Result<Self, PipelineError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("rasterize-{}", i))
            .build()
            .map_err(|e| PipelineError::InvalidConfig(format!("rasterizer pool: {}", e)))?;
        self.pool = Some(pool);
        Ok(self)
    }

    fn run_batch(&self, first: usize, last: usize) -> Result<(), PipelineError> {
        let work = self.work;
        let rasterizer = self.rasterizer;
        let channel = self.channel;

        let job = || {
            (first..=last)
                .into_par_iter()
                .map(|index| {
                    let luma = decode_bitmap(&work.bitmap_path(index), channel)?;
                    let frame = rasterizer.rasterize(&luma)?;
                    work.write_frame(index, &frame)
                })
                // Collected in index order, so the reported error is the
                // lowest failing frame regardless of which worker hit it first
                .collect::<Vec<Result<(), PipelineError>>>()
        };

        let results = match &self.pool {
            Some(pool) => pool.install(job),
            None => job(),
        };
        results.into_iter().collect()
    }
}

impl Iterator for BatchRasterizer<'_> {
    type Item = Result<BatchProgress, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_frame > self.frame_count {
            return None;
        }

        let first = self.next_frame;
        let last = first
            .saturating_add(self.batch_size - 1)
            .min(self.frame_count);

        if let Err(e) = self.run_batch(first, last) {
            tracing::warn!(first, last, error = %e, "batch failed");
            self.failed = true;
            return Some(Err(e));
        }

        self.next_frame = last + 1;
        tracing::debug!(first, last, total = self.frame_count, "batch rasterized");
        Some(Ok(BatchProgress {
            completed: last,
            total: self.frame_count,
        }))
    }
}
