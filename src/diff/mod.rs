//! Cell-level diffs between consecutive frames.
//!
//! The diff sequence is built as a fold: each step takes the previous frame
//! by value, compares it with the next one and hands the next frame back as
//! the accumulator for the following step. Only two frames are alive at once.

use crate::error::PipelineError;
use crate::frame::FrameText;
use crate::glyph::Glyph;

/// One terminal cell that must change to `glyph`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellDiff {
    pub col: u16,
    pub row: u16,
    pub glyph: Glyph,
}

/// Compare two frames cell by cell, in row-major order.
pub fn diff_frames(prev: &FrameText, next: &FrameText) -> Result<Vec<CellDiff>, PipelineError> {
    if prev.geometry() != next.geometry() {
        return Err(PipelineError::cell_mismatch(
            "frame diff",
            prev.geometry(),
            next.geometry(),
        ));
    }

    let cols = prev.geometry().cols as usize;
    Ok(prev
        .cells()
        .iter()
        .zip(next.cells())
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(i, (_, &glyph))| CellDiff {
            // Bounded by the u16 geometry
            col: (i % cols) as u16,
            row: (i / cols) as u16,
            glyph,
        })
        .collect())
}

/// One fold step: diff `prev` against `next` and return `next` as the new
/// accumulator.
pub fn diff_step(
    prev: FrameText,
    next: FrameText,
) -> Result<(FrameText, Vec<CellDiff>), PipelineError> {
    let diffs = diff_frames(&prev, &next)?;
    Ok((next, diffs))
}

/// Write every diff into `frame`.
pub fn apply_diffs(frame: &mut FrameText, diffs: &[CellDiff]) {
    for d in diffs {
        frame.set(d.col, d.row, d.glyph);
    }
}

/// Ordered per-transition diff lists for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSequence {
    transitions: Vec<Vec<CellDiff>>,
}

impl DiffSequence {
    /// Fold `frames` into diffs, starting from `first`.
    ///
    /// The result has one entry per frame yielded by `frames`.
    pub fn build<I>(first: FrameText, frames: I) -> Result<Self, PipelineError>
    where
        I: IntoIterator<Item = Result<FrameText, PipelineError>>,
    {
        let (_, transitions) = frames.into_iter().try_fold(
            (first, Vec::new()),
            |(prev, mut transitions), next| {
                let (prev, diffs) = diff_step(prev, next?)?;
                transitions.push(diffs);
                Ok::<_, PipelineError>((prev, transitions))
            },
        )?;
        Ok(Self { transitions })
    }

    pub fn from_transitions(transitions: Vec<Vec<CellDiff>>) -> Self {
        Self { transitions }
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[CellDiff]> {
        self.transitions.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[CellDiff]> {
        self.transitions.iter().map(Vec::as_slice)
    }

    /// Total number of cell writes over the whole sequence.
    pub fn changed_cells(&self) -> usize {
        self.transitions.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Geometry;

    const G: Geometry = Geometry::new(4, 3);

    fn frame_with(cells: &[(u16, u16, u8)]) -> FrameText {
        let mut frame = FrameText::blank(G);
        for &(col, row, bits) in cells {
            frame.set(col, row, Glyph::from_bits(bits));
        }
        frame
    }

    #[test]
    fn identical_frames_have_no_diffs() {
        let frame = frame_with(&[(1, 1, 0x3F), (3, 2, 0xFF)]);
        assert!(diff_frames(&frame, &frame).unwrap().is_empty());
    }

    #[test]
    fn diffs_are_row_major_with_new_glyph() {
        let prev = frame_with(&[(0, 0, 0x01)]);
        let next = frame_with(&[(3, 0, 0x02), (0, 2, 0x04)]);

        let diffs = diff_frames(&prev, &next).unwrap();
        assert_eq!(
            diffs,
            vec![
                CellDiff { col: 0, row: 0, glyph: Glyph::BLANK },
                CellDiff { col: 3, row: 0, glyph: Glyph::from_bits(0x02) },
                CellDiff { col: 0, row: 2, glyph: Glyph::from_bits(0x04) },
            ]
        );
    }

    #[test]
    fn applying_diff_reproduces_target() {
        let a = frame_with(&[(0, 0, 0x11), (2, 1, 0x22), (3, 2, 0x33)]);
        let b = frame_with(&[(0, 0, 0x11), (1, 1, 0x44), (3, 2, 0x55)]);

        let diffs = diff_frames(&a, &b).unwrap();
        let mut copy = a.clone();
        apply_diffs(&mut copy, &diffs);
        assert_eq!(copy, b);
    }

    #[test]
    fn geometry_mismatch_is_fatal() {
        let a = FrameText::blank(G);
        let b = FrameText::blank(Geometry::new(4, 2));
        let err = diff_frames(&a, &b).unwrap_err();
        assert!(matches!(err, PipelineError::GeometryMismatch { .. }));
    }

    #[test]
    fn diff_step_returns_next_as_accumulator() {
        let prev = FrameText::blank(G);
        let next = frame_with(&[(2, 2, 0x80)]);
        let (acc, diffs) = diff_step(prev, next.clone()).unwrap();
        assert_eq!(acc, next);
        assert_eq!(diffs.len(), 1);
    }

    #[test]
    fn sequence_has_one_entry_per_transition_and_replays_every_frame() {
        let frames = vec![
            frame_with(&[(0, 0, 0x01)]),
            frame_with(&[(0, 0, 0x01), (1, 0, 0x02)]),
            frame_with(&[]),
            frame_with(&[(3, 2, 0xFF)]),
        ];
        let first = FrameText::blank(G);

        let seq = DiffSequence::build(first.clone(), frames.iter().cloned().map(Ok)).unwrap();
        assert_eq!(seq.len(), frames.len());

        let mut screen = first;
        for (diffs, expected) in seq.iter().zip(&frames) {
            apply_diffs(&mut screen, diffs);
            assert_eq!(&screen, expected);
        }
        assert_eq!(seq.changed_cells(), 1 + 1 + 2 + 1);
    }

    #[test]
    fn sequence_stops_at_first_error() {
        let frames = vec![
            Ok(FrameText::blank(G)),
            Err(PipelineError::InvalidConfig("boom".into())),
            Ok(FrameText::blank(G)),
        ];
        let err = DiffSequence::build(FrameText::blank(G), frames).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn sequence_rejects_geometry_change() {
        let frames = vec![Ok(FrameText::blank(Geometry::new(2, 2)))];
        assert!(matches!(
            DiffSequence::build(FrameText::blank(G), frames),
            Err(PipelineError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn empty_input_gives_empty_sequence() {
        let seq = DiffSequence::build(FrameText::blank(G), Vec::new()).unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.get(0), None);
    }
}
