//! End-to-end preparation and replay with a scripted transcoder

use std::time::Duration;

use super::helpers::{entries, source_fixture, ScriptedTranscoder};
use braille_play::frame::WorkDir;
use braille_play::player::{play_diffs, CancelToken, PlaybackResult};
use braille_play::PipelineError;
use braille_play::raster::BatchProgress;
use braille_play::terminal::{BufferCanvas, Canvas};
use braille_play::{prepare, FrameText, Geometry, Glyph, PipelineEvent, PipelineOptions};

const GEOMETRY: Geometry = Geometry::new(2, 2);

/// Four frames on a 2x2 cell grid (4x8 pixels):
/// blank, top-left cell lit, a diagonal, then only the left dot column of
/// the top-left cell.
fn four_frames() -> ScriptedTranscoder {
    ScriptedTranscoder::new()
        .frame(|_, _| false)
        .frame(|x, y| x < 2 && y < 4)
        .frame(|x, y| (x < 2 && y < 4) || (x >= 2 && y >= 4))
        .frame(|x, y| x == 0 && y < 4)
}

#[test]
fn prepared_animation_replays_final_frame() {
    let (_src_dir, source) = source_fixture();
    let work = WorkDir::create(None).unwrap();

    let animation = prepare(
        &source,
        GEOMETRY,
        &four_frames(),
        &work,
        &PipelineOptions::default(),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();
    work.close().unwrap();

    assert!(animation.first.is_blank());
    assert_eq!(animation.frame_count(), 5);
    assert_eq!(animation.diffs.len(), 4);
    assert_eq!(animation.diffs.get(0).unwrap().len(), 0);
    assert_eq!(animation.diffs.changed_cells(), 4);

    let mut canvas = BufferCanvas::new(animation.geometry());
    canvas.paint(&animation.first).unwrap();
    let result = play_diffs(
        &animation.diffs,
        Duration::from_millis(1),
        &mut canvas,
        &CancelToken::new(),
    )
    .unwrap();

    assert!(matches!(result, PlaybackResult::Completed(_)));
    assert_eq!(result.stats().frames, 4);
    assert_eq!(canvas.frames(), 5);
    assert_eq!(canvas.writes(), 4 + 4);

    let mut expected = FrameText::blank(GEOMETRY);
    expected.set(0, 0, Glyph::from_char('\u{2847}').unwrap());
    assert_eq!(canvas.screen(), &expected);

    insta::assert_snapshot!(canvas.screen().to_text().trim_end(), @r"
    ⡇⠀
    ⠀⠀
    ");
}

#[test]
fn every_transition_matches_its_bitmap() {
    let (_src_dir, source) = source_fixture();
    let work = WorkDir::create(None).unwrap();
    let animation = prepare(
        &source,
        GEOMETRY,
        &four_frames(),
        &work,
        &PipelineOptions::default(),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();

    // Replay diff by diff and compare against the frame texts on disk.
    let mut screen = animation.first.clone();
    for (i, diffs) in animation.diffs.iter().enumerate() {
        braille_play::diff::apply_diffs(&mut screen, diffs);
        assert_eq!(screen, work.read_frame(i + 1).unwrap(), "frame {}", i + 1);
    }

    insta::assert_snapshot!(work.read_frame(3).unwrap().to_text().trim_end(), @r"
    ⣿⠀
    ⠀⣿
    ");
}

#[test]
fn events_follow_stage_order() {
    let (_src_dir, source) = source_fixture();
    let work = WorkDir::create(None).unwrap();
    let options = PipelineOptions {
        batch_size: 3,
        workers: Some(2),
        ..PipelineOptions::default()
    };

    let mut events = Vec::new();
    prepare(
        &source,
        GEOMETRY,
        &four_frames(),
        &work,
        &options,
        &CancelToken::new(),
        |e| events.push(e),
    )
    .unwrap();

    assert_eq!(
        events,
        vec![
            PipelineEvent::Transcoding,
            PipelineEvent::Transcoded { frames: 4 },
            PipelineEvent::Rasterized(BatchProgress {
                completed: 3,
                total: 4
            }),
            PipelineEvent::Rasterized(BatchProgress {
                completed: 4,
                total: 4
            }),
            PipelineEvent::Diffing,
            PipelineEvent::Diffed { changed_cells: 4 },
        ]
    );
}

#[test]
fn working_directory_is_removed_after_close() {
    let parent = tempfile::TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();
    let work = WorkDir::create(Some(parent.path())).unwrap();

    prepare(
        &source,
        GEOMETRY,
        &four_frames(),
        &work,
        &PipelineOptions::default(),
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();
    assert_eq!(entries(parent.path()), 1);
    assert_eq!(work.count_frames().unwrap(), 5);

    work.close().unwrap();
    assert_eq!(entries(parent.path()), 0);
}

#[test]
fn working_directory_is_removed_after_failure() {
    let parent = tempfile::TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();
    {
        let work = WorkDir::create(Some(parent.path())).unwrap();
        let err = prepare(
            &source,
            GEOMETRY,
            &ScriptedTranscoder::new(),
            &work,
            &PipelineOptions::default(),
            &CancelToken::new(),
            |_| {},
        )
        .unwrap_err();
        assert!(err.to_string().contains("produced no frames"));
    }
    assert_eq!(entries(parent.path()), 0);
}

#[test]
fn threshold_is_exclusive() {
    let (_src_dir, source) = source_fixture();
    let work = WorkDir::create(None).unwrap();
    let transcoder = ScriptedTranscoder::new().frame(|_, _| true);
    let options = PipelineOptions {
        threshold: 255,
        ..PipelineOptions::default()
    };

    let animation = prepare(
        &source,
        GEOMETRY,
        &transcoder,
        &work,
        &options,
        &CancelToken::new(),
        |_| {},
    )
    .unwrap();

    // White is 255, and only values strictly above the threshold light a dot.
    assert!(work.read_frame(1).unwrap().is_blank());
    assert_eq!(animation.diffs.changed_cells(), 0);
}

#[test]
fn cancel_between_batches_stops_and_cleans_up() {
    let parent = tempfile::TempDir::new().unwrap();
    let (_src_dir, source) = source_fixture();
    let cancel = CancelToken::new();
    let options = PipelineOptions {
        batch_size: 1,
        ..PipelineOptions::default()
    };

    let mut rasterized = 0;
    {
        let work = WorkDir::create(Some(parent.path())).unwrap();
        let err = prepare(
            &source,
            GEOMETRY,
            &four_frames(),
            &work,
            &options,
            &cancel,
            |e| {
                if let PipelineEvent::Rasterized(_) = e {
                    rasterized += 1;
                    if rasterized == 2 {
                        cancel.cancel();
                    }
                }
            },
        )
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Interrupted {
                stage: "rasterizing"
            }
        ));
        assert_eq!(entries(parent.path()), 1);
    }

    assert_eq!(rasterized, 2);
    assert_eq!(entries(parent.path()), 0);
}
