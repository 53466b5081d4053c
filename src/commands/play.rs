//! Play command handler

use anyhow::{Context, Result};

use braille_play::cli::Cli;
use braille_play::frame::WorkDir;
use braille_play::player::{play_diffs, tick_period_for, CancelToken, PlaybackResult};
use braille_play::terminal::{terminal_geometry, Canvas, TerminalCanvas};
use braille_play::transcode::Ffmpeg;
use braille_play::{prepare, Config, PipelineEvent};

use super::status;

/// Load config from `--config` or the default location, then apply flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn report(event: PipelineEvent) {
    match event {
        PipelineEvent::Transcoding => status::step("Transcoding video"),
        PipelineEvent::Transcoded { frames } => {
            status::step(&format!("Rasterizing {} frames", frames))
        }
        PipelineEvent::Rasterized(progress) => {
            status::progress("frames", progress.percent(), progress.is_done())
        }
        PipelineEvent::Diffing => status::step("Diffing frames"),
        PipelineEvent::Diffed { changed_cells } => {
            tracing::debug!(changed_cells, "diffing finished")
        }
    }
}

/// Prepare `cli.source` and play it on stdout.
#[cfg(not(tarpaulin_include))]
pub fn handle(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let options = config.pipeline_options()?;

    let geometry = match terminal_geometry() {
        Some(geometry) => geometry,
        None => {
            let fallback = config.fallback_geometry();
            status::warn(&format!("No terminal attached, using {}", fallback));
            fallback
        }
    };

    status::step(&format!(
        "Rendering at {} ({}x{} px)",
        geometry,
        geometry.pixel_width(),
        geometry.pixel_height()
    ));

    // Must be in place before the working directory exists
    let cancel = CancelToken::new();
    cancel
        .cancel_on_ctrlc()
        .context("Failed to install Ctrl-C handler")?;

    let work = WorkDir::create(config.storage.work_dir_parent.as_deref())?;
    tracing::debug!(dir = %work.path().display(), "working directory created");

    let ffmpeg = Ffmpeg::new(&config.transcode.ffmpeg);
    let prepared = prepare(
        &cli.source,
        geometry,
        &ffmpeg,
        &work,
        &options,
        &cancel,
        report,
    );
    let closed = work.close();
    let animation = prepared?;
    closed?;

    let mut canvas = TerminalCanvas::stdout();
    canvas.enter()?;
    let played = canvas.paint(&animation.first).and_then(|()| {
        play_diffs(
            &animation.diffs,
            tick_period_for(options.fps),
            &mut canvas,
            &cancel,
        )
    });
    canvas.exit(geometry.rows)?;

    match played? {
        PlaybackResult::Completed(stats) => status::success(&format!(
            "Played {} frames in {:.1}s",
            stats.frames,
            stats.elapsed.as_secs_f64()
        )),
        PlaybackResult::Interrupted(stats) => {
            status::step(&format!("Stopped after {} frames", stats.frames))
        }
    }
    Ok(())
}
