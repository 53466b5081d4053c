mod commands;

use std::process::ExitCode;

use braille_play::cli::Cli;
use braille_play::PipelineError;
use clap::Parser;

/// Exit status after Ctrl-C (128 + SIGINT).
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match commands::play::handle(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<PipelineError>() {
            Some(interrupted @ PipelineError::Interrupted { .. }) => {
                commands::status::step(&interrupted.to_string());
                ExitCode::from(EXIT_INTERRUPTED)
            }
            _ => {
                commands::status::error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        },
    }
}
