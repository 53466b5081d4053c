//! Integration tests for braille-play

mod cli_test;
mod helpers;
mod pipeline_test;
