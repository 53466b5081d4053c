//! Command handlers for the binary.

pub mod play;
pub mod status;
