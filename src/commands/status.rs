//! Status lines on stderr.
//!
//! Stdout belongs to the animation, so everything the user reads goes to
//! stderr. Color is dropped when `NO_COLOR` is set or stderr is not a terminal.

use std::io::{self, IsTerminal, Write};

use crossterm::style::Stylize;

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && io::stderr().is_terminal()
}

/// A pipeline stage starting.
pub fn step(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "::".cyan().bold(), message);
    } else {
        eprintln!(":: {}", message);
    }
}

/// Percentage progress, redrawn in place on a terminal.
///
/// Off a terminal only the final value is printed.
pub fn progress(label: &str, percent: u8, done: bool) {
    let mut stderr = io::stderr();
    let tty = stderr.is_terminal();
    if let Err(e) = write_progress(&mut stderr, tty, label, percent, done) {
        tracing::debug!(error = %e, "failed to write progress");
    }
}

fn write_progress<W: Write>(
    out: &mut W,
    tty: bool,
    label: &str,
    percent: u8,
    done: bool,
) -> io::Result<()> {
    if tty {
        write!(out, "\r   {} {:>3}%", label, percent)?;
        if done {
            writeln!(out)?;
        }
    } else if done {
        writeln!(out, "   {} {:>3}%", label, percent)?;
    }
    out.flush()
}

pub fn success(message: &str) {
    if color_enabled() {
        eprintln!("{}", message.green());
    } else {
        eprintln!("{}", message);
    }
}

pub fn warn(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    } else {
        eprintln!("warning: {}", message);
    }
}

pub fn error(message: &str) {
    if color_enabled() {
        eprintln!("{} {}", "error:".red().bold(), message);
    } else {
        eprintln!("error: {}", message);
    }
}
