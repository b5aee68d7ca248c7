//! Stderr logging for the `log` facade
//!
//! Prints `(elapsed) LEVEL message` lines to standard error, timed from the
//! moment the logger is installed.

use colored::Colorize;
use env_logger::{Builder, Target};
use log::{Level, LevelFilter, SetLoggerError};
use std::io::Write;
use std::time::{Duration, Instant};

fn format_line(elapsed: Duration, level: Level, message: &str) -> String {
    let label = match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow().bold(),
        Level::Info => "INFO ".green(),
        Level::Debug => "DEBUG".cyan(),
        Level::Trace => "TRACE".dimmed(),
    };
    format!("({:.3}s) {label} {message}", elapsed.as_secs_f64())
}

/// Map `-v` repetitions to a level: warnings by default, then info, debug
/// and trace
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the stderr logger, showing this crate's records up to `level`
///
/// # Errors
/// Fails if another logger is already installed.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let start = Instant::now();
    Builder::new()
        .filter_level(LevelFilter::Off)
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .target(Target::Stderr)
        .format(move |buf, record| {
            let line = format_line(start.elapsed(), record.level(), &record.args().to_string());
            writeln!(buf, "{line}")
        })
        .try_init()
}
