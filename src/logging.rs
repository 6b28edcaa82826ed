// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

const APP_DIR: &str = "wordle-sieve";
const LOG_FILE_NAME: &str = "wordle-sieve.log";

/// Where log records end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    Stderr,
    /// Append to the log file in the user cache dir. Used while the TUI owns
    /// the terminal.
    File,
}

pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn log_file_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE_NAME))
}

/// Install the global logger. `RUST_LOG`, when set, overrides `verbose`.
///
/// Returns the log file path when logging to a file.
/// Returns an error if the log file or its directory cannot be created.
pub fn init_logging(verbose: u8, destination: LogDestination) -> io::Result<Option<PathBuf>> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for_verbosity(verbose))
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}: {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    let mut log_path = None;
    if destination == LogDestination::File {
        match log_file_path() {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(&path)?;
                builder.target(Target::Pipe(Box::new(file)));
                log_path = Some(path);
            }
            // Nowhere to write that won't corrupt the screen.
            None => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    if builder.try_init().is_err() {
        log::debug!("init_logging() - logger already installed");
    }
    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(3), LevelFilter::Trace);
        assert_eq!(level_for_verbosity(200), LevelFilter::Trace);
    }

    #[test]
    fn test_log_file_path_is_under_app_dir() {
        if let Some(path) = log_file_path() {
            assert!(path.ends_with("wordle-sieve/wordle-sieve.log"));
        }
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        assert_eq!(init_logging(0, LogDestination::Stderr).unwrap(), None);
        assert_eq!(init_logging(2, LogDestination::Stderr).unwrap(), None);
    }
}
