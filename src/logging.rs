//! Tracing setup. The TUI owns stdout, so events go to a log file.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;

/// Parse a config log level name (case-insensitive).
pub fn parse_level(name: &str) -> Option<Level> {
    match name.to_ascii_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install a global fmt subscriber appending to `path`.
///
/// Fails if the file cannot be opened or a subscriber is already installed.
pub fn init_file_logging(path: &Path, level: Level) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}

/// Install a stderr subscriber, for headless tools.
pub fn init_stderr_logging(level: Level) -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
}
