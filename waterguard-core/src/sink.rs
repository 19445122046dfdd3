//! File-backed log sink (requires std)
//!
//! Mirrors every record to a console (stdout unless replaced) and appends it
//! to a log file as `LEVEL: message`. The file is opened per record so a
//! rotated or deleted log simply starts again. Write failures on either side
//! are dropped, a closed stdout included: losing a log line must never stop
//! the watering loop.
//!
//! ```rust,no_run
//! use waterguard_core::sink::FileLogSink;
//! use waterguard_core::time::TimePoint;
//!
//! let sink = FileLogSink::new("execution.log");
//! sink.new_start(&TimePoint::ZERO);
//! sink.install().expect("logger already set");
//!
//! log::info!("ready");
//! ```

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::constants::irrigation::BANNER_WIDTH;
use crate::time::TimePoint;

/// Console replacing stdout
type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Stdout + append-only file logger
#[derive(Clone)]
pub struct FileLogSink {
    path: Option<PathBuf>,
    level: LevelFilter,
    console: Option<SharedWriter>,
}

impl FileLogSink {
    /// Log to stdout and `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            level: LevelFilter::Debug,
            console: None,
        }
    }

    /// Log to stdout only
    pub fn stdout_only() -> Self {
        Self { path: None, level: LevelFilter::Debug, console: None }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Echo records to `writer` instead of stdout
    pub fn with_console<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        let console: SharedWriter = Arc::new(Mutex::new(writer));
        self.console = Some(console);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Mark a controller boot in the file
    ///
    /// Written straight to the file, bypassing level filtering, so every
    /// boot is visible even with a quiet log level.
    pub fn new_start(&self, started: &TimePoint) {
        let bar = "=".repeat(BANNER_WIDTH);
        self.append(&format!("DEBUG: {bar}{started}{bar}"));
    }

    /// Make this the global `log` backend
    pub fn install(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    /// Render a record the way it appears on stdout and in the file
    pub fn format_line(level: Level, message: &core::fmt::Arguments<'_>) -> String {
        format!("{}: {}", level_label(level), message)
    }

    fn echo(&self, line: &str) {
        match &self.console {
            Some(console) => {
                if let Ok(mut console) = console.lock() {
                    let _ = writeln!(console, "{line}");
                }
            }
            None => {
                let _ = writeln!(io::stdout().lock(), "{line}");
            }
        }
    }

    fn append(&self, line: &str) {
        let Some(path) = &self.path else { return };
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
            let _ = writeln!(file, "{line}");
        }
    }
}

impl fmt::Debug for FileLogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileLogSink")
            .field("path", &self.path)
            .field("level", &self.level)
            .field("console", &if self.console.is_some() { "custom" } else { "stdout" })
            .finish()
    }
}

impl Log for FileLogSink {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_line(record.level(), record.args());
        self.echo(&line);
        self.append(&line);
    }

    fn flush(&self) {}
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_levels() {
        assert_eq!(level_label(Level::Warn), "WARNING");
        assert_eq!(
            FileLogSink::format_line(Level::Info, &format_args!("Reset all channels")),
            "INFO: Reset all channels"
        );
    }

    #[test]
    fn level_filter_applies() {
        let sink = FileLogSink::stdout_only().with_level(LevelFilter::Info);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();
        assert!(!sink.enabled(&debug));
        assert!(sink.enabled(&error));
    }
}
