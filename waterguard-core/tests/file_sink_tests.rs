//! Tests for the file-backed log sink

#![cfg(feature = "std")]

use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use log::{Level, Log, Record};
use tempfile::tempdir;

use waterguard_core::{sink::FileLogSink, TimePoint};

fn emit(sink: &FileLogSink, level: Level, message: &str) {
    sink.log(
        &Record::builder()
            .level(level)
            .args(format_args!("{message}"))
            .build(),
    );
}

/// Console whose reader has gone away
struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }
}

/// Console keeping everything written to it
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn closed_console_does_not_stop_file_logging() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("execution.log");
    let sink = FileLogSink::new(&path).with_console(ClosedPipe);

    emit(&sink, Level::Info, "Reset all channels");
    emit(&sink, Level::Error, "impossible channel selected: 16");

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "INFO: Reset all channels\nERROR: impossible channel selected: 16\n"
    );
}

#[test]
fn console_mirrors_file_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("execution.log");
    let console = Captured::default();
    let sink = FileLogSink::new(&path).with_console(console.clone());

    emit(&sink, Level::Warn, "kept");

    assert_eq!(console.text(), "WARNING: kept\n");
    assert_eq!(fs::read_to_string(&path).unwrap(), console.text());
}

#[test]
fn appends_level_prefixed_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("execution.log");
    let sink = FileLogSink::new(&path);

    emit(&sink, Level::Info, "Reset all channels");
    emit(&sink, Level::Error, "impossible channel selected: 16");
    emit(&sink, Level::Warn, "clock anomaly");

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "INFO: Reset all channels\n\
         ERROR: impossible channel selected: 16\n\
         WARNING: clock anomaly\n"
    );
}

#[test]
fn filtered_levels_not_written() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("quiet.log");
    let sink = FileLogSink::new(&path).with_level(log::LevelFilter::Warn);

    emit(&sink, Level::Debug, "Irrigation loop: 0");
    emit(&sink, Level::Warn, "kept");

    assert_eq!(fs::read_to_string(&path).unwrap(), "WARNING: kept\n");
}

#[test]
fn boot_banner_frames_start_time() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("execution.log");
    let sink = FileLogSink::new(&path);

    let started = TimePoint::from_fields(&[2022, 9, 4, 19, 40, 5, 6, 247]).unwrap();
    sink.new_start(&started);

    let bar = "=".repeat(50);
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, format!("DEBUG: {bar}2022-09-04 19:40:05{bar}\n"));
}

#[test]
fn unwritable_path_does_not_panic() {
    let dir = tempdir().unwrap();
    // A directory cannot be opened for appending
    let sink = FileLogSink::new(dir.path());

    emit(&sink, Level::Info, "still running");
    sink.new_start(&TimePoint::ZERO);
}
