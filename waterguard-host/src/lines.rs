//! Stand-in hardware for running the controller off-target
//!
//! `LoggedLine` records level changes through `log` instead of toggling a
//! GPIO, and `ThreadDelay` blocks the thread for real.

use core::convert::Infallible;
use std::thread;
use std::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

/// Output line that only logs
#[derive(Debug)]
pub struct LoggedLine {
    name: &'static str,
    high: bool,
}

impl LoggedLine {
    pub fn new(name: &'static str) -> Self {
        Self { name, high: false }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    fn drive(&mut self, high: bool) {
        if self.is_high() != high {
            log::trace!("{} -> {}", self.name, if high { "high" } else { "low" });
        }
        self.high = high;
    }
}

impl ErrorType for LoggedLine {
    type Error = Infallible;
}

impl OutputPin for LoggedLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

/// Select lines s0..s3 plus the common signal line
pub fn relay_lines() -> ([LoggedLine; 4], LoggedLine) {
    (
        [
            LoggedLine::new("s0"),
            LoggedLine::new("s1"),
            LoggedLine::new("s2"),
            LoggedLine::new("s3"),
        ],
        LoggedLine::new("sig"),
    )
}

/// Blocking delay on the current thread
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
