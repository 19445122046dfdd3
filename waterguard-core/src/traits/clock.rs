//! Clock Source Abstraction for Embedded Targets
//!
//! This module provides the `ClockSource` trait, which hides where calendar
//! readings come from: an on-chip RTC, an I2C module such as a DS3231 or
//! PCF8563, the host's local time, or a scripted source in tests.
//!
//! ## Design Goals
//!
//! - **Platform Independence**: works on bare metal, RTOS and Linux
//! - **Testability**: trivial to script for deterministic tests
//! - **Efficiency**: readings live on the stack, no allocation
//!
//! ## Field Layout
//!
//! A reading is the MicroPython `utime.localtime()` tuple:
//!
//! ```text
//! (year, month, mday, hour, minute, second, weekday, yearday)
//! (2022, 9,     4,    19,   40,     5,      6,       247)
//! ```
//!
//! The trait returns the raw list and leaves validation to
//! [`TimePoint::from_fields`](crate::time::TimePoint::from_fields), so a
//! truncated read surfaces as
//! [`IrrigationError::MalformedTimePoint`](crate::IrrigationError::MalformedTimePoint)
//! instead of a panic inside the driver.

use crate::time::{ClockFields, TimePoint};

/// Source of calendar readings for the controller
///
/// ## Implementation Requirements
///
/// - Return fields in `localtime()` order
/// - On a failed bus transaction return whatever was read, possibly nothing;
///   the caller treats short readings as malformed and keeps its previous one
/// - Calls may block briefly on a bus but must not sleep
///
/// ## Example Implementation
///
/// ```rust
/// use waterguard_core::traits::ClockSource;
/// use waterguard_core::time::ClockFields;
///
/// struct Ds3231 {
///     // ... I2C handle
/// }
///
/// impl ClockSource for Ds3231 {
///     fn read_fields(&mut self) -> ClockFields {
///         // Read 7 BCD registers from 0x00, convert, append weekday/yearday
///         ClockFields::from_slice(&[2024, 6, 1, 10, 0, 0, 5, 153]).unwrap_or_default()
///     }
/// }
/// ```
pub trait ClockSource {
    /// Read the current calendar fields
    fn read_fields(&mut self) -> ClockFields;
}

/// Clock that always reports the same reading
///
/// Useful for bring-up and for tests that only care about one instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    reading: TimePoint,
}

impl FixedClock {
    pub fn new(reading: TimePoint) -> Self {
        Self { reading }
    }

    pub fn set(&mut self, reading: TimePoint) {
        self.reading = reading;
    }

    /// Advance minute and second, carrying into the hour
    ///
    /// Only time of day moves; callers testing day rollover should `set`.
    pub fn advance_seconds(&mut self, secs: u16) {
        let total = u32::from(self.reading.second)
            + u32::from(self.reading.minute) * 60
            + u32::from(self.reading.hour) * 3600
            + u32::from(secs);
        self.reading.hour = ((total / 3600) % 24) as u16;
        self.reading.minute = ((total / 60) % 60) as u16;
        self.reading.second = (total % 60) as u16;
    }
}

impl ClockSource for FixedClock {
    fn read_fields(&mut self) -> ClockFields {
        // Capacity (16) exceeds the 8 fields, cannot fail
        ClockFields::from_slice(&self.reading.to_fields()).unwrap_or_default()
    }
}
