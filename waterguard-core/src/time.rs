//! Calendar time readings and elapsed-time arithmetic
//!
//! The controller's clock is a battery-backed RTC that reports broken-down
//! calendar fields rather than an epoch counter. Two readings are compared by
//! folding day-of-month, hour, minute and second into a scalar second count:
//!
//! ```text
//! total = second + minute*60 + hour*3600 + mday*86400
//! ```
//!
//! Month and year do not take part. A comparison across a month boundary
//! therefore sees the clock running backwards and is rejected with
//! [`IrrigationError::InvalidDuration`].

use core::fmt;

use crate::constants::time::{
    CLOCK_FIELD_COUNT, MAX_CLOCK_FIELDS, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::errors::{IrrigationError, IrrigationResult};

/// Raw fields as returned by a clock read
pub type ClockFields = heapless::Vec<u16, MAX_CLOCK_FIELDS>;

/// Snapshot of the calendar clock
///
/// Captured once per poll and replaced, never edited, by the next capture.
/// Field ranges follow the RTC: `weekday` 0 = Monday, `yearday` 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimePoint {
    pub year: u16,
    pub month: u16,
    /// Day of month
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub weekday: u16,
    /// Day of year
    pub yearday: u16,
}

impl TimePoint {
    /// All-zero reading, the state before the first successful capture
    pub const ZERO: TimePoint = TimePoint {
        year: 0,
        month: 0,
        day: 0,
        hour: 0,
        minute: 0,
        second: 0,
        weekday: 0,
        yearday: 0,
    };

    /// Build from a raw `localtime()`-ordered field list
    ///
    /// Exactly [`CLOCK_FIELD_COUNT`] fields are required.
    pub fn from_fields(fields: &[u16]) -> IrrigationResult<Self> {
        match fields {
            &[year, month, day, hour, minute, second, weekday, yearday] => Ok(Self {
                year,
                month,
                day,
                hour,
                minute,
                second,
                weekday,
                yearday,
            }),
            _ => Err(IrrigationError::MalformedTimePoint {
                expected: CLOCK_FIELD_COUNT,
                found: fields.len(),
            }),
        }
    }

    /// Fields in `localtime()` order
    pub fn to_fields(&self) -> [u16; CLOCK_FIELD_COUNT] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.weekday,
            self.yearday,
        ]
    }

    /// Time of day as `(hour, minute, second)`
    pub fn clock_time(&self) -> (u16, u16, u16) {
        (self.hour, self.minute, self.second)
    }

    /// Scalar second count used for comparisons
    ///
    /// Day-of-month is treated as an absolute day number.
    pub fn total_seconds(&self) -> i64 {
        i64::from(self.second)
            + i64::from(self.minute) * SECONDS_PER_MINUTE
            + i64::from(self.hour) * SECONDS_PER_HOUR
            + i64::from(self.day) * SECONDS_PER_DAY
    }
}

impl TryFrom<&[u16]> for TimePoint {
    type Error = IrrigationError;

    fn try_from(fields: &[u16]) -> IrrigationResult<Self> {
        Self::from_fields(fields)
    }
}

impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimePoint {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{}-{}-{} {}:{}:{}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Normalized elapsed time between two readings
///
/// `seconds < 60`, `minutes < 60`, `hours < 24`; everything above a day
/// accumulates in `days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Duration {
    pub days: u32,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Duration {
    /// Elapsed time from `earlier` to `later`
    ///
    /// Fails with [`IrrigationError::InvalidDuration`] when `later` sorts
    /// before `earlier`.
    ///
    /// ```rust
    /// use waterguard_core::time::{Duration, TimePoint};
    ///
    /// let start = TimePoint { day: 1, hour: 10, ..TimePoint::ZERO };
    /// let end = TimePoint { day: 2, hour: 10, ..TimePoint::ZERO };
    ///
    /// let elapsed = Duration::between(&start, &end)?;
    /// assert_eq!(elapsed, Duration { days: 1, ..Duration::default() });
    /// # Ok::<(), waterguard_core::IrrigationError>(())
    /// ```
    pub fn between(earlier: &TimePoint, later: &TimePoint) -> IrrigationResult<Self> {
        let from = earlier.total_seconds();
        let to = later.total_seconds();
        let diff = to - from;

        if diff < 0 {
            return Err(IrrigationError::InvalidDuration { earlier: from, later: to });
        }

        Ok(Self::from_seconds(diff))
    }

    /// Decompose a non-negative second count
    fn from_seconds(total: i64) -> Self {
        let mut elapsed = Self::default();
        let mut rem = total;

        if rem >= SECONDS_PER_DAY {
            elapsed.days = (rem / SECONDS_PER_DAY) as u32;
            rem %= SECONDS_PER_DAY;
        }
        if rem >= SECONDS_PER_HOUR {
            elapsed.hours = (rem / SECONDS_PER_HOUR) as u8;
            rem %= SECONDS_PER_HOUR;
        }
        if rem >= SECONDS_PER_MINUTE {
            elapsed.minutes = (rem / SECONDS_PER_MINUTE) as u8;
            rem %= SECONDS_PER_MINUTE;
        }
        elapsed.seconds = rem as u8;

        elapsed
    }

    /// Recompose into total seconds
    pub fn as_seconds(&self) -> i64 {
        i64::from(self.days) * SECONDS_PER_DAY
            + i64::from(self.hours) * SECONDS_PER_HOUR
            + i64::from(self.minutes) * SECONDS_PER_MINUTE
            + i64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Duration {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "{}d {}:{}:{}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
