//! Time-Related Constants
//!
//! Unit conversions used by the elapsed-time arithmetic and the blocking
//! delays of the control loop.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: u32 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: i64 = SECONDS_PER_MINUTE * 60;

/// Seconds per day.
///
/// The duration arithmetic folds day-of-month in at this rate, so the
/// result is only meaningful between readings of the same month.
pub const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * 24;

// ===== CLOCK READINGS =====

/// Number of fields in a complete clock reading.
///
/// `(year, month, mday, hour, minute, second, weekday, yearday)`, the layout
/// MicroPython-style `localtime()` RTC APIs return.
pub const CLOCK_FIELD_COUNT: usize = 8;

/// Capacity reserved for a raw clock reading.
///
/// Larger than [`CLOCK_FIELD_COUNT`] so an over-long read is detected
/// instead of silently truncated.
pub const MAX_CLOCK_FIELDS: usize = 16;
