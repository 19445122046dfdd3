//! Host clock backed by the local timezone

use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use waterguard_core::time::{ClockFields, TimePoint};
use waterguard_core::ClockSource;

/// Reads wall-clock time in `localtime()` field order
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl ClockSource for LocalClock {
    fn read_fields(&mut self) -> ClockFields {
        let fields = fields_of(&Local::now().naive_local()).to_fields();
        ClockFields::from_slice(&fields).unwrap_or_default()
    }
}

/// Weekday counts from Monday = 0, yearday from 1
pub fn fields_of(at: &NaiveDateTime) -> TimePoint {
    TimePoint {
        year: u16::try_from(at.year()).unwrap_or(0),
        month: at.month() as u16,
        day: at.day() as u16,
        hour: at.hour() as u16,
        minute: at.minute() as u16,
        second: at.second() as u16,
        weekday: at.weekday().num_days_from_monday() as u16,
        yearday: at.ordinal() as u16,
    }
}
