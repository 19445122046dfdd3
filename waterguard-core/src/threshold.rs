//! Watering threshold checks
//!
//! Decides whether enough time has passed since the last watering. The
//! comparison is field-local: "one minute elapsed" means the
//! minute-of-hour field grew by at least one. A reference at `10:58` and a
//! reading at `11:05` give `5 - 58 = -53`, so the threshold is not met until
//! the clock reaches minute 59 of some later hour. The normalized
//! [`Duration`](crate::time::Duration) is not consulted.

use core::fmt;

use crate::time::TimePoint;

/// Calendar field a threshold is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ThresholdUnit {
    Minutes,
    Hours,
    Days,
}

impl ThresholdUnit {
    /// Short suffix used in log lines
    pub const fn suffix(&self) -> &'static str {
        match self {
            ThresholdUnit::Minutes => "min",
            ThresholdUnit::Hours => "h",
            ThresholdUnit::Days => "day(s)",
        }
    }

    /// The field of `tp` this unit compares
    fn field(&self, tp: &TimePoint) -> i32 {
        let raw = match self {
            ThresholdUnit::Minutes => tp.minute,
            ThresholdUnit::Hours => tp.hour,
            ThresholdUnit::Days => tp.day,
        };
        i32::from(raw)
    }
}

impl fmt::Display for ThresholdUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThresholdUnit {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.suffix())
    }
}

/// Amount plus unit, e.g. "1 minute" or "2 days"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Threshold {
    pub unit: ThresholdUnit,
    pub amount: u16,
}

impl Threshold {
    pub const fn minutes(amount: u16) -> Self {
        Self { unit: ThresholdUnit::Minutes, amount }
    }

    pub const fn hours(amount: u16) -> Self {
        Self { unit: ThresholdUnit::Hours, amount }
    }

    pub const fn days(amount: u16) -> Self {
        Self { unit: ThresholdUnit::Days, amount }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        use crate::constants::irrigation::{DEFAULT_THRESHOLD_AMOUNT, DEFAULT_THRESHOLD_UNIT};
        Self { unit: DEFAULT_THRESHOLD_UNIT, amount: DEFAULT_THRESHOLD_AMOUNT }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.unit)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Threshold {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}{}", self.amount, self.unit.suffix())
    }
}

/// Compares a current reading against the reference reading
///
/// ```rust
/// use waterguard_core::threshold::ThresholdEvaluator;
/// use waterguard_core::time::TimePoint;
///
/// let start = TimePoint { day: 1, hour: 10, minute: 0, ..TimePoint::ZERO };
/// let now = TimePoint { minute: 1, ..start };
///
/// assert!(ThresholdEvaluator::new(&start, &now).elapsed_minutes_at_least(1));
/// assert!(!ThresholdEvaluator::new(&start, &now).elapsed_hours_at_least(1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThresholdEvaluator<'a> {
    reference: &'a TimePoint,
    current: &'a TimePoint,
}

impl<'a> ThresholdEvaluator<'a> {
    pub fn new(reference: &'a TimePoint, current: &'a TimePoint) -> Self {
        Self { reference, current }
    }

    pub fn elapsed_minutes_at_least(&self, minutes: u16) -> bool {
        self.reached(Threshold::minutes(minutes))
    }

    pub fn elapsed_hours_at_least(&self, hours: u16) -> bool {
        self.reached(Threshold::hours(hours))
    }

    pub fn elapsed_days_at_least(&self, days: u16) -> bool {
        self.reached(Threshold::days(days))
    }

    /// Signed difference of the unit's field, current minus reference
    pub fn field_delta(&self, unit: ThresholdUnit) -> i32 {
        unit.field(self.current) - unit.field(self.reference)
    }

    /// True once the field difference reaches `threshold.amount`
    pub fn reached(&self, threshold: Threshold) -> bool {
        if self.field_delta(threshold.unit) < i32::from(threshold.amount) {
            return false;
        }

        log_info!(
            "{} passed. Start time: {}; Current time: {}",
            threshold,
            self.reference,
            self.current
        );
        true
    }
}
