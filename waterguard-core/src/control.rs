//! Polling control loop
//!
//! One thread of control owns the clock, the relay lines and the delay:
//!
//! ```text
//! loop {
//!     capture now
//!     elapsed = now - reference          (clock sanity)
//!     if threshold(reference, now) {
//!         run irrigation cycle           (blocks for the whole cycle)
//!     } else {
//!         sleep poll interval
//!     }
//! }
//! ```
//!
//! The threshold is never evaluated while a cycle runs, because the cycle
//! runs inside the same call that evaluated it.
//!
//! ## Clock anomalies
//!
//! If the reference sorts after the new reading (a clock set backwards, or
//! a month rollover, since months are not part of the arithmetic), the
//! anomaly is logged and reported. It changes nothing else: the threshold is
//! still evaluated on its fields and only a completed cycle moves the
//! reference.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::IrrigationConfig;
use crate::constants::time::MS_PER_SECOND;
use crate::cycle::{CycleReport, IrrigationCycle};
use crate::errors::IrrigationResult;
use crate::relay::RelayBank;
use crate::threshold::ThresholdEvaluator;
use crate::time::{Duration, TimePoint};
use crate::traits::ClockSource;

/// What a single poll did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Threshold not met, slept one poll interval
    Waiting,
    /// Threshold met, a full cycle ran
    Irrigated(CycleReport),
    /// Threshold not met and the clock reads earlier than the reference;
    /// slept one poll interval
    ClockAnomaly,
}

/// The controller: configuration, owned hardware and cycle state
pub struct ControlLoop<C, P, D> {
    config: IrrigationConfig,
    clock: C,
    bank: RelayBank<P>,
    delay: D,
    cycle: IrrigationCycle,
    current: TimePoint,
}

impl<C, P, D> ControlLoop<C, P, D>
where
    C: ClockSource,
    P: OutputPin,
    D: DelayNs,
{
    /// Validate `config`, switch every relay off and take the first reading
    ///
    /// The first reading becomes both the reference and the current time.
    pub fn new(config: IrrigationConfig, mut clock: C, mut bank: RelayBank<P>, delay: D) -> IrrigationResult<Self> {
        config.validate()?;
        bank.switch_off_all()?;

        let start = capture(&mut clock, TimePoint::ZERO);
        log_info!("controller started at {}", start);

        Ok(Self {
            cycle: IrrigationCycle::new(&config, start),
            config,
            clock,
            bank,
            delay,
            current: start,
        })
    }

    pub fn config(&self) -> &IrrigationConfig {
        &self.config
    }

    pub fn cycle(&self) -> &IrrigationCycle {
        &self.cycle
    }

    /// Most recent successful reading
    pub fn current(&self) -> &TimePoint {
        &self.current
    }

    /// One iteration of the loop
    ///
    /// Only output line failures are returned as errors; everything else is
    /// logged and reflected in the outcome.
    pub fn poll(&mut self) -> IrrigationResult<PollOutcome> {
        self.current = capture(&mut self.clock, self.current);
        let reference = *self.cycle.reference();

        let clock_sane = match Duration::between(&reference, &self.current) {
            Ok(_elapsed) => {
                log_debug!("{} elapsed since {}", _elapsed, reference);
                true
            }
            Err(_err) => {
                log_error!("clock anomaly: {}", _err);
                false
            }
        };

        if ThresholdEvaluator::new(&reference, &self.current).reached(self.config.threshold) {
            let report = self.cycle.run(&mut self.bank, &mut self.delay, &mut self.clock)?;
            return Ok(PollOutcome::Irrigated(report));
        }

        self.sleep_poll_interval();
        if clock_sane {
            Ok(PollOutcome::Waiting)
        } else {
            Ok(PollOutcome::ClockAnomaly)
        }
    }

    /// Poll forever; returns only when an output line fails
    pub fn run(&mut self) -> IrrigationResult<Infallible> {
        loop {
            self.poll()?;
        }
    }

    /// Tear down and hand the hardware back
    pub fn release(self) -> (C, RelayBank<P>, D) {
        (self.clock, self.bank, self.delay)
    }

    fn sleep_poll_interval(&mut self) {
        self.delay
            .delay_ms(self.config.poll_interval_secs.saturating_mul(MS_PER_SECOND));
    }
}

/// Read the clock, keeping `previous` if the reading is malformed
fn capture<C: ClockSource>(clock: &mut C, previous: TimePoint) -> TimePoint {
    match TimePoint::from_fields(&clock.read_fields()) {
        Ok(now) => now,
        Err(_err) => {
            log_error!("{}", _err);
            previous
        }
    }
}
