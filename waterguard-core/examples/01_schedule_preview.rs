//! Schedule Preview Example
//!
//! Runs the controller against a simulated clock that only moves when the
//! controller sleeps, so an hour of watering plays out instantly.
//!
//! ## What You'll Learn
//!
//! - Wiring a `ControlLoop` from a config, clock, relay bank and delay
//! - Stepping the loop with `poll()` instead of `run()`
//! - Reading `PollOutcome` and `CycleReport`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_schedule_preview
//! ```

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use waterguard_core::{
    sink::FileLogSink,
    time::{ClockFields, TimePoint},
    traits::FixedClock,
    ClockSource, ControlLoop, IrrigationConfig, PollOutcome, RelayBank, Threshold,
};

/// Simulated clock shared between the controller's clock and delay
type SimTime = Rc<RefCell<FixedClock>>;

struct SimClock(SimTime);

impl ClockSource for SimClock {
    fn read_fields(&mut self) -> ClockFields {
        self.0.borrow_mut().read_fields()
    }
}

/// Delay that advances simulated time instead of blocking
struct SimDelay(SimTime);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        let secs = u16::try_from(ms / 1_000).unwrap_or(u16::MAX);
        self.0.borrow_mut().advance_seconds(secs);
    }
}

/// Relay line with nothing attached
struct Unwired;

impl ErrorType for Unwired {
    type Error = Infallible;
}

impl OutputPin for Unwired {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn main() -> Result<(), waterguard_core::IrrigationError> {
    FileLogSink::stdout_only()
        .with_level(log::LevelFilter::Info)
        .install()
        .ok();

    let start = TimePoint::from_fields(&[2024, 6, 1, 6, 0, 0, 5, 153])?;
    let time: SimTime = Rc::new(RefCell::new(FixedClock::new(start)));

    // Water 4 beds twice every 10 minutes, 30 s per bed
    let config = IrrigationConfig::default()
        .with_threshold(Threshold::minutes(10))
        .with_channels(4)
        .with_activation(30)
        .with_poll_interval(20);

    let mut controller = ControlLoop::new(
        config,
        SimClock(time.clone()),
        RelayBank::new([Unwired, Unwired, Unwired, Unwired], Unwired),
        SimDelay(time.clone()),
    )?;

    let mut cycles = 0;
    while cycles < 3 {
        match controller.poll()? {
            PollOutcome::Irrigated(report) => {
                cycles += 1;
                println!(
                    "cycle {cycles}: {} activations over {} loops, next reference {}",
                    report.activations, report.loops, report.reference
                );
            }
            PollOutcome::ClockAnomaly => println!("clock reads earlier than the reference"),
            PollOutcome::Waiting => {}
        }
    }

    Ok(())
}
