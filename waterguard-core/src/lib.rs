//! Core scheduling engine for WaterGuard
//!
//! Polls a calendar RTC, decides when watering is due and drives up to
//! sixteen relays through a 4-to-16 multiplexer.
//!
//! Key constraints:
//! - Runs single-threaded on small MCUs (RP2040, ESP32, STM32)
//! - No heap allocation outside the std log sink
//! - Hardware reached only through `embedded-hal` traits and [`ClockSource`]
//!
//! ```no_run
//! use waterguard_core::{ControlLoop, IrrigationConfig, RelayBank};
//! # use waterguard_core::traits::FixedClock;
//! # use waterguard_core::time::TimePoint;
//! # fn pins() -> ([Pin; 4], Pin) { unimplemented!() }
//! # fn delay() -> Delay { unimplemented!() }
//! # struct Pin;
//! # impl embedded_hal::digital::ErrorType for Pin { type Error = core::convert::Infallible; }
//! # impl embedded_hal::digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//!
//! let (select, signal) = pins();
//! let clock = FixedClock::new(TimePoint::ZERO);
//!
//! let mut controller = ControlLoop::new(
//!     IrrigationConfig::default(),
//!     clock,
//!     RelayBank::new(select, signal),
//!     delay(),
//! )?;
//!
//! // Never returns unless an output line fails
//! controller.run()?;
//! # Ok::<(), waterguard_core::IrrigationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod control;
pub mod cycle;
pub mod errors;
pub mod relay;
#[cfg(feature = "std")]
pub mod sink;
pub mod threshold;
pub mod time;
pub mod traits;

// Public API
pub use config::IrrigationConfig;
pub use control::{ControlLoop, PollOutcome};
pub use cycle::{CycleReport, CycleState, IrrigationCycle};
pub use errors::{IrrigationError, IrrigationResult};
pub use relay::{address_for, RelayBank, RELAY_ADDRESSES};
pub use threshold::{Threshold, ThresholdEvaluator, ThresholdUnit};
pub use time::{Duration, TimePoint};
pub use traits::ClockSource;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
