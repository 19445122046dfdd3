//! Core Traits and Abstractions for WaterGuard
//!
//! The controller touches three pieces of hardware: a calendar clock, a bank
//! of output lines and a blocking delay. Output lines and delays already have
//! a common vocabulary in `embedded-hal` (`OutputPin`, `DelayNs`), so the only
//! trait defined here is the clock.
//!
//! ## Module Organization
//!
//! - [`clock`] - Calendar clock abstraction and a fixed test clock
//!
//! ## Usage Example
//!
//! ```rust
//! use waterguard_core::traits::{ClockSource, FixedClock};
//! use waterguard_core::time::TimePoint;
//!
//! let mut clock = FixedClock::new(TimePoint { day: 1, hour: 10, ..TimePoint::ZERO });
//! let now = TimePoint::from_fields(&clock.read_fields())?;
//! assert_eq!(now.hour, 10);
//! # Ok::<(), waterguard_core::IrrigationError>(())
//! ```

pub mod clock;

pub use clock::{ClockSource, FixedClock};

// Hardware traits consumed by the relay bank and control loop
pub use embedded_hal::delay::DelayNs;
pub use embedded_hal::digital::OutputPin;
