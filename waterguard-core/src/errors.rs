//! Error Types for the Irrigation Controller
//!
//! ## Design Philosophy
//!
//! The controller runs on a microcontroller with a single thread of control, so
//! errors follow the same rules as the rest of the core:
//!
//! 1. **No Heap Allocation**: every variant carries inline data or a
//!    `&'static str`. Nothing here needs `alloc`.
//!
//! 2. **Copy Semantics**: errors are returned from the hot polling path and are
//!    cheap to pass around and log.
//!
//! 3. **Actionable Information**: each variant says which input was wrong so the
//!    caller can decide between "log and continue" and "stop".
//!
//! ## Error Categories
//!
//! ### Clock Anomalies
//! - `InvalidDuration`: the later reading sorts before the earlier one
//! - `MalformedTimePoint`: a clock read did not yield the expected fields
//!
//! ### Addressing
//! - `InvalidChannel`: multiplexer channel outside `0..16`
//!
//! ### System Issues
//! - `InvalidConfig`: configuration rejected before the loop starts
//! - `Pin`: an output line refused a write
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use waterguard_core::IrrigationError;
//!
//! fn on_poll_error(err: IrrigationError) -> bool {
//!     match err {
//!         // Skip the operation, keep polling
//!         IrrigationError::InvalidChannel { .. } => true,
//!         IrrigationError::MalformedTimePoint { .. } => true,
//!         // Clock behind the reference, logged only
//!         IrrigationError::InvalidDuration { .. } => true,
//!         // Hardware or setup problem - stop the controller
//!         IrrigationError::Pin(_) | IrrigationError::InvalidConfig { .. } => false,
//!     }
//! }
//! ```

use embedded_hal::digital::ErrorKind;
use thiserror_no_std::Error;

/// Result type for controller operations
pub type IrrigationResult<T> = Result<T, IrrigationError>;

/// Controller errors - kept small and `Copy` for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum IrrigationError {
    /// Later reading precedes the earlier one in total seconds
    #[error("Invalid duration input: later reading {later}s precedes earlier reading {earlier}s")]
    InvalidDuration {
        /// Total seconds of the reading expected to come first
        earlier: i64,
        /// Total seconds of the reading expected to come second
        later: i64,
    },

    /// Multiplexer channel outside the 16-entry address table
    #[error("Impossible channel selected: {channel}")]
    InvalidChannel {
        /// Requested channel index
        channel: u8,
    },

    /// Clock read did not produce a complete set of fields
    #[error("Not possible to parse the current time: expected {expected} fields, got {found}")]
    MalformedTimePoint {
        /// Number of fields a reading must have
        expected: usize,
        /// Number of fields the clock returned
        found: usize,
    },

    /// Configuration rejected at startup
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        reason: &'static str,
    },

    /// Output line write failed
    #[error("Output line error: {0:?}")]
    Pin(ErrorKind),
}

impl IrrigationError {
    /// Map a HAL pin error into the controller's error space
    pub fn pin<E: embedded_hal::digital::Error>(err: E) -> Self {
        Self::Pin(err.kind())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrrigationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidDuration { earlier, later } =>
                defmt::write!(fmt, "Later reading {}s precedes {}s", later, earlier),
            Self::InvalidChannel { channel } =>
                defmt::write!(fmt, "Impossible channel: {}", channel),
            Self::MalformedTimePoint { expected, found } =>
                defmt::write!(fmt, "Clock fields: need {}, got {}", expected, found),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::Pin(kind) =>
                defmt::write!(fmt, "Output line: {}", kind),
        }
    }
}
