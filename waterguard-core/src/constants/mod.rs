//! Constants for WaterGuard Core
//!
//! Centralized numeric values for the controller, grouped by domain:
//! - **Time**: unit conversions and clock reading layout
//! - **Mux**: multiplexer geometry
//! - **Irrigation**: factory defaults for the control loop
//!
//! Use these instead of magic numbers, and name new constants with their unit.

/// Time-related constants for conversions and clock readings.
pub mod time;

/// Multiplexer address space.
pub mod mux;

/// Default polling, watering and scheduling parameters.
pub mod irrigation;

// Re-export commonly used constants for convenience
pub use time::{
    MS_PER_SECOND, SECONDS_PER_MINUTE, SECONDS_PER_HOUR, SECONDS_PER_DAY,
    CLOCK_FIELD_COUNT, MAX_CLOCK_FIELDS,
};

pub use mux::{MUX_ADDRESS_LINES, MUX_CHANNELS};

pub use irrigation::{
    DEFAULT_POLL_INTERVAL_SECS, DEFAULT_ACTIVATION_SECS,
    DEFAULT_LOOP_COUNT, DEFAULT_CHANNEL_COUNT,
    DEFAULT_LOG_FILE,
};
