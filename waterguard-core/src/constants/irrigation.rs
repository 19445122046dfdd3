//! Irrigation Defaults
//!
//! Factory settings for the control loop. Every value can be overridden
//! through [`IrrigationConfig`](crate::config::IrrigationConfig).

// ===== POLLING =====

/// Sleep between clock polls while idle (seconds).
pub const DEFAULT_POLL_INTERVAL_SECS: u32 = 5;

// ===== WATERING =====

/// How long each relay stays open (seconds).
///
/// Seven seconds delivers roughly a glass of water with a small
/// 5V submersible pump.
pub const DEFAULT_ACTIVATION_SECS: u32 = 7;

/// Passes over the configured channels per cycle.
pub const DEFAULT_LOOP_COUNT: u16 = 2;

/// Relay channels driven per pass.
///
/// Set to [`MUX_CHANNELS`](super::mux::MUX_CHANNELS) if every output is wired.
pub const DEFAULT_CHANNEL_COUNT: u8 = 7;

// ===== SCHEDULING =====

/// Threshold amount, interpreted in [`DEFAULT_THRESHOLD_UNIT`].
pub const DEFAULT_THRESHOLD_AMOUNT: u16 = 1;

/// Unit of the default watering threshold.
pub const DEFAULT_THRESHOLD_UNIT: crate::threshold::ThresholdUnit =
    crate::threshold::ThresholdUnit::Minutes;

// ===== LOGGING =====

/// File the std log sink appends to.
pub const DEFAULT_LOG_FILE: &str = "execution.log";

/// Width of each `=` run in the boot banner.
pub const BANNER_WIDTH: usize = 50;
