//! Controller configuration
//!
//! Defaults come from [`constants::irrigation`](crate::constants::irrigation)
//! and can be overridden with builder-style setters or, on std targets, a
//! JSON document:
//!
//! ```json
//! {
//!   "poll_interval_secs": 5,
//!   "activation_secs": 7,
//!   "loop_count": 2,
//!   "channel_count": 7,
//!   "threshold": { "unit": "minutes", "amount": 1 }
//! }
//! ```
//!
//! Missing keys fall back to their defaults.

use crate::constants::irrigation::{
    DEFAULT_ACTIVATION_SECS, DEFAULT_CHANNEL_COUNT, DEFAULT_LOOP_COUNT,
    DEFAULT_POLL_INTERVAL_SECS,
};
use crate::constants::mux::MUX_CHANNELS;
use crate::errors::{IrrigationError, IrrigationResult};
use crate::threshold::Threshold;

/// Everything the control loop needs to know up front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IrrigationConfig {
    /// Sleep between polls while idle (seconds)
    pub poll_interval_secs: u32,
    /// Hold time per relay activation (seconds)
    pub activation_secs: u32,
    /// Passes over the channel set per cycle
    pub loop_count: u16,
    /// Channels `0..channel_count` are watered
    pub channel_count: u8,
    /// When a cycle is due
    pub threshold: Threshold,
}

impl Default for IrrigationConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            activation_secs: DEFAULT_ACTIVATION_SECS,
            loop_count: DEFAULT_LOOP_COUNT,
            channel_count: DEFAULT_CHANNEL_COUNT,
            threshold: Threshold::default(),
        }
    }
}

impl IrrigationConfig {
    pub fn with_poll_interval(mut self, secs: u32) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    pub fn with_activation(mut self, secs: u32) -> Self {
        self.activation_secs = secs;
        self
    }

    pub fn with_loops(mut self, loops: u16) -> Self {
        self.loop_count = loops;
        self
    }

    pub fn with_channels(mut self, channels: u8) -> Self {
        self.channel_count = channels;
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Reject settings the hardware or loop cannot honour
    pub fn validate(&self) -> IrrigationResult<()> {
        if self.channel_count == 0 || usize::from(self.channel_count) > MUX_CHANNELS {
            return Err(IrrigationError::InvalidConfig {
                reason: "channel_count must be within 1..=16",
            });
        }
        if self.poll_interval_secs == 0 {
            return Err(IrrigationError::InvalidConfig {
                reason: "poll_interval_secs must be non-zero",
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    #[cfg(feature = "std")]
    pub fn from_json(json: &str) -> IrrigationResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|_err| {
            log_error!("configuration rejected: {}", _err);
            IrrigationError::InvalidConfig { reason: "malformed JSON configuration" }
        })?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::ThresholdUnit;

    #[test]
    fn defaults_match_factory_settings() {
        let config = IrrigationConfig::default();
        assert_eq!(config.poll_interval_secs, 5);
        assert_eq!(config.activation_secs, 7);
        assert_eq!(config.loop_count, 2);
        assert_eq!(config.channel_count, 7);
        assert_eq!(config.threshold, Threshold::minutes(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn channel_count_bounds() {
        assert!(IrrigationConfig::default().with_channels(16).validate().is_ok());
        assert!(IrrigationConfig::default().with_channels(0).validate().is_err());
        assert!(matches!(
            IrrigationConfig::default().with_channels(17).validate(),
            Err(IrrigationError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn zero_poll_interval_rejected() {
        assert!(IrrigationConfig::default().with_poll_interval(0).validate().is_err());
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_overrides_and_defaults() {
        let config = IrrigationConfig::from_json(
            r#"{ "channel_count": 16, "threshold": { "unit": "days", "amount": 1 } }"#,
        )
        .unwrap();

        assert_eq!(config.channel_count, 16);
        assert_eq!(config.threshold.unit, ThresholdUnit::Days);
        assert_eq!(config.activation_secs, 7);
    }

    #[cfg(feature = "std")]
    #[test]
    fn json_errors_are_config_errors() {
        assert!(matches!(
            IrrigationConfig::from_json("{ not json"),
            Err(IrrigationError::InvalidConfig { .. })
        ));
        assert!(IrrigationConfig::from_json(r#"{ "channel_count": 20 }"#).is_err());
    }
}
