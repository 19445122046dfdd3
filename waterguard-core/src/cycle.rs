//! Irrigation cycle state machine
//!
//! ```text
//!            threshold met (checked by ControlLoop)
//!   ┌──────┐ ─────────────────────────────────────► ┌────────────┐
//!   │ Idle │                                        │ Irrigating │
//!   └──────┘ ◄───────────────────────────────────── └────────────┘
//!            all loops done, lines off, reference reset
//! ```
//!
//! While irrigating, every configured channel is addressed in turn with the
//! signal asserted and held for the activation time. The signal is only
//! dropped once, across the whole address table, after the final loop.
//!
//! A cycle cannot be aborted. A failing output line ends it early with the
//! error and leaves the state at `Irrigating`, so a supervisor can tell a
//! half-run cycle from an idle controller.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::IrrigationConfig;
use crate::constants::time::MS_PER_SECOND;
use crate::errors::IrrigationResult;
use crate::relay::RelayBank;
use crate::time::TimePoint;
use crate::traits::ClockSource;

/// Where the cycle is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Idle,
    Irrigating,
}

/// Summary of a completed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Loops executed
    pub loops: u16,
    /// Relay activations, `loops * channel_count`
    pub activations: u32,
    /// Reference reading in force after the cycle
    pub reference: TimePoint,
}

/// Watering sequence plus the "last watered" reference reading
#[derive(Debug, Clone)]
pub struct IrrigationCycle {
    state: CycleState,
    reference: TimePoint,
    channel_count: u8,
    activation_secs: u32,
    loop_count: u16,
}

impl IrrigationCycle {
    pub fn new(config: &IrrigationConfig, reference: TimePoint) -> Self {
        Self {
            state: CycleState::Idle,
            reference,
            channel_count: config.channel_count,
            activation_secs: config.activation_secs,
            loop_count: config.loop_count,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Reading elapsed time is measured from
    pub fn reference(&self) -> &TimePoint {
        &self.reference
    }

    /// Run every loop to completion, then reset the reference
    ///
    /// Blocks for `loop_count * channel_count * activation_secs` seconds.
    /// The new reference is captured from `clock` after the lines are off; a
    /// malformed capture is logged and the old reference is kept.
    pub fn run<P, D, C>(
        &mut self,
        bank: &mut RelayBank<P>,
        delay: &mut D,
        clock: &mut C,
    ) -> IrrigationResult<CycleReport>
    where
        P: OutputPin,
        D: DelayNs,
        C: ClockSource,
    {
        self.state = CycleState::Irrigating;

        let hold_ms = self.activation_secs.saturating_mul(MS_PER_SECOND);
        let mut activations = 0u32;

        for _pass in 0..self.loop_count {
            log_debug!("Irrigation loop: {}", _pass);
            for channel in 0..self.channel_count {
                log_info!(
                    "Activated relay {}. Water will be active for: {}s",
                    channel,
                    self.activation_secs
                );
                bank.set(channel, true)?;
                delay.delay_ms(hold_ms);
                activations += 1;
            }
        }

        bank.switch_off_all()?;
        self.reset_reference(clock);
        self.state = CycleState::Idle;

        Ok(CycleReport {
            loops: self.loop_count,
            activations,
            reference: self.reference,
        })
    }

    fn reset_reference<C: ClockSource>(&mut self, clock: &mut C) {
        match TimePoint::from_fields(&clock.read_fields()) {
            Ok(now) => {
                log_info!("reference time reset to: {}", now);
                self.reference = now;
            }
            Err(_err) => {
                log_error!("reference time not reset: {}", _err);
            }
        }
    }
}
