//! Multiplexed Relay Addressing
//!
//! ## Overview
//!
//! Sixteen relays hang off a single 4-to-16 demultiplexer. Four selector
//! lines (`s0..s3`) choose the output, and one shared signal line drives it:
//!
//! ```text
//!  MCU                     74HC4067              relay board
//! ┌──────┐  s0 ───────────►┌────────┐ ch0  ──────► R0
//! │      │  s1 ───────────►│        │ ch1  ──────► R1
//! │ GPIO │  s2 ───────────►│  MUX   │ ...
//! │      │  s3 ───────────►│        │ ch15 ──────► R15
//! │      │  sig ──────────►└────────┘
//! └──────┘
//! ```
//!
//! ## Table Design
//!
//! Selector patterns come from a constant table rather than bit twiddling so
//! that a board with swapped address lines only needs a new table. The
//! default table is the plain binary encoding with `s0` as the least
//! significant bit.
//!
//! ## Write Order
//!
//! `set` writes the four selector lines first and the signal line last. The
//! previous channel's signal is not cleared before the address changes; the
//! controller relies on that to hand the pump from one valve to the next
//! without a gap. [`RelayBank::switch_off_all`] is the only place that
//! explicitly deasserts.

use embedded_hal::digital::{OutputPin, PinState};

use crate::constants::mux::{MUX_ADDRESS_LINES, MUX_CHANNELS};
use crate::errors::{IrrigationError, IrrigationResult};

/// Selector pattern `(s0, s1, s2, s3)` for one channel
pub type RelayAddress = [u8; MUX_ADDRESS_LINES];

/// Address table, indexed by channel
pub const RELAY_ADDRESSES: [RelayAddress; MUX_CHANNELS] = [
    [0, 0, 0, 0],
    [1, 0, 0, 0],
    [0, 1, 0, 0],
    [1, 1, 0, 0],
    [0, 0, 1, 0],
    [1, 0, 1, 0],
    [0, 1, 1, 0],
    [1, 1, 1, 0],
    [0, 0, 0, 1],
    [1, 0, 0, 1],
    [0, 1, 0, 1],
    [1, 1, 0, 1],
    [0, 0, 1, 1],
    [1, 0, 1, 1],
    [0, 1, 1, 1],
    [1, 1, 1, 1],
];

/// Look up the selector pattern for `channel`
///
/// ```rust
/// use waterguard_core::relay::address_for;
///
/// assert_eq!(address_for(0), Ok([0, 0, 0, 0]));
/// assert_eq!(address_for(15), Ok([1, 1, 1, 1]));
/// assert!(address_for(16).is_err());
/// ```
pub fn address_for(channel: u8) -> IrrigationResult<RelayAddress> {
    RELAY_ADDRESSES
        .get(usize::from(channel))
        .copied()
        .ok_or(IrrigationError::InvalidChannel { channel })
}

/// Actuation side of the multiplexer: four selector lines plus the signal
///
/// Owns its lines for the controller's lifetime. HALs that give every GPIO
/// its own type need to degrade them to a common pin type first.
pub struct RelayBank<P> {
    select: [P; MUX_ADDRESS_LINES],
    signal: P,
}

impl<P: OutputPin> RelayBank<P> {
    /// `select` is ordered `[s0, s1, s2, s3]`
    pub fn new(select: [P; MUX_ADDRESS_LINES], signal: P) -> Self {
        Self { select, signal }
    }

    /// Address `channel` and drive the signal line
    ///
    /// An out-of-range channel is logged and rejected before any line moves.
    pub fn set(&mut self, channel: u8, signal: bool) -> IrrigationResult<()> {
        let address = match address_for(channel) {
            Ok(address) => address,
            Err(err) => {
                log_error!("impossible channel selected: {}", channel);
                return Err(err);
            }
        };

        self.select_address(&address)?;
        self.signal
            .set_state(PinState::from(signal))
            .map_err(IrrigationError::pin)
    }

    /// Deassert the signal on every address in the table
    pub fn switch_off_all(&mut self) -> IrrigationResult<()> {
        for address in RELAY_ADDRESSES.iter() {
            self.select_address(address)?;
            self.signal.set_low().map_err(IrrigationError::pin)?;
        }
        log_info!("Reset all channels");
        Ok(())
    }

    /// Give the lines back, e.g. to reconfigure them
    pub fn release(self) -> ([P; MUX_ADDRESS_LINES], P) {
        (self.select, self.signal)
    }

    fn select_address(&mut self, address: &RelayAddress) -> IrrigationResult<()> {
        for (line, bit) in self.select.iter_mut().zip(address.iter()) {
            line.set_state(PinState::from(*bit != 0))
                .map_err(IrrigationError::pin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_binary_encoding() {
        for (channel, address) in RELAY_ADDRESSES.iter().enumerate() {
            for (bit, level) in address.iter().enumerate() {
                assert_eq!(u8::from(channel & (1 << bit) != 0), *level, "channel {channel} bit {bit}");
            }
        }
    }

    #[test]
    fn table_bounds() {
        assert_eq!(address_for(0), Ok([0, 0, 0, 0]));
        assert_eq!(address_for(5), Ok([1, 0, 1, 0]));
        assert_eq!(address_for(15), Ok([1, 1, 1, 1]));
        assert_eq!(address_for(16), Err(IrrigationError::InvalidChannel { channel: 16 }));
        assert_eq!(address_for(255), Err(IrrigationError::InvalidChannel { channel: 255 }));
    }
}
