//! Multiplexer Geometry
//!
//! A 74HC4067-style 4-to-16 demultiplexer: four selector lines pick one of
//! sixteen outputs, and a shared signal line drives the selected one.

/// Number of selector (address) lines.
pub const MUX_ADDRESS_LINES: usize = 4;

/// Number of addressable channels (2^4).
pub const MUX_CHANNELS: usize = 1 << MUX_ADDRESS_LINES;
