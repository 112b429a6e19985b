//! # Timing configuration
//!
//! Every wait in this firmware is a tick count, never a wall-clock value.
//! The periodic timer interrupt defines the tick, and these constants give
//! the counts their real-world meaning. All of them assume the 10 ms tick.

/// Scheduler tick period in milliseconds.
///
/// Chosen so the 50-tick phase announcement lands on the half second the
/// link protocol was designed around, and the 200-tick display hold on two
/// seconds.
pub const TICK_PERIOD_MS: u32 = 10;

/// Ticks the latch line is held high before the first bit is read.
///
/// The pad's shift register needs settling time after the latch pulse.
pub const LATCH_HOLD_TICKS: u8 = 2;

/// Ticks between a clock pulse and sampling the data line.
pub const BIT_SETTLE_TICKS: u8 = 2;

/// Ticks after a sampled bit before the next clock pulse.
pub const BIT_GAP_TICKS: u8 = 4;

/// Bits in one complete pad report.
pub const REPORT_BITS: u8 = 8;

/// Ticks a display phase holds before auto-advancing to its play phase.
pub const DISPLAY_HOLD_TICKS: u16 = 200;

/// Ticks between phase announcements over the link.
pub const ANNOUNCE_INTERVAL_TICKS: u8 = 50;

/// Buzzer frequency requested while a directional button is held.
pub const DPAD_TONE_HZ: u32 = 50;
