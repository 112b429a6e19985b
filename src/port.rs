//! Hardware capability boundary.
//!
//! Everything the three tasks are allowed to touch on the outside world goes
//! through [`Board`]. The trait is the whole contract: port direction setup,
//! baud rates and timer plumbing live behind it, in the device binding.
//!
//! Link calls are non-blocking polls. Calling `link_send` without checking
//! `link_send_ready`, or `link_receive` without `link_has_byte`, is a
//! contract violation by the caller, not a reportable error.

use embedded_hal::digital::v2::{InputPin, OutputPin};

/// The I/O surface one station needs.
///
/// One implementation per environment: the stm32 binding on hardware, a
/// recording mock in the test suites. The link side of a `Board` is bound to
/// a single peer channel when the board is built.
pub trait Board {
    /// Drive the pad latch line.
    fn set_latch(&mut self, high: bool);

    /// Drive the pad clock line.
    fn set_clock(&mut self, high: bool);

    /// Sample the pad serial data line.
    fn pad_data(&self) -> bool;

    /// Drive the feedback LEDs with the current input code.
    fn set_leds(&mut self, bits: u8);

    /// Request a buzzer tone, 0 Hz for silence.
    fn set_tone(&mut self, freq_hz: u32);

    /// True when the link can accept one byte.
    fn link_send_ready(&self) -> bool;

    /// Queue one byte to the peer. Only valid after a ready check.
    fn link_send(&mut self, byte: u8);

    /// True when one received byte is buffered.
    fn link_has_byte(&self) -> bool;

    /// Take the buffered byte. Only valid after an availability check.
    fn link_receive(&mut self) -> u8;
}

/// The three pad shift-register lines over any HAL's digital pins.
///
/// Pin errors are infallible on the supported targets; failures default to
/// the safe idle level.
pub struct PadPins<L, C, D> {
    latch: L,
    clock: C,
    data: D,
}

impl<L, C, D> PadPins<L, C, D>
where
    L: OutputPin,
    C: OutputPin,
    D: InputPin,
{
    pub fn new(latch: L, clock: C, data: D) -> Self {
        Self { latch, clock, data }
    }

    pub fn set_latch(&mut self, high: bool) {
        if high {
            self.latch.set_high().ok();
        } else {
            self.latch.set_low().ok();
        }
    }

    pub fn set_clock(&mut self, high: bool) {
        if high {
            self.clock.set_high().ok();
        } else {
            self.clock.set_low().ok();
        }
    }

    pub fn data(&self) -> bool {
        self.data.is_high().unwrap_or(false)
    }
}

/// Four LED lines showing the low nibble of the input code.
pub struct LedPins<P0, P1, P2, P3> {
    bit0: P0,
    bit1: P1,
    bit2: P2,
    bit3: P3,
}

impl<P0, P1, P2, P3> LedPins<P0, P1, P2, P3>
where
    P0: OutputPin,
    P1: OutputPin,
    P2: OutputPin,
    P3: OutputPin,
{
    pub fn new(bit0: P0, bit1: P1, bit2: P2, bit3: P3) -> Self {
        Self {
            bit0,
            bit1,
            bit2,
            bit3,
        }
    }

    pub fn set(&mut self, bits: u8) {
        set_level(&mut self.bit0, bits & 0x01 != 0);
        set_level(&mut self.bit1, bits & 0x02 != 0);
        set_level(&mut self.bit2, bits & 0x04 != 0);
        set_level(&mut self.bit3, bits & 0x08 != 0);
    }
}

fn set_level<P: OutputPin>(pin: &mut P, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}
