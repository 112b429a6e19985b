//! Pad decoder finite state machine.
//!
//! Pure logic, no hardware dependencies beyond the [`Board`] lines. The pad
//! is a parallel-in shift register: a latch pulse freezes the button levels,
//! then each clock pulse presents the next bit on the serial data line,
//! pressed reading as low.
//!
//! One complete read is, in ticks:
//!
//! ```text
//! latch high ── 2 ticks ── latch low, sample bit 1
//! clock pulse ── 2 ticks ── sample ── 4 ticks ── clock pulse ...   (×7)
//! decode, publish, start over
//! ```
//!
//! The first bit needs no clock pulse: the latch alone presents it. The
//! decoder polls continuously; there is no idle period between reads.

use crate::config::{BIT_GAP_TICKS, BIT_SETTLE_TICKS, LATCH_HOLD_TICKS, REPORT_BITS};
use crate::input::PadReport;
use crate::logging::Event;
use crate::port::Board;
use crate::sched::TickContext;

/// Decoder FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadState {
    /// Power-on state, leaves immediately.
    Start,
    /// Lines idle, counters cleared, about to latch.
    Init,
    /// Latch held high while the shift register settles.
    LatchHold,
    /// Latch dropped, first bit sampled, first clock pulse pending.
    FirstBit,
    /// Waiting out the settle delay before sampling a bit.
    BitSettle,
    /// Waiting out the gap before the next clock pulse.
    BitGap,
    /// All 8 bits in, publish the decoded code.
    Decode,
}

/// Serial pad decoder.
///
/// Stepped once per scheduler tick, transition pass then action pass.
/// Publishes into the shared input code; the dispatcher and the sequencer
/// read it later in the same tick.
pub struct PadDecoder {
    state: PadState,

    /// Ticks spent in the current wait window.
    wait: u8,

    /// Bits sampled so far in this read cycle.
    bits: u8,

    /// Accumulator, one bit shifted in per sample, first bit ending up
    /// in the most significant position. Active low until decode inverts it.
    raw: u8,
}

impl PadDecoder {
    pub fn new() -> Self {
        Self {
            state: PadState::Start,
            wait: 0,
            bits: 0,
            raw: 0,
        }
    }

    /// Current FSM state.
    #[inline]
    pub fn state(&self) -> PadState {
        self.state
    }

    /// Transition pass: resolve the next state, driving the latch and clock
    /// lines on the way.
    pub fn transition(&mut self, _ctx: &TickContext, board: &mut impl Board) {
        match self.state {
            PadState::Start => {
                self.state = PadState::Init;
            }

            PadState::Init => {
                board.set_latch(true);
                self.state = PadState::LatchHold;
            }

            PadState::LatchHold => {
                if self.wait < LATCH_HOLD_TICKS {
                    self.wait += 1;
                } else {
                    board.set_latch(false);
                    self.wait = 0;
                    self.state = PadState::FirstBit;
                }
            }

            PadState::FirstBit => {
                // First clock pulse; the bit it shifts in is sampled after
                // the settle window.
                board.set_clock(true);
                self.state = PadState::BitSettle;
            }

            PadState::BitSettle => {
                if self.wait < BIT_SETTLE_TICKS {
                    self.wait += 1;
                } else {
                    self.wait = 0;
                    self.raw = (self.raw << 1) | board.pad_data() as u8;
                    self.bits += 1;
                    self.state = PadState::BitGap;
                }
            }

            PadState::BitGap => {
                if self.wait < BIT_GAP_TICKS {
                    self.wait += 1;
                } else if self.bits >= REPORT_BITS {
                    self.state = PadState::Decode;
                } else {
                    board.set_clock(false);
                    board.set_clock(true);
                    self.wait = 0;
                    self.state = PadState::BitSettle;
                }
            }

            PadState::Decode => {
                // Straight back into the next poll cycle
                self.state = PadState::Init;
            }
        }
    }

    /// Action pass for the state settled on this tick.
    pub fn actions(&mut self, ctx: &mut TickContext, board: &mut impl Board) {
        match self.state {
            PadState::Init => {
                self.wait = 0;
                self.bits = 0;
                self.raw = 0;
                board.set_latch(false);
                board.set_clock(false);
            }

            PadState::FirstBit => {
                // The latch just dropped; the register already presents the
                // first bit with no clock pulse needed.
                self.raw = board.pad_data() as u8;
                self.bits = 1;
            }

            PadState::Decode => {
                let code = PadReport::from_raw(self.raw).decode();
                if code != ctx.input {
                    ctx.events.push(ctx.ticks, Event::InputChanged(code));
                }
                ctx.input = code;
            }

            PadState::Start | PadState::LatchHold | PadState::BitSettle | PadState::BitGap => {}
        }
    }
}

impl Default for PadDecoder {
    fn default() -> Self {
        Self::new()
    }
}
