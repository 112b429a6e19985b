//! Output dispatcher.
//!
//! Fans the shared input code out every tick: LEDs, buzzer tone for the
//! d-pad, and one byte to the peer per actual change. The LED and tone
//! drives are unconditional; both sinks are idempotent by value, so
//! re-driving an unchanged code costs nothing observable.
//!
//! The link send is edge triggered. Without the last-sent memory a held
//! button would flood the peer with the same byte every tick.

use crate::config::DPAD_TONE_HZ;
use crate::logging::Event;
use crate::port::Board;
use crate::sched::TickContext;

/// Dispatcher FSM state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchState {
    Start,
    /// Steady state, self-looping.
    Forward,
}

/// Forwards the decoded input to the local feedback and the link.
pub struct OutputDispatcher {
    state: DispatchState,

    /// Last byte actually accepted by the link, `None` before the first
    /// send so the initial code always goes out once.
    last_sent: Option<u8>,
}

impl OutputDispatcher {
    pub fn new() -> Self {
        Self {
            state: DispatchState::Start,
            last_sent: None,
        }
    }

    #[inline]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Byte most recently sent over the link, if any.
    #[inline]
    pub fn last_sent(&self) -> Option<u8> {
        self.last_sent
    }

    pub fn transition(&mut self, _ctx: &TickContext, _board: &mut impl Board) {
        match self.state {
            DispatchState::Start => self.state = DispatchState::Forward,
            DispatchState::Forward => {}
        }
    }

    pub fn actions(&mut self, ctx: &mut TickContext, board: &mut impl Board) {
        match self.state {
            DispatchState::Start => {}

            DispatchState::Forward => {
                let code = ctx.input;

                board.set_leds(code.code());

                if code.is_dpad() {
                    board.set_tone(DPAD_TONE_HZ);
                } else {
                    board.set_tone(0);
                }

                // Send once per change, and only when the transport can
                // take the byte. An unsent change is retried next tick
                // because last_sent only records successes.
                if board.link_send_ready() && self.last_sent != Some(code.code()) {
                    board.link_send(code.code());
                    self.last_sent = Some(code.code());
                    ctx.events.push(ctx.ticks, Event::LinkSent(code.code()));
                }
            }
        }
    }
}

impl Default for OutputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
