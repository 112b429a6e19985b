//! Game sequencer finite state machine.
//!
//! Runs the half of the two-board game protocol that lives on this station:
//! alternating display and play phases, announced to the peer, with the
//! peer deciding when a play phase is cleared.
//!
//! # Link bytes
//!
//! ```text
//! announcements (this side → peer, one per phase):
//!   Start 0x20   Display1 0x21   Display2 0x22   Display3 0x23
//!   Play1 0x24   Play2  0x25     Play3   0x26    Over     0x27
//!
//! advance sentinels (peer → this side, end a play phase):
//!   Play1 0xA2   Play2 0xA3   Play3 0xA4
//! ```
//!
//! Announcements go out on a 50-tick cadence and only when the phase byte
//! actually changed, mirroring the input dispatcher's edge-triggered send.
//! The peer's byte is read on the same cadence and consulted by the *next*
//! tick's transition pass; the one-tick latency is part of the design.

use crate::config::{ANNOUNCE_INTERVAL_TICKS, DISPLAY_HOLD_TICKS};
use crate::input::InputCode;
use crate::logging::Event;
use crate::port::Board;
use crate::sched::TickContext;

/// Sequencer phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the start button.
    Start,
    Display1,
    Display2,
    Display3,
    Play1,
    Play2,
    Play3,
    Over,
}

impl GamePhase {
    /// Byte announced to the peer while in this phase.
    pub const fn announce_byte(self) -> u8 {
        match self {
            GamePhase::Start => 0x20,
            GamePhase::Display1 => 0x21,
            GamePhase::Display2 => 0x22,
            GamePhase::Display3 => 0x23,
            GamePhase::Play1 => 0x24,
            GamePhase::Play2 => 0x25,
            GamePhase::Play3 => 0x26,
            GamePhase::Over => 0x27,
        }
    }

    /// Peer byte that ends this phase, for play phases only.
    pub const fn advance_byte(self) -> Option<u8> {
        match self {
            GamePhase::Play1 => Some(0xA2),
            GamePhase::Play2 => Some(0xA3),
            GamePhase::Play3 => Some(0xA4),
            _ => None,
        }
    }

    /// Phase entered when the advance sentinel for this play phase arrives.
    const fn advanced(self) -> Option<GamePhase> {
        match self {
            GamePhase::Play1 => Some(GamePhase::Display2),
            GamePhase::Play2 => Some(GamePhase::Display3),
            GamePhase::Play3 => Some(GamePhase::Over),
            _ => None,
        }
    }

    /// Play phase a display phase holds for.
    const fn play(self) -> Option<GamePhase> {
        match self {
            GamePhase::Display1 => Some(GamePhase::Play1),
            GamePhase::Display2 => Some(GamePhase::Play2),
            GamePhase::Display3 => Some(GamePhase::Play3),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_play(self) -> bool {
        matches!(self, GamePhase::Play1 | GamePhase::Play2 | GamePhase::Play3)
    }
}

/// The game half of the link protocol.
pub struct GameSequencer {
    phase: GamePhase,

    /// Ticks spent in the current display phase.
    hold_ticks: u16,

    /// Ticks since the last announcement window. Continuous across phases.
    announce_ticks: u8,

    /// Last phase byte the peer actually got, `None` before the first.
    last_sent: Option<u8>,

    /// Most recent byte from the peer, cleared once a transition consumes
    /// it so a stale sentinel from an earlier run cannot re-fire.
    remote: Option<u8>,

    /// Phase already reported to the event log.
    logged_phase: GamePhase,
}

impl GameSequencer {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Start,
            hold_ticks: 0,
            announce_ticks: 0,
            last_sent: None,
            remote: None,
            logged_phase: GamePhase::Start,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Byte from the peer awaiting the next transition pass, if any.
    #[inline]
    pub fn remote_signal(&self) -> Option<u8> {
        self.remote
    }

    /// Transition pass. Select resets from anywhere but `Start`; the hold
    /// counter and the stored peer byte drive the rest.
    pub fn transition(&mut self, ctx: &TickContext, _board: &mut impl Board) {
        match self.phase {
            GamePhase::Start => {
                if ctx.input == InputCode::Start {
                    self.phase = GamePhase::Display1;
                }
            }

            GamePhase::Display1 | GamePhase::Display2 | GamePhase::Display3 => {
                if ctx.input == InputCode::Select {
                    // Cancel the pending advance along with the phase
                    self.hold_ticks = 0;
                    self.phase = GamePhase::Start;
                } else {
                    self.hold_ticks += 1;
                    if self.hold_ticks >= DISPLAY_HOLD_TICKS {
                        self.hold_ticks = 0;
                        if let Some(play) = self.phase.play() {
                            self.phase = play;
                        }
                    }
                }
            }

            GamePhase::Play1 | GamePhase::Play2 | GamePhase::Play3 => {
                if ctx.input == InputCode::Select {
                    self.remote = None;
                    self.phase = GamePhase::Start;
                } else if self.remote.is_some() && self.remote == self.phase.advance_byte() {
                    self.remote = None;
                    if let Some(next) = self.phase.advanced() {
                        self.phase = next;
                    }
                }
            }

            GamePhase::Over => {
                if ctx.input == InputCode::Select {
                    self.phase = GamePhase::Start;
                }
            }
        }
    }

    /// Action pass: the 50-tick announcement window, plus the opportunistic
    /// peer read during play phases.
    pub fn actions(&mut self, ctx: &mut TickContext, board: &mut impl Board) {
        if self.phase != self.logged_phase {
            ctx.events.push(ctx.ticks, Event::PhaseChanged(self.phase));
            self.logged_phase = self.phase;
        }

        self.announce_ticks += 1;
        if self.announce_ticks < ANNOUNCE_INTERVAL_TICKS {
            return;
        }
        self.announce_ticks = 0;

        let announce = self.phase.announce_byte();
        if board.link_send_ready() && self.last_sent != Some(announce) {
            board.link_send(announce);
            self.last_sent = Some(announce);
            ctx.events.push(ctx.ticks, Event::LinkSent(announce));
        }

        if self.phase.is_play() && board.link_has_byte() {
            let byte = board.link_receive();
            self.remote = Some(byte);
            ctx.events.push(ctx.ticks, Event::LinkReceived(byte));
        }
    }
}

impl Default for GameSequencer {
    fn default() -> Self {
        Self::new()
    }
}
