//! # SnesLinkStation
//!
//! Firmware for the pad-side half of a two-microcontroller game station:
//! decodes an SNES controller's serial bit stream, mirrors the input on
//! LEDs and a buzzer, and sequences a small link-layer game protocol with
//! the peer board.
//!
//! ## Architecture
//!
//! Three state machines share one cooperative scheduler:
//!
//! ```text
//! timer tick ──▶ Scheduler ──▶ PadDecoder ──▶ shared input code
//!                        │                        │
//!                        ├──▶ OutputDispatcher ◀──┤  (LEDs, tone, link)
//!                        └──▶ GameSequencer    ◀──┘  (phase protocol)
//! ```
//!
//! Tasks run to completion in registration order every tick, so later tasks
//! read the input code the decoder published the same tick. All logic is
//! hardware-free behind the [`port::Board`] capability and testable on the
//! host; the device binding lives in `hal/` behind the board feature.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod dispatch;
pub mod game;
pub mod input;
pub mod logging;
pub mod pad;
pub mod port;
pub mod sched;
pub mod tone;

#[cfg(feature = "stm32f072")]
pub mod hal;

pub use dispatch::OutputDispatcher;
pub use game::{GamePhase, GameSequencer};
pub use input::{InputCode, PadReport};
pub use logging::{Event, EventLog, EventRecord};
pub use pad::{PadDecoder, PadState};
pub use port::Board;
pub use sched::{Machine, Scheduler, Task, TaskId, TickContext, TASK_COUNT};
pub use tone::{PulseTimer, ToneGen};
