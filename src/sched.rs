//! Cooperative round-robin scheduler.
//!
//! No operating system, no threads: a periodic timer interrupt advances a
//! tick counter, and once per tick every due task is stepped to completion,
//! in registration order, on the one thread of control.
//!
//! # Ordering
//!
//! Registration order is load bearing. The pad decoder runs first and may
//! update the shared input code; the dispatcher and the game sequencer run
//! after it and observe the *same* tick's value. A task never sees a write
//! made by a task registered after it until the following tick. That is the
//! whole synchronization story; no locks exist or are needed.
//!
//! # Two passes per step
//!
//! Every task is a state machine with two methods, called back to back on
//! the same tick: `transition` (reads the context, resolves the next state)
//! and `actions` (runs the settled state's work, may write the context).
//! Transitions are fully resolved before the new state's actions run.

use crate::dispatch::OutputDispatcher;
use crate::game::GameSequencer;
use crate::input::InputCode;
use crate::logging::EventLog;
use crate::pad::PadDecoder;
use crate::port::Board;

/// Number of tasks in the fixed schedule.
pub const TASK_COUNT: usize = 3;

/// Shared state every task step sees.
///
/// Passed by reference into both passes; transitions get it read-only,
/// actions get it mutable. Single writer per field per tick by convention:
/// only the pad decoder writes `input`.
pub struct TickContext {
    /// The canonical decoded button value for this tick.
    pub input: InputCode,

    /// Ticks elapsed since startup, 1-based inside the first tick.
    pub ticks: u64,

    /// Event ring the tasks report into.
    pub events: EventLog,
}

impl TickContext {
    pub const fn new() -> Self {
        Self {
            input: InputCode::None,
            ticks: 0,
            events: EventLog::new(),
        }
    }
}

impl Default for TickContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Task identity, in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskId {
    PadDecode,
    Dispatch,
    Game,
}

/// The closed set of state machines the scheduler drives.
///
/// Selected once at setup and never reassigned; the variant is the task's
/// step capability.
pub enum Machine {
    Pad(PadDecoder),
    Output(OutputDispatcher),
    Game(GameSequencer),
}

impl Machine {
    pub fn transition(&mut self, ctx: &TickContext, board: &mut impl Board) {
        match self {
            Machine::Pad(m) => m.transition(ctx, board),
            Machine::Output(m) => m.transition(ctx, board),
            Machine::Game(m) => m.transition(ctx, board),
        }
    }

    pub fn actions(&mut self, ctx: &mut TickContext, board: &mut impl Board) {
        match self {
            Machine::Pad(m) => m.actions(ctx, board),
            Machine::Output(m) => m.actions(ctx, board),
            Machine::Game(m) => m.actions(ctx, board),
        }
    }
}

/// One scheduled task: identity, cadence bookkeeping and its machine.
pub struct Task {
    id: TaskId,
    period: u32,
    elapsed: u32,
    machine: Machine,
}

impl Task {
    fn new(id: TaskId, period: u32, machine: Machine) -> Self {
        // elapsed starts at the period so the task steps on the first tick
        Self {
            id,
            period,
            elapsed: period,
            machine,
        }
    }

    #[inline]
    pub fn id(&self) -> TaskId {
        self.id
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }
}

/// The fixed 3-task schedule.
///
/// Owns the task records and the shared context. The timer side only has to
/// call [`Scheduler::tick`] once per period.
pub struct Scheduler {
    tasks: [Task; TASK_COUNT],
    ctx: TickContext,
}

impl Scheduler {
    /// Standard schedule: every task stepped every tick.
    pub fn new() -> Self {
        Self::with_periods([1, 1, 1])
    }

    /// Schedule with explicit per-task periods, registration order
    /// PadDecode, Dispatch, Game. Everything in this firmware runs at
    /// period 1; slower cadences exist for tasks that want them.
    pub fn with_periods(periods: [u32; TASK_COUNT]) -> Self {
        Self {
            tasks: [
                Task::new(
                    TaskId::PadDecode,
                    periods[0],
                    Machine::Pad(PadDecoder::new()),
                ),
                Task::new(
                    TaskId::Dispatch,
                    periods[1],
                    Machine::Output(OutputDispatcher::new()),
                ),
                Task::new(TaskId::Game, periods[2], Machine::Game(GameSequencer::new())),
            ],
            ctx: TickContext::new(),
        }
    }

    /// Run one tick: step every due task, transition pass then action pass,
    /// in registration order.
    pub fn tick(&mut self, board: &mut impl Board) {
        self.ctx.ticks += 1;

        let ctx = &mut self.ctx;
        for task in self.tasks.iter_mut() {
            if task.elapsed >= task.period {
                task.machine.transition(ctx, board);
                task.machine.actions(ctx, board);
                task.elapsed = 0;
            }
            task.elapsed += 1;
        }
    }

    /// Ticks run so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ctx.ticks
    }

    /// The shared input code as of the last tick.
    #[inline]
    pub fn input(&self) -> InputCode {
        self.ctx.input
    }

    /// Shared context, read-only.
    #[inline]
    pub fn context(&self) -> &TickContext {
        &self.ctx
    }

    /// Event ring, for draining outside the tick path.
    #[inline]
    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.ctx.events
    }

    /// Task records, registration order.
    #[inline]
    pub fn tasks(&self) -> &[Task; TASK_COUNT] {
        &self.tasks
    }

    /// The pad decoder, for inspection.
    pub fn pad(&self) -> Option<&PadDecoder> {
        self.tasks.iter().find_map(|t| match &t.machine {
            Machine::Pad(m) => Some(m),
            _ => None,
        })
    }

    /// The output dispatcher, for inspection.
    pub fn dispatcher(&self) -> Option<&OutputDispatcher> {
        self.tasks.iter().find_map(|t| match &t.machine {
            Machine::Output(m) => Some(m),
            _ => None,
        })
    }

    /// The game sequencer, for inspection.
    pub fn game(&self) -> Option<&GameSequencer> {
        self.tasks.iter().find_map(|t| match &t.machine {
            Machine::Game(m) => Some(m),
            _ => None,
        })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}
