//! station - main entry point
//!
//! Brings up the board, points SysTick at the scheduler tick period and
//! loops: step the scheduler once per tick, then drain the event log to RTT
//! while the line is quiet.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU32, Ordering};

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use panic_halt as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f0xx_hal::pac;

use snes_link_station::config::TICK_PERIOD_MS;
use snes_link_station::hal::StationBoard;
use snes_link_station::sched::Scheduler;

const SYSCLK_HZ: u32 = 48_000_000;

static TICKS: AtomicU32 = AtomicU32::new(0);

/// SysTick interrupt handler, the periodic tick source. It only advances
/// the counter; all work happens in the main loop.
#[exception]
fn SysTick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("{}", env!("VERSION_STRING"));

    if let (Some(dp), Some(cp)) = (pac::Peripherals::take(), cortex_m::Peripherals::take()) {
        let mut board = StationBoard::init(dp);

        let mut syst = cp.SYST;
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(SYSCLK_HZ / 1_000 * TICK_PERIOD_MS - 1);
        syst.clear_current();
        syst.enable_counter();
        syst.enable_interrupt();

        rprintln!("station up, tick = {} ms", TICK_PERIOD_MS);

        let mut sched = Scheduler::new();
        let mut seen: u32 = 0;

        loop {
            let now = TICKS.load(Ordering::Relaxed);
            if now == seen {
                cortex_m::asm::wfi();
                continue;
            }

            // Catch up one tick at a time so the wait counts stay exact
            while seen != now {
                seen = seen.wrapping_add(1);
                sched.tick(&mut board);
            }

            while let Some(rec) = sched.events_mut().pop() {
                rprintln!("[{:08}] {:?}", rec.tick, rec.event);
            }
        }
    }

    loop {
        cortex_m::asm::wfi();
    }
}
