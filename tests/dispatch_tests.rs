//! Output dispatcher integration tests.

mod common;

use common::MockBoard;
use snes_link_station::config::DPAD_TONE_HZ;
use snes_link_station::dispatch::{DispatchState, OutputDispatcher};
use snes_link_station::input::InputCode;
use snes_link_station::sched::TickContext;

fn step(disp: &mut OutputDispatcher, ctx: &mut TickContext, board: &mut MockBoard) {
    ctx.ticks += 1;
    disp.transition(ctx, board);
    disp.actions(ctx, board);
}

#[test]
fn test_first_tick_forwards_the_initial_code() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    step(&mut disp, &mut ctx, &mut board);
    assert_eq!(disp.state(), DispatchState::Forward);

    // Nothing pressed still goes out once: the peer learns the idle state
    assert_eq!(board.tx, [0x00]);
    assert_eq!(board.leds, 0);
    assert_eq!(board.last_tone(), Some(0));
}

#[test]
fn test_held_button_sends_once() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    ctx.input = InputCode::Up;
    for _ in 0..20 {
        step(&mut disp, &mut ctx, &mut board);
    }

    assert_eq!(board.tx, [0x01]);
    // LEDs are re-driven every tick regardless
    assert_eq!(board.led_writes, 20);
    assert_eq!(board.leds, 1);
}

#[test]
fn test_sends_exactly_once_per_change() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    step(&mut disp, &mut ctx, &mut board);

    ctx.input = InputCode::Up;
    step(&mut disp, &mut ctx, &mut board);
    step(&mut disp, &mut ctx, &mut board);

    ctx.input = InputCode::None;
    step(&mut disp, &mut ctx, &mut board);

    ctx.input = InputCode::B;
    step(&mut disp, &mut ctx, &mut board);

    assert_eq!(board.tx, [0x00, 0x01, 0x00, 0x08]);
}

#[test]
fn test_unready_link_blocks_then_retries() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    board.tx_ready = false;
    ctx.input = InputCode::Select;
    for _ in 0..5 {
        step(&mut disp, &mut ctx, &mut board);
    }
    assert!(board.tx.is_empty());
    assert_eq!(disp.last_sent(), None);

    // First ready tick delivers the pending code, later ticks stay quiet
    board.tx_ready = true;
    step(&mut disp, &mut ctx, &mut board);
    assert_eq!(board.tx, [0x05]);
    assert_eq!(disp.last_sent(), Some(0x05));

    step(&mut disp, &mut ctx, &mut board);
    assert_eq!(board.tx, [0x05]);
}

#[test]
fn test_dpad_gets_tone_everything_else_silence() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    for code in [
        InputCode::Up,
        InputCode::Down,
        InputCode::Left,
        InputCode::Right,
    ] {
        ctx.input = code;
        step(&mut disp, &mut ctx, &mut board);
        assert_eq!(board.last_tone(), Some(DPAD_TONE_HZ), "{:?}", code);
    }

    for code in [
        InputCode::None,
        InputCode::Select,
        InputCode::Start,
        InputCode::Y,
        InputCode::B,
    ] {
        ctx.input = code;
        step(&mut disp, &mut ctx, &mut board);
        assert_eq!(board.last_tone(), Some(0), "{:?}", code);
    }
}

#[test]
fn test_leds_mirror_the_code() {
    let mut disp = OutputDispatcher::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    for (code, bits) in [
        (InputCode::Up, 1),
        (InputCode::Select, 5),
        (InputCode::B, 8),
        (InputCode::None, 0),
    ] {
        ctx.input = code;
        step(&mut disp, &mut ctx, &mut board);
        assert_eq!(board.leds, bits);
    }
}
