//! Pad decoder integration tests against the simulated shift register.

mod common;

use common::MockBoard;
use snes_link_station::input::{InputCode, PadReport};
use snes_link_station::logging::Event;
use snes_link_station::pad::{PadDecoder, PadState};
use snes_link_station::sched::TickContext;

fn step(dec: &mut PadDecoder, ctx: &mut TickContext, board: &mut MockBoard) {
    ctx.ticks += 1;
    dec.transition(ctx, board);
    dec.actions(ctx, board);
}

/// Tick until the decoder finishes one read cycle. Returns the tick count.
fn run_one_cycle(dec: &mut PadDecoder, ctx: &mut TickContext, board: &mut MockBoard) -> u32 {
    for n in 1..=500 {
        step(dec, ctx, board);
        if dec.state() == PadState::Decode {
            return n;
        }
    }
    panic!("decoder never completed a read cycle");
}

#[test]
fn test_every_button_decodes() {
    let table = [
        (PadReport::UP, InputCode::Up),
        (PadReport::DOWN, InputCode::Down),
        (PadReport::LEFT, InputCode::Left),
        (PadReport::RIGHT, InputCode::Right),
        (PadReport::SELECT, InputCode::Select),
        (PadReport::START, InputCode::Start),
        (PadReport::Y, InputCode::Y),
        (PadReport::B, InputCode::B),
    ];

    for (mask, expected) in table {
        let mut dec = PadDecoder::new();
        let mut ctx = TickContext::new();
        let mut board = MockBoard::new();

        board.press(mask);
        run_one_cycle(&mut dec, &mut ctx, &mut board);

        assert_eq!(ctx.input, expected, "mask {:#04x}", mask);
    }
}

#[test]
fn test_idle_pad_decodes_none() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    run_one_cycle(&mut dec, &mut ctx, &mut board);

    assert_eq!(ctx.input, InputCode::None);
}

#[test]
fn test_chord_decodes_none() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    board.press(PadReport::UP | PadReport::B);
    run_one_cycle(&mut dec, &mut ctx, &mut board);

    assert_eq!(ctx.input, InputCode::None);
}

#[test]
fn test_one_latch_and_seven_clock_pulses_per_report() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    board.press(PadReport::UP);
    run_one_cycle(&mut dec, &mut ctx, &mut board);

    // The first bit comes from the latch alone; the remaining seven each
    // need a clock pulse.
    assert_eq!(board.latch_pulses, 1);
    assert_eq!(board.clock_pulses, 7);
}

#[test]
fn test_polls_continuously() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    board.press(PadReport::LEFT);
    run_one_cycle(&mut dec, &mut ctx, &mut board);
    assert_eq!(ctx.input, InputCode::Left);

    // Next cycle picks up the release with no reset in between
    board.release();
    run_one_cycle(&mut dec, &mut ctx, &mut board);
    assert_eq!(ctx.input, InputCode::None);

    board.press(PadReport::START);
    run_one_cycle(&mut dec, &mut ctx, &mut board);
    assert_eq!(ctx.input, InputCode::Start);

    assert_eq!(board.latch_pulses, 3);
}

#[test]
fn test_cycle_length_is_stable() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    run_one_cycle(&mut dec, &mut ctx, &mut board);
    let second = run_one_cycle(&mut dec, &mut ctx, &mut board);
    let third = run_one_cycle(&mut dec, &mut ctx, &mut board);

    assert_eq!(second, third);
}

#[test]
fn test_input_change_logged_once() {
    let mut dec = PadDecoder::new();
    let mut ctx = TickContext::new();
    let mut board = MockBoard::new();

    board.press(PadReport::UP);
    run_one_cycle(&mut dec, &mut ctx, &mut board);

    let mut changes = Vec::new();
    while let Some(rec) = ctx.events.pop() {
        if let Event::InputChanged(code) = rec.event {
            changes.push(code);
        }
    }
    assert_eq!(changes, [InputCode::Up]);

    // Held button: same code again, no new event
    run_one_cycle(&mut dec, &mut ctx, &mut board);
    assert!(ctx.events.is_empty());
}
