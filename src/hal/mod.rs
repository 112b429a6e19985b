//! Hardware binding for the stm32f072 board.
//!
//! Thin wrappers around pins, one USART and one timer channel.
//! Business logic stays in the core modules, this is just I/O.

pub mod board;

pub use board::StationBoard;
