//! Level-based arcade Snake: a deterministic tick simulation core plus a thin
//! ratatui front-end.
//!
//! The core modules never touch the terminal or the clock. The front-end feeds
//! a [`GameModeController`](mode::GameModeController) one intent and one
//! elapsed-time value per frame and draws the resulting snapshot.

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod keymap;
pub mod level;
pub mod mode;
pub mod renderer;
pub mod round;
pub mod snake;
pub mod spawn;
pub mod terminal_runtime;
pub mod theme;
pub mod timer;
pub mod ui;
