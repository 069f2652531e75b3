//! Session coordinator.
//!
//! `App` owns the tabs, the timer, the overlay stack and the quote
//! rotation. Every terminal event goes through `input::handle_event`;
//! drawing happens afterwards from the resulting state.
//!
//! - state: `App` and session snapshot glue
//! - runner: terminal setup and the event loop
//! - input: key routing, commands and overlay outcomes
//! - render: frame drawing

mod input;
mod render;
mod runner;
mod state;

pub use runner::run;
