//! Application event types.
//!
//! The input thread and the tick thread send these over one mpsc channel;
//! the main loop handles them one at a time.

use crossterm::event::KeyEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Input(KeyEvent),
    Paste(String),
    /// Once per second, drives the timer deadline check.
    Tick,
    Resize,
}
