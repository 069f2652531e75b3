//! Input event handling.
//!
//! Routes each event to exactly one owner: the timer menu, the active
//! overlay, a global command, or the active tab's editor.

mod documents;
mod event;
mod overlay;
mod quotes;
mod tabs;
mod timer;

pub use event::handle_event;
