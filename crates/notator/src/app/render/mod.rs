//! UI rendering methods.
//!
//! Draws the frame from a read-only view of `App`:
//! - Tab bar (optional), editor, status line
//! - Timer display in the top-right corner
//! - The active overlay, centered on top

mod layout;
mod overlays;
mod work_area;

use ratatui::layout::{Constraint, Direction, Layout};

use super::state::App;
use crate::ui::inset_horizontal;

const STATUS_HORIZONTAL_PADDING: u16 = 1;

/// Main render entry point. Called each frame by the event loop.
pub fn render(app: &mut App, frame: &mut ratatui::Frame) {
    let area = frame.area();
    let tab_bar_height = u16::from(app.tab_bar_visible);

    // Vertical layout: tab bar | editor | status line
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(tab_bar_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    if app.tab_bar_visible {
        layout::render_tab_bar(app, frame, chunks[0]);
    }
    let cursor = work_area::render_work_area(app, frame, chunks[1]);
    layout::render_status_line(
        app,
        frame,
        inset_horizontal(chunks[2], STATUS_HORIZONTAL_PADDING),
    );
    layout::render_timer_display(app, frame, area);

    if app.overlays.is_active() {
        overlays::render_overlay(app, frame, area);
    } else if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}
