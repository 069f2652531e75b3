use tracing::debug;

use crate::document::TabId;
use crate::overlay::{Choice, OverlayFrame};

use crate::app::state::App;

pub(super) fn new_tab(app: &mut App) {
    app.push_fresh_tab();
    app.persist_session();
}

/// Close the active tab, asking first when it holds unsaved changes.
pub(super) fn close_active_tab(app: &mut App) {
    let Some(tab) = app.active_tab() else {
        return;
    };
    if tab.has_unsaved_changes() {
        let target_tab = tab.id;
        app.overlays.open(OverlayFrame::DiscardPrompt {
            target_tab,
            choice: Choice::Cancel,
        });
        return;
    }
    let id = tab.id;
    close_tab(app, id);
    app.set_notice("Fane lukket");
}

/// Remove a tab without asking. The neighbour to the left takes focus and
/// closing the last tab leaves a fresh empty one behind.
pub(super) fn close_tab(app: &mut App, id: TabId) {
    let Some(index) = app.tab_index(id) else {
        return;
    };
    app.tabs.remove(index);
    if app.tabs.is_empty() {
        app.push_fresh_tab();
    } else if index < app.active || (index == app.active && index > 0) {
        app.active -= 1;
    }
    app.active = app.active.min(app.tabs.len() - 1);
    if app.last_save_press.is_some_and(|(tab, _)| tab == id) {
        app.last_save_press = None;
    }
    debug!(tab = id, remaining = app.tabs.len(), "tab closed");
    app.persist_session();
}

pub(super) fn cycle_tab(app: &mut App, delta: isize) {
    let len = app.tabs.len() as isize;
    if len == 0 {
        return;
    }
    let next = (app.active as isize + delta).rem_euclid(len);
    app.active = next as usize;
    app.persist_session();
}

pub(super) fn select_tab(app: &mut App, index: usize) {
    if index < app.tabs.len() && index != app.active {
        app.active = index;
        app.persist_session();
    }
}
