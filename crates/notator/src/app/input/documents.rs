use std::path::Path;

use tracing::warn;

use crate::document::TabId;
use crate::error::NoteError;
use crate::overlay::OverlayFrame;

use super::tabs::close_tab;
use crate::app::state::App;

/// Save the active tab. Tabs without a file, and a second save inside the
/// restart window, go through the Save-As prompt instead.
pub(super) fn save_active(app: &mut App) {
    let now = app.now();
    let window = app.config.timer.restart_window;
    let index = app.active;
    let Some((id, path)) = app.active_tab().map(|tab| (tab.id, tab.path.clone())) else {
        return;
    };
    let double = app
        .last_save_press
        .is_some_and(|(last_tab, at)| last_tab == id && now.saturating_duration_since(at) < window);
    app.last_save_press = Some((id, now));

    if double {
        let current = path
            .as_deref()
            .map(|path| app.store.display_name(path))
            .unwrap_or_default();
        open_save_as(app, id, current);
        return;
    }

    let Some(tab) = app.tabs.get_mut(index) else {
        return;
    };
    match app.store.save(tab) {
        Ok(()) => {
            app.set_notice("Noter gemt");
            app.persist_session();
        }
        Err(NoteError::NeedsPath) => open_save_as(app, id, String::new()),
        Err(err) => {
            warn!(error = %err, "save failed");
            app.set_notice(err.to_string());
        }
    }
}

fn open_save_as(app: &mut App, target_tab: TabId, input: String) {
    if app.overlays.open(OverlayFrame::SaveAsPrompt { target_tab, input }) {
        app.hint = None;
    }
}

/// Apply a confirmed Save-As. The prompt stays up when the name is rejected
/// or the write fails.
pub(super) fn save_as(app: &mut App, target_tab: TabId, name: &str) {
    let Some(index) = app.tab_index(target_tab) else {
        app.overlays.close();
        return;
    };
    match app.store.save_as(&mut app.tabs[index], name) {
        Ok(path) => {
            app.overlays.close();
            app.hint = None;
            app.last_save_press = None;
            app.set_notice(format!("Gemt som {}", app.store.display_name(&path)));
            app.persist_session();
        }
        Err(err) => {
            warn!(error = %err, "save as failed");
            app.hint = Some(err.to_string());
        }
    }
}

pub(super) fn open_prompt(app: &mut App) {
    let entries = app.store.list();
    if entries.is_empty() {
        app.set_notice("Ingen gemte noter");
        return;
    }
    let selected = app
        .active_tab()
        .and_then(|tab| tab.path.as_ref())
        .and_then(|path| entries.iter().position(|entry| &entry.path == path))
        .unwrap_or(0);
    app.overlays
        .open(OverlayFrame::OpenPrompt { entries, selected });
}

/// Load `path` into a tab: focus it if it is already open, replace a blank
/// untitled tab, or append a new one.
pub(super) fn open_document(app: &mut App, path: &Path) {
    if let Some(index) = app
        .tabs
        .iter()
        .position(|tab| tab.path.as_deref() == Some(path))
    {
        if index != app.active {
            app.active = index;
            app.persist_session();
        }
        return;
    }

    let id = app.allocate_tab_id();
    let tab = match app.store.open(id, path) {
        Ok(tab) => tab,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "open failed");
            app.set_notice(err.to_string());
            return;
        }
    };
    if app.active_tab().is_some_and(|tab| tab.is_pristine()) {
        app.tabs[app.active] = tab;
    } else {
        app.tabs.push(tab);
        app.active = app.tabs.len() - 1;
    }
    app.persist_session();
}

/// First step of deletion: only tabs backed by a file can be deleted.
pub(super) fn prompt_delete(app: &mut App) {
    let Some(tab) = app.active_tab() else {
        return;
    };
    if tab.path.is_none() {
        app.set_notice("Ingen fil at slette");
        return;
    }
    let id = tab.id;
    app.overlays.open_delete_warning(id);
}

/// The haiku was written: remove the file and close its tab.
pub(super) fn delete_document(app: &mut App, target_tab: TabId) {
    let Some(index) = app.tab_index(target_tab) else {
        return;
    };
    if let Some(path) = app.tabs[index].path.clone() {
        if let Err(err) = app.store.delete(&path) {
            warn!(error = %err, "delete failed");
            app.set_notice(err.to_string());
            return;
        }
    }
    close_tab(app, target_tab);
    app.set_notice("Ordene falder. Tomheden vinder.");
}
