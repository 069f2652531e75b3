use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::editor::{EditOutcome, EditableText};
use crate::events::AppEvent;
use crate::keymap::Command;

use super::documents::{open_prompt, prompt_delete, save_active};
use super::overlay::handle_overlay_key;
use super::quotes::request_quote;
use super::tabs::{close_active_tab, cycle_tab, new_tab, select_tab};
use super::timer::{handle_timer_menu_key, on_tick, open_timer_menu, restart_timer};
use crate::app::state::App;

/// Main event dispatcher.
pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Input(key) => {
            if key.kind != KeyEventKind::Release {
                handle_key(app, key);
            }
        }
        AppEvent::Paste(text) => handle_paste(app, &text),
        AppEvent::Tick => on_tick(app),
        AppEvent::Resize => {}
    }
    let now = app.now();
    app.expire_notice(now);
    app.refresh_modified();
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if app.timer.is_configuring() {
        handle_timer_menu_key(app, key);
        return;
    }
    if app.overlays.is_active() {
        handle_overlay_key(app, key);
        return;
    }

    if app.keymap.is_suppressed(key) {
        return;
    }
    if let Some(command) = app.keymap.command_for(key) {
        run_command(app, command);
        return;
    }
    // Alt+1..9 jumps straight to a tab.
    if key.modifiers == KeyModifiers::ALT {
        if let KeyCode::Char(ch @ '1'..='9') = key.code {
            let index = ch as usize - '1' as usize;
            select_tab(app, index);
            return;
        }
    }

    let restrictions = app.edit_restrictions();
    let Some(tab) = app.active_tab_mut() else {
        return;
    };
    if tab.editor.handle_key(key, restrictions) == EditOutcome::Changed {
        tab.mark_dirty();
    }
}

fn run_command(app: &mut App, command: Command) {
    debug!(command = command.name(), "command");
    match command {
        Command::NewTab => new_tab(app),
        Command::CloseTab => close_active_tab(app),
        Command::NextTab => cycle_tab(app, 1),
        Command::PrevTab => cycle_tab(app, -1),
        Command::Open => open_prompt(app),
        Command::Save => save_active(app),
        Command::TimerMenu => open_timer_menu(app),
        Command::TimerRestart => restart_timer(app),
        Command::Delete => prompt_delete(app),
        Command::Quote => request_quote(app),
        Command::Hemingway => {
            app.hemingway = !app.hemingway;
            let state = if app.hemingway { "TIL" } else { "FRA" };
            app.set_notice(format!("Hemmingway-tilstand {state}"));
            app.persist_session();
        }
        Command::TabBar => {
            app.tab_bar_visible = !app.tab_bar_visible;
            app.persist_session();
        }
        Command::Quit => {
            app.persist_session();
            app.should_quit = true;
        }
    }
}

/// Pasted text goes to the editor only; overlays take typed input.
fn handle_paste(app: &mut App, text: &str) {
    if app.timer.is_configuring() || app.overlays.is_active() || text.is_empty() {
        return;
    }
    let Some(tab) = app.active_tab_mut() else {
        return;
    };
    if tab.editor.insert_str(text) == EditOutcome::Changed {
        tab.mark_dirty();
    }
}
