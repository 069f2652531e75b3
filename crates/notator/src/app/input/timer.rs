use crossterm::event::KeyEvent;

use crate::keymap::Command;
use crate::overlay::OverlayFrame;
use crate::timer::{MenuOutcome, RestartOutcome, TickOutcome};

use crate::app::state::App;

/// The timer menu is an overlay frame backed by the timer's `Configuring`
/// state; both open and close together.
pub(super) fn open_timer_menu(app: &mut App) {
    if !app.overlays.open(OverlayFrame::TimerMenu) {
        return;
    }
    if !app.timer.open_menu() {
        app.overlays.close();
        return;
    }
    app.hint = None;
}

/// Keys while the menu is open. The menu chord closes it again.
pub(super) fn handle_timer_menu_key(app: &mut App, key: KeyEvent) {
    if app.keymap.command_for(key) == Some(Command::TimerMenu) {
        app.timer.close_menu();
        close_menu_overlay(app);
        return;
    }
    let now = app.now();
    match app.timer.menu_key(key, now) {
        MenuOutcome::Pending => {}
        MenuOutcome::Started(_) => {
            close_menu_overlay(app);
            app.set_notice("Timer startet");
        }
        MenuOutcome::Cancelled => close_menu_overlay(app),
        MenuOutcome::InvalidDuration(text) => {
            app.hint = Some(format!("Ugyldig varighed: {text:?} (brug fx 90 eller 2m)"));
        }
    }
}

fn close_menu_overlay(app: &mut App) {
    if app.overlays.frame() == &OverlayFrame::TimerMenu {
        app.overlays.close();
    }
    app.hint = None;
}

pub(super) fn restart_timer(app: &mut App) {
    let now = app.now();
    match app.timer.restart(now) {
        RestartOutcome::Restarted(_) => app.set_notice("Timer startet"),
        RestartOutcome::Stopped => app.set_notice("Timer stoppet"),
        RestartOutcome::NothingToRestart => app.set_notice("Ingen timer at genstarte"),
        RestartOutcome::Ignored => {}
    }
}

pub(super) fn on_tick(app: &mut App) {
    let now = app.now();
    if app.timer.tick(now) == TickOutcome::Expired {
        if app.overlays.frame() == &OverlayFrame::TimerMenu {
            close_menu_overlay(app);
        }
        app.set_notice("Tiden er gået!");
    }
}
