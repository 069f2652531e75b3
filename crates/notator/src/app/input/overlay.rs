use crossterm::event::KeyEvent;

use crate::overlay::OverlayAction;

use super::documents::{delete_document, open_document, save_as};
use super::quotes::{decline_reset, force_quote, reset_quotes};
use super::tabs::close_tab;
use crate::app::state::App;

/// Hand the key to the active overlay and apply whatever it confirms.
pub(super) fn handle_overlay_key(app: &mut App, key: KeyEvent) {
    let action = app.overlays.handle_key(key);
    if !matches!(action, OverlayAction::None) {
        app.hint = None;
    }
    match action {
        OverlayAction::None | OverlayAction::Closed => {}
        OverlayAction::Hint(text) => app.hint = Some(text.to_string()),
        OverlayAction::OpenDocument(path) => open_document(app, &path),
        OverlayAction::SaveAs { target_tab, name } => save_as(app, target_tab, &name),
        OverlayAction::DeleteDocument(target_tab) => delete_document(app, target_tab),
        OverlayAction::DiscardAndClose(target_tab) => {
            close_tab(app, target_tab);
            app.set_notice("Fane lukket");
        }
        OverlayAction::ResetQuotes => reset_quotes(app),
        OverlayAction::DeclineQuoteReset => decline_reset(app),
        OverlayAction::ForceQuote => force_quote(app),
    }
}
