use tracing::debug;

use crate::overlay::{Choice, QuoteView};
use crate::quotes::{DisplayDecision, QuoteDraw};

use crate::app::state::App;

/// The quote command: throttle first, then draw from the rotation.
pub(super) fn request_quote(app: &mut App) {
    if app.quotes.is_empty() {
        app.set_notice("Ingen citater fundet");
        return;
    }
    let now = app.now();
    match app.quotes.record_display(now) {
        DisplayDecision::Remind => {
            debug!("quote reminder shown");
            app.overlays.show_quote(QuoteView::Reminder);
        }
        DisplayDecision::Show => show_next_quote(app),
    }
}

/// Draw the next quote into the viewer, or ask whether to start over.
pub(super) fn show_next_quote(app: &mut App) {
    match app.quotes.next_with(&mut app.rng) {
        QuoteDraw::Quote(text) => {
            debug!(
                unseen = app.quotes.unseen_count(),
                total = app.quotes.len(),
                shown = app.quotes.shown_since_reset(),
                "quote drawn"
            );
            app.overlays.show_quote(QuoteView::Quote(text));
        }
        QuoteDraw::Exhausted if app.quotes.is_declined() => {
            app.overlays.close();
            app.set_notice("Citatfilen skal opfyldes igen");
        }
        QuoteDraw::Exhausted => {
            app.overlays.show_quote(QuoteView::Exhausted {
                choice: Choice::Confirm,
            });
        }
    }
}

pub(super) fn reset_quotes(app: &mut App) {
    if app.quotes.reset() {
        show_next_quote(app);
    } else {
        app.overlays.close();
    }
}

pub(super) fn decline_reset(app: &mut App) {
    app.quotes.decline_reset();
    app.set_notice("Citater udtømt");
}

/// The user insisted past the reminder: count the request and show a quote.
pub(super) fn force_quote(app: &mut App) {
    let now = app.now();
    app.quotes.force_display(now);
    show_next_quote(app);
}
