use super::{
    Choice, OverlayAction, OverlayController, OverlayFrame, QuoteView, HAIKU_SUBMIT, VERSES,
};
use crate::document::DocumentEntry;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_into(controller: &mut OverlayController, text: &str) {
    for ch in text.chars() {
        controller.handle_key(key(KeyCode::Char(ch)));
    }
}

fn all_frames() -> Vec<OverlayFrame> {
    vec![
        OverlayFrame::TimerMenu,
        OverlayFrame::OpenPrompt {
            entries: Vec::new(),
            selected: 0,
        },
        OverlayFrame::SaveAsPrompt {
            target_tab: 1,
            input: String::new(),
        },
        OverlayFrame::DeleteWarning {
            target_tab: 1,
            choice: Choice::Confirm,
            verse: VERSES[0],
        },
        OverlayFrame::HaikuGate {
            target_tab: 1,
            lines: Default::default(),
            focus: 0,
        },
        OverlayFrame::DiscardPrompt {
            target_tab: 1,
            choice: Choice::Cancel,
        },
        OverlayFrame::QuoteViewer {
            view: QuoteView::Quote("q".to_string()),
        },
    ]
}

#[test]
fn second_overlay_is_ignored_for_every_pair() {
    for first in all_frames() {
        for second in all_frames() {
            let mut controller = OverlayController::new();
            assert!(controller.open(first.clone()));
            assert!(!controller.open(second.clone()));
            assert_eq!(controller.frame(), &first);
        }
    }
}

#[test]
fn delete_warning_cancel_returns_to_none() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(4);

    controller.handle_key(key(KeyCode::Right));
    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(action, OverlayAction::Closed);
    assert_eq!(controller.frame(), &OverlayFrame::None);
}

#[test]
fn delete_warning_confirm_moves_to_haiku_gate() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(4);

    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(action, OverlayAction::None);
    assert!(matches!(
        controller.frame(),
        OverlayFrame::HaikuGate {
            target_tab: 4,
            focus: 0,
            ..
        }
    ));
}

#[test]
fn haiku_gate_requires_three_non_empty_lines() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(2);
    controller.handle_key(key(KeyCode::Enter));

    type_into(&mut controller, "stille morgen");
    controller.handle_key(key(KeyCode::Down));
    controller.handle_key(key(KeyCode::Down));
    type_into(&mut controller, "slut");
    let action = controller.handle_key(key(KeyCode::Enter));

    assert!(matches!(action, OverlayAction::Hint(_)));
    assert!(matches!(
        controller.frame(),
        OverlayFrame::HaikuGate { focus: 1, .. }
    ));

    type_into(&mut controller, "ord falder som sne");
    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(action, OverlayAction::DeleteDocument(2));
    assert_eq!(controller.frame(), &OverlayFrame::None);
}

#[test]
fn haiku_gate_escape_deletes_nothing() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(2);
    controller.handle_key(key(KeyCode::Enter));
    type_into(&mut controller, "en");

    let action = controller.handle_key(key(KeyCode::Esc));

    assert_eq!(action, OverlayAction::Closed);
    assert_eq!(controller.frame(), &OverlayFrame::None);
}

#[test]
fn haiku_focus_stops_at_submit_button() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(2);
    controller.handle_key(key(KeyCode::Enter));
    for _ in 0..6 {
        controller.handle_key(key(KeyCode::Down));
    }
    type_into(&mut controller, "ignored");

    match controller.frame() {
        OverlayFrame::HaikuGate { focus, lines, .. } => {
            assert_eq!(*focus, HAIKU_SUBMIT);
            assert!(lines.iter().all(String::is_empty));
        }
        other => panic!("unexpected frame {other:?}"),
    }
}

#[test]
fn verses_rotate_between_openings() {
    let mut controller = OverlayController::new();
    controller.open_delete_warning(1);
    let first = match controller.frame() {
        OverlayFrame::DeleteWarning { verse, .. } => *verse,
        _ => panic!("expected warning"),
    };
    controller.close();
    controller.open_delete_warning(1);

    match controller.frame() {
        OverlayFrame::DeleteWarning { verse, .. } => assert_ne!(*verse, first),
        _ => panic!("expected warning"),
    }
}

#[test]
fn open_prompt_wraps_and_returns_path() {
    let mut controller = OverlayController::new();
    controller.open(OverlayFrame::OpenPrompt {
        entries: vec![
            DocumentEntry {
                name: "a".to_string(),
                path: PathBuf::from("/notes/a.txt"),
            },
            DocumentEntry {
                name: "b".to_string(),
                path: PathBuf::from("/notes/b.txt"),
            },
        ],
        selected: 0,
    });

    controller.handle_key(key(KeyCode::Up));
    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(action, OverlayAction::OpenDocument(PathBuf::from("/notes/b.txt")));
    assert!(!controller.is_active());
}

#[test]
fn save_as_prompt_stays_open_until_session_closes_it() {
    let mut controller = OverlayController::new();
    controller.open(OverlayFrame::SaveAsPrompt {
        target_tab: 9,
        input: String::new(),
    });

    assert!(matches!(
        controller.handle_key(key(KeyCode::Enter)),
        OverlayAction::Hint(_)
    ));
    type_into(&mut controller, "dagbog");
    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(
        action,
        OverlayAction::SaveAs {
            target_tab: 9,
            name: "dagbog".to_string()
        }
    );
    assert!(controller.is_active());
}

#[test]
fn exhausted_quote_view_offers_reset_or_decline() {
    let mut controller = OverlayController::new();
    controller.show_quote(QuoteView::Exhausted {
        choice: Choice::Confirm,
    });
    assert_eq!(
        controller.handle_key(key(KeyCode::Enter)),
        OverlayAction::ResetQuotes
    );
    assert!(controller.show_quote(QuoteView::Quote("igen".to_string())));

    controller.close();
    controller.show_quote(QuoteView::Exhausted {
        choice: Choice::Confirm,
    });
    controller.handle_key(key(KeyCode::Right));
    assert_eq!(
        controller.handle_key(key(KeyCode::Enter)),
        OverlayAction::DeclineQuoteReset
    );
    assert!(!controller.is_active());
}

#[test]
fn show_quote_refused_over_other_frames() {
    let mut controller = OverlayController::new();
    controller.open(OverlayFrame::TimerMenu);

    assert!(!controller.show_quote(QuoteView::Reminder));
    assert_eq!(controller.frame(), &OverlayFrame::TimerMenu);
}

#[test]
fn discard_prompt_confirm_requests_close() {
    let mut controller = OverlayController::new();
    controller.open(OverlayFrame::DiscardPrompt {
        target_tab: 5,
        choice: Choice::Cancel,
    });

    controller.handle_key(key(KeyCode::Left));
    let action = controller.handle_key(key(KeyCode::Enter));

    assert_eq!(action, OverlayAction::DiscardAndClose(5));
    assert!(!controller.is_active());
}
