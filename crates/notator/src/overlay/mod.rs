//! Modal overlay controller.
//!
//! Exactly one [`OverlayFrame`] is current. Opening a frame while another
//! is up is refused; the only frame-to-frame moves are the ones coded in
//! [`OverlayController::handle_key`] (delete warning to haiku gate) and
//! [`OverlayController::show_quote`] (quote viewer to quote viewer).
//!
//! The controller never touches documents or the timer. Keys that confirm
//! something come back as an [`OverlayAction`] for the session to apply.

mod verses;

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::document::{DocumentEntry, TabId};

pub use verses::{DELETE_HEADING, VERSES};

pub const HAIKU_SYLLABLES: [u8; 3] = [5, 7, 5];
/// Focus index of the submit button below the three haiku lines.
pub const HAIKU_SUBMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Confirm,
    Cancel,
}

impl Choice {
    fn toggled(self) -> Self {
        match self {
            Choice::Confirm => Choice::Cancel,
            Choice::Cancel => Choice::Confirm,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteView {
    Quote(String),
    /// Every quote has been shown: offer to start over.
    Exhausted { choice: Choice },
    /// Asked too often: a reminder with a button to insist.
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayFrame {
    None,
    TimerMenu,
    OpenPrompt {
        entries: Vec<DocumentEntry>,
        selected: usize,
    },
    SaveAsPrompt {
        target_tab: TabId,
        input: String,
    },
    DeleteWarning {
        target_tab: TabId,
        choice: Choice,
        verse: &'static str,
    },
    HaikuGate {
        target_tab: TabId,
        lines: [String; 3],
        focus: usize,
    },
    /// Closing a tab with unsaved changes.
    DiscardPrompt {
        target_tab: TabId,
        choice: Choice,
    },
    QuoteViewer {
        view: QuoteView,
    },
}

impl OverlayFrame {
    pub fn name(&self) -> &'static str {
        match self {
            OverlayFrame::None => "none",
            OverlayFrame::TimerMenu => "timer_menu",
            OverlayFrame::OpenPrompt { .. } => "open_prompt",
            OverlayFrame::SaveAsPrompt { .. } => "save_as_prompt",
            OverlayFrame::DeleteWarning { .. } => "delete_warning",
            OverlayFrame::HaikuGate { .. } => "haiku_gate",
            OverlayFrame::DiscardPrompt { .. } => "discard_prompt",
            OverlayFrame::QuoteViewer { .. } => "quote_viewer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    /// Dismissed without effect.
    Closed,
    OpenDocument(PathBuf),
    /// The Save-As prompt stays open until the session closes it, so a bad
    /// name can be corrected.
    SaveAs { target_tab: TabId, name: String },
    DeleteDocument(TabId),
    DiscardAndClose(TabId),
    ResetQuotes,
    DeclineQuoteReset,
    ForceQuote,
    Hint(&'static str),
}

#[derive(Debug)]
pub struct OverlayController {
    frame: OverlayFrame,
    next_verse: usize,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayController {
    pub fn new() -> Self {
        Self {
            frame: OverlayFrame::None,
            next_verse: 0,
        }
    }

    pub fn frame(&self) -> &OverlayFrame {
        &self.frame
    }

    pub fn is_active(&self) -> bool {
        self.frame != OverlayFrame::None
    }

    /// Show `frame` if nothing else is showing.
    pub fn open(&mut self, frame: OverlayFrame) -> bool {
        if self.is_active() || frame == OverlayFrame::None {
            debug!(
                current = self.frame.name(),
                requested = frame.name(),
                "overlay open ignored"
            );
            return false;
        }
        debug!(overlay = frame.name(), "overlay opened");
        self.frame = frame;
        true
    }

    /// First step of the deletion flow, with the next verse in rotation.
    pub fn open_delete_warning(&mut self, target_tab: TabId) -> bool {
        let verse = VERSES[self.next_verse % VERSES.len()];
        let opened = self.open(OverlayFrame::DeleteWarning {
            target_tab,
            choice: Choice::Confirm,
            verse,
        });
        if opened {
            self.next_verse = (self.next_verse + 1) % VERSES.len();
        }
        opened
    }

    /// Put a quote view up, either fresh or replacing the current quote
    /// view. Refused over any other frame.
    pub fn show_quote(&mut self, view: QuoteView) -> bool {
        match self.frame {
            OverlayFrame::None | OverlayFrame::QuoteViewer { .. } => {
                self.frame = OverlayFrame::QuoteViewer { view };
                true
            }
            _ => false,
        }
    }

    pub fn close(&mut self) {
        if self.is_active() {
            debug!(overlay = self.frame.name(), "overlay closed");
        }
        self.frame = OverlayFrame::None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayAction {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match &mut self.frame {
            OverlayFrame::None | OverlayFrame::TimerMenu => OverlayAction::None,
            OverlayFrame::OpenPrompt { entries, selected } => match key.code {
                KeyCode::Esc => self.dismiss(),
                KeyCode::Up => {
                    *selected = wrap_index(*selected, -1, entries.len());
                    OverlayAction::None
                }
                KeyCode::Down => {
                    *selected = wrap_index(*selected, 1, entries.len());
                    OverlayAction::None
                }
                KeyCode::Enter => match entries.get(*selected) {
                    Some(entry) => {
                        let path = entry.path.clone();
                        self.close();
                        OverlayAction::OpenDocument(path)
                    }
                    None => self.dismiss(),
                },
                _ => OverlayAction::None,
            },
            OverlayFrame::SaveAsPrompt { target_tab, input } => match key.code {
                KeyCode::Esc => self.dismiss(),
                KeyCode::Enter => {
                    if input.trim().is_empty() {
                        return OverlayAction::Hint("Skriv et filnavn");
                    }
                    OverlayAction::SaveAs {
                        target_tab: *target_tab,
                        name: input.trim().to_string(),
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                    OverlayAction::None
                }
                KeyCode::Char(ch) if plain => {
                    input.push(ch);
                    OverlayAction::None
                }
                _ => OverlayAction::None,
            },
            OverlayFrame::DeleteWarning {
                target_tab, choice, ..
            } => match key.code {
                KeyCode::Esc => self.dismiss(),
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                    *choice = choice.toggled();
                    OverlayAction::None
                }
                KeyCode::Enter => match choice {
                    Choice::Confirm => {
                        let target_tab = *target_tab;
                        debug!(tab = target_tab, "delete warning accepted");
                        self.frame = OverlayFrame::HaikuGate {
                            target_tab,
                            lines: Default::default(),
                            focus: 0,
                        };
                        OverlayAction::None
                    }
                    Choice::Cancel => self.dismiss(),
                },
                _ => OverlayAction::None,
            },
            OverlayFrame::HaikuGate {
                target_tab,
                lines,
                focus,
            } => match key.code {
                KeyCode::Esc => self.dismiss(),
                KeyCode::Up => {
                    *focus = focus.saturating_sub(1);
                    OverlayAction::None
                }
                KeyCode::Down | KeyCode::Tab => {
                    *focus = (*focus + 1).min(HAIKU_SUBMIT);
                    OverlayAction::None
                }
                KeyCode::Enter => {
                    if let Some(empty) = lines.iter().position(|line| line.trim().is_empty()) {
                        *focus = empty;
                        return OverlayAction::Hint("Alle tre linjer skal udfyldes");
                    }
                    let target_tab = *target_tab;
                    self.close();
                    OverlayAction::DeleteDocument(target_tab)
                }
                KeyCode::Backspace if *focus < HAIKU_SUBMIT => {
                    lines[*focus].pop();
                    OverlayAction::None
                }
                KeyCode::Char(ch) if plain && *focus < HAIKU_SUBMIT => {
                    lines[*focus].push(ch);
                    OverlayAction::None
                }
                _ => OverlayAction::None,
            },
            OverlayFrame::DiscardPrompt { target_tab, choice } => match key.code {
                KeyCode::Esc => self.dismiss(),
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                    *choice = choice.toggled();
                    OverlayAction::None
                }
                KeyCode::Enter => match choice {
                    Choice::Confirm => {
                        let target_tab = *target_tab;
                        self.close();
                        OverlayAction::DiscardAndClose(target_tab)
                    }
                    Choice::Cancel => self.dismiss(),
                },
                _ => OverlayAction::None,
            },
            OverlayFrame::QuoteViewer { view } => match view {
                QuoteView::Quote(_) => match key.code {
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => self.dismiss(),
                    _ => OverlayAction::None,
                },
                QuoteView::Exhausted { choice } => match key.code {
                    KeyCode::Esc => self.dismiss(),
                    KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                        *choice = choice.toggled();
                        OverlayAction::None
                    }
                    KeyCode::Enter => match choice {
                        Choice::Confirm => OverlayAction::ResetQuotes,
                        Choice::Cancel => {
                            self.close();
                            OverlayAction::DeclineQuoteReset
                        }
                    },
                    _ => OverlayAction::None,
                },
                QuoteView::Reminder => match key.code {
                    KeyCode::Esc => self.dismiss(),
                    KeyCode::Enter => OverlayAction::ForceQuote,
                    _ => OverlayAction::None,
                },
            },
        }
    }

    fn dismiss(&mut self) -> OverlayAction {
        self.close();
        OverlayAction::Closed
    }
}

fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    let mut next = current as isize + delta;
    if next < 0 {
        next = len - 1;
    } else if next >= len {
        next = 0;
    }
    next as usize
}

#[cfg(test)]
mod tests;
