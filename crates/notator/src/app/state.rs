//! Application state types and core data structures.
//!
//! `App` is the single writer of session-wide state: the tab list and its
//! active pointer, the timer machine, the overlay controller and the quote
//! rotation. Handlers in `input` mutate it; `render` only reads it (apart
//! from scroll bookkeeping).

use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::config::Config;
use crate::document::{DocumentStore, Tab, TabId};
use crate::editor::EditRestrictions;
use crate::keymap::Keymap;
use crate::overlay::OverlayController;
use crate::quotes::{QuoteRegistry, ThrottleConfig};
use crate::state::{load_snapshot, save_snapshot, SessionSnapshot, TabRecord};
use crate::timer::TimerMachine;

pub const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Source of "now" for every time-driven transition.
pub type Clock = Box<dyn Fn() -> Instant>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub expires_at: Instant,
}

/// Main application state container.
pub struct App {
    pub config: Config,
    pub keymap: Keymap,
    pub store: DocumentStore,
    pub session_path: PathBuf,
    pub tabs: Vec<Tab>,
    pub active: usize,
    pub next_tab_id: TabId,
    pub timer: TimerMachine,
    pub overlays: OverlayController,
    pub quotes: QuoteRegistry,
    pub rng: StdRng,
    pub hemingway: bool,
    pub tab_bar_visible: bool,
    /// Active tab has unsaved changes; drives the status line and title.
    pub modified: bool,
    pub notice: Option<Notice>,
    /// Inline hint shown inside the current overlay.
    pub hint: Option<String>,
    pub last_save_press: Option<(TabId, Instant)>,
    pub should_quit: bool,
    clock: Clock,
}

impl App {
    /// Build the session from config, restoring the previous layout when a
    /// snapshot exists.
    pub fn new(config: Config, clock: Clock) -> Self {
        let store = DocumentStore::new(&config.storage.notes_dir, &config.storage.extension)
            .reserve(config.storage.quotes_path());
        if let Err(err) = store.ensure_dir() {
            warn!(
                dir = %store.notes_dir().display(),
                error = %err,
                "notes directory unavailable"
            );
        }
        let quotes = QuoteRegistry::load(
            &config.storage.quotes_path(),
            ThrottleConfig {
                limit: config.quotes.reminder_after,
                window: config.quotes.window,
            },
        );
        let timer = TimerMachine::new(config.timer.presets.clone(), config.timer.restart_window);

        let mut app = Self {
            keymap: Keymap::from_config(&config.keymap),
            session_path: config.storage.session_path(),
            config,
            store,
            tabs: Vec::new(),
            active: 0,
            next_tab_id: 1,
            timer,
            overlays: OverlayController::new(),
            quotes,
            rng: StdRng::from_entropy(),
            hemingway: false,
            tab_bar_visible: true,
            modified: false,
            notice: None,
            hint: None,
            last_save_press: None,
            should_quit: false,
            clock,
        };
        app.restore_session();
        app
    }

    pub fn now(&self) -> Instant {
        (self.clock)()
    }

    fn restore_session(&mut self) {
        let Some(snapshot) = load_snapshot(&self.session_path) else {
            self.push_fresh_tab();
            return;
        };
        self.hemingway = snapshot.hemingway;
        self.tab_bar_visible = snapshot.tab_bar;

        let wanted = snapshot.active_index();
        let mut active = 0;
        for (index, record) in snapshot.tabs.into_iter().enumerate() {
            let id = self.allocate_tab_id();
            let tab = match &record.path {
                Some(path) => match self.store.open(id, path) {
                    Ok(tab) => tab,
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping unrestorable tab");
                        continue;
                    }
                },
                None => Tab::untitled(id, record.title),
            };
            if index == wanted {
                active = self.tabs.len();
            }
            self.tabs.push(tab);
        }

        if self.tabs.is_empty() {
            self.push_fresh_tab();
            return;
        }
        self.active = active.min(self.tabs.len() - 1);
        info!(tabs = self.tabs.len(), active = self.active, "session restored");
    }

    pub fn allocate_tab_id(&mut self) -> TabId {
        let id = self.next_tab_id;
        self.next_tab_id += 1;
        id
    }

    /// Append an empty tab named after the current local time and focus it.
    pub fn push_fresh_tab(&mut self) {
        let id = self.allocate_tab_id();
        let title = format!("Note {}", Local::now().format("%H%M-%d%m"));
        self.tabs.push(Tab::untitled(id, title));
        self.active = self.tabs.len() - 1;
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.get(self.active)
    }

    pub fn active_tab_mut(&mut self) -> Option<&mut Tab> {
        self.tabs.get_mut(self.active)
    }

    pub fn tab_index(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    pub fn edit_restrictions(&self) -> EditRestrictions {
        EditRestrictions {
            forward_only: self.hemingway,
        }
    }

    pub fn set_notice(&mut self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.notice = None;
            return;
        }
        self.notice = Some(Notice {
            text: trimmed.to_string(),
            expires_at: self.now() + NOTICE_TTL,
        });
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self
            .notice
            .as_ref()
            .is_some_and(|notice| now >= notice.expires_at)
        {
            self.notice = None;
        }
    }

    pub fn refresh_modified(&mut self) {
        self.modified = self
            .active_tab()
            .is_some_and(|tab| tab.has_unsaved_changes());
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            hemingway: self.hemingway,
            tab_bar: self.tab_bar_visible,
            tabs: self
                .tabs
                .iter()
                .enumerate()
                .map(|(index, tab)| TabRecord {
                    path: tab.path.clone(),
                    title: tab.title.clone(),
                    active: index == self.active,
                })
                .collect(),
        }
    }

    /// Write the session layout. Failures are logged and never interrupt
    /// the command that triggered them.
    pub fn persist_session(&self) {
        if let Err(err) = save_snapshot(&self.session_path, &self.snapshot()) {
            warn!(error = %err, "failed to write session snapshot");
        }
    }

    /// Terminal title: active tab name, with a trailing `*` while modified.
    pub fn window_title(&self) -> String {
        let name = self
            .active_tab()
            .map(|tab| tab.title.as_str())
            .unwrap_or("Notator");
        let marker = if self.modified { "*" } else { "" };
        format!("{name} - Notator{marker}")
    }
}
