//! Countdown timer state machine.
//!
//! One machine exists per process. Transitions are driven by the timer
//! menu, the restart command, and the once-per-second tick; every entry
//! point takes `now` so the machine never reads the clock itself.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::error::{NoteError, NoteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub deadline: Instant,
    pub duration: Duration,
}

impl Countdown {
    pub fn start(now: Instant, duration: Duration) -> Self {
        Self {
            deadline: now + duration,
            duration,
        }
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    /// The timer menu is open. `selected == presets.len()` is the custom
    /// duration field. `resume` holds a countdown that was running when the
    /// menu opened; it keeps its deadline.
    Configuring {
        selected: usize,
        custom: String,
        resume: Option<Countdown>,
    },
    Running(Countdown),
    Finished {
        at: Instant,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Started(Duration),
    Cancelled,
    InvalidDuration(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    Restarted(Duration),
    Stopped,
    NothingToRestart,
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Unchanged,
    Expired,
}

/// Read-only view for the timer display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerDisplay {
    pub remaining: Duration,
    pub alert: bool,
}

#[derive(Debug, Clone)]
pub struct TimerMachine {
    state: TimerState,
    presets: Vec<Duration>,
    restart_window: Duration,
    last_restart: Option<Instant>,
    last_duration: Option<Duration>,
}

impl TimerMachine {
    pub fn new(presets: Vec<Duration>, restart_window: Duration) -> Self {
        Self {
            state: TimerState::Idle,
            presets,
            restart_window,
            last_restart: None,
            last_duration: None,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn presets(&self) -> &[Duration] {
        &self.presets
    }

    pub fn is_configuring(&self) -> bool {
        matches!(self.state, TimerState::Configuring { .. })
    }

    /// Enter `Configuring`. Refused while the menu is already open.
    pub fn open_menu(&mut self) -> bool {
        let resume = match &self.state {
            TimerState::Configuring { .. } => return false,
            TimerState::Running(countdown) => Some(*countdown),
            TimerState::Idle | TimerState::Finished { .. } => None,
        };
        self.state = TimerState::Configuring {
            selected: 0,
            custom: String::new(),
            resume,
        };
        debug!("timer menu opened");
        true
    }

    /// Leave the menu without starting anything.
    pub fn close_menu(&mut self) {
        if let TimerState::Configuring { resume, .. } = &self.state {
            self.state = match resume {
                Some(countdown) => TimerState::Running(*countdown),
                None => TimerState::Idle,
            };
            debug!("timer menu closed");
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let last = self.presets.len();
        if let TimerState::Configuring { selected, .. } = &mut self.state {
            *selected = (*selected as isize + delta).clamp(0, last as isize) as usize;
        }
    }

    pub fn menu_key(&mut self, key: KeyEvent, now: Instant) -> MenuOutcome {
        let custom_index = self.presets.len();
        let TimerState::Configuring {
            selected, custom, ..
        } = &mut self.state
        else {
            return MenuOutcome::Pending;
        };
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Esc => {
                self.close_menu();
                MenuOutcome::Cancelled
            }
            KeyCode::Up => {
                self.move_selection(-1);
                MenuOutcome::Pending
            }
            KeyCode::Down | KeyCode::Tab => {
                self.move_selection(1);
                MenuOutcome::Pending
            }
            KeyCode::Enter => {
                if *selected < custom_index {
                    let duration = self.presets[*selected];
                    self.start(duration, now);
                    return MenuOutcome::Started(duration);
                }
                let text = custom.clone();
                match self.submit_custom(&text, now) {
                    Ok(duration) => MenuOutcome::Started(duration),
                    Err(_) => MenuOutcome::InvalidDuration(text),
                }
            }
            KeyCode::Backspace if *selected == custom_index => {
                custom.pop();
                MenuOutcome::Pending
            }
            KeyCode::Char(ch) if plain && (*selected == custom_index || ch.is_ascii_digit()) => {
                *selected = custom_index;
                custom.push(ch);
                MenuOutcome::Pending
            }
            _ => MenuOutcome::Pending,
        }
    }

    /// Parse the custom field text and start on success. On failure the
    /// machine stays in `Configuring`.
    pub fn submit_custom(&mut self, text: &str, now: Instant) -> NoteResult<Duration> {
        if !self.is_configuring() {
            return Err(NoteError::InvalidDuration(text.to_string()));
        }
        let duration = parse_duration(text)?;
        self.start(duration, now);
        Ok(duration)
    }

    /// Start a fresh countdown, superseding any previous deadline.
    pub fn start(&mut self, duration: Duration, now: Instant) {
        self.state = TimerState::Running(Countdown::start(now, duration));
        self.last_duration = Some(duration);
        self.last_restart = None;
        debug!(secs = duration.as_secs(), "timer started");
    }

    /// Restart the countdown. A second restart inside the restart window
    /// stops it instead.
    pub fn restart(&mut self, now: Instant) -> RestartOutcome {
        let duration = match &self.state {
            TimerState::Configuring { .. } => return RestartOutcome::Ignored,
            TimerState::Running(countdown) => {
                let double_press = self
                    .last_restart
                    .is_some_and(|last| now.saturating_duration_since(last) < self.restart_window);
                if double_press {
                    self.state = TimerState::Idle;
                    self.last_restart = None;
                    debug!("timer stopped by double restart");
                    return RestartOutcome::Stopped;
                }
                countdown.duration
            }
            TimerState::Idle | TimerState::Finished { .. } => match self.last_duration {
                Some(duration) => duration,
                None => return RestartOutcome::NothingToRestart,
            },
        };
        self.state = TimerState::Running(Countdown::start(now, duration));
        self.last_restart = Some(now);
        debug!(secs = duration.as_secs(), "timer restarted");
        RestartOutcome::Restarted(duration)
    }

    /// Time-driven transition. Safe to call any number of times. A
    /// countdown kept behind the open menu expires too, closing the menu.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let deadline = match &self.state {
            TimerState::Running(countdown)
            | TimerState::Configuring {
                resume: Some(countdown),
                ..
            } => countdown.deadline,
            _ => return TickOutcome::Unchanged,
        };
        if now < deadline {
            return TickOutcome::Unchanged;
        }
        if self.is_configuring() {
            debug!("timer menu closed by expiry");
        }
        self.state = TimerState::Finished { at: now };
        debug!("timer finished");
        TickOutcome::Expired
    }

    /// What the timer display shows, if anything. The finished alert stays
    /// up for `alert_for` after expiry.
    pub fn display(&self, now: Instant, alert_for: Duration) -> Option<TimerDisplay> {
        match &self.state {
            TimerState::Idle => None,
            TimerState::Configuring { resume, .. } => Some(TimerDisplay {
                remaining: resume.map(|c| c.remaining(now)).unwrap_or_default(),
                alert: false,
            }),
            TimerState::Running(countdown) => Some(TimerDisplay {
                remaining: countdown.remaining(now),
                alert: false,
            }),
            TimerState::Finished { at } => (now.saturating_duration_since(*at) < alert_for)
                .then_some(TimerDisplay {
                    remaining: Duration::ZERO,
                    alert: true,
                }),
        }
    }
}

/// Accepts `<digits>` (seconds) or `<digits>m` (minutes), surrounding
/// whitespace and case ignored. Zero is rejected.
pub fn parse_duration(text: &str) -> NoteResult<Duration> {
    let invalid = || NoteError::InvalidDuration(text.to_string());
    let normalized = text.trim().to_lowercase();
    let (digits, minutes) = match normalized.strip_suffix('m') {
        Some(digits) => (digits, true),
        None => (normalized.as_str(), false),
    };
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(invalid());
    }
    let amount: u64 = digits.parse().map_err(|_| invalid())?;
    let seconds = if minutes {
        amount.checked_mul(60).ok_or_else(invalid)?
    } else {
        amount
    };
    if seconds == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}

/// `mm:ss`, rounding partial seconds up so a fresh 90 s timer reads 01:30.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_millis().div_ceil(1000) as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Short preset label: whole minutes as `3m`, otherwise seconds as `30s`.
pub fn preset_label(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{secs}s")
    }
}

#[cfg(test)]
mod tests;
