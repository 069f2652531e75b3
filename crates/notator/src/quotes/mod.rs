//! Quote rotation: every quote is shown once before any repeats, and asking
//! too often within a rolling window earns a gentle reminder instead.
//!
//! The source file holds one quote per paragraph; a quote and its
//! attribution on consecutive lines stay together.

use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use rand::seq::IteratorRandom;
use rand::Rng;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteDraw {
    Quote(String),
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayDecision {
    Show,
    Remind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    /// Requests allowed inside `window` before the reminder appears.
    pub limit: usize,
    pub window: Duration,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            limit: 3,
            window: Duration::from_secs(15 * 60),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuoteRegistry {
    quotes: Vec<String>,
    unseen: BTreeSet<usize>,
    shown_since_reset: usize,
    last_shown: Option<usize>,
    exhausted_surfaced: bool,
    declined: bool,
    throttle: ThrottleConfig,
    requests: VecDeque<Instant>,
}

impl QuoteRegistry {
    pub fn new(quotes: Vec<String>, throttle: ThrottleConfig) -> Self {
        let unseen = (0..quotes.len()).collect();
        Self {
            quotes,
            unseen,
            shown_since_reset: 0,
            last_shown: None,
            exhausted_surfaced: false,
            declined: false,
            throttle,
            requests: VecDeque::new(),
        }
    }

    /// Read the quote file once. A missing or unreadable file leaves the
    /// rotation empty, which reports `Exhausted` forever.
    pub fn load(path: &Path, throttle: ThrottleConfig) -> Self {
        let quotes = match fs::read_to_string(path) {
            Ok(text) => parse_quotes(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read quotes");
                Vec::new()
            }
        };
        info!(path = %path.display(), count = quotes.len(), "loaded quotes");
        Self::new(quotes, throttle)
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn unseen_count(&self) -> usize {
        self.unseen.len()
    }

    pub fn shown_since_reset(&self) -> usize {
        self.shown_since_reset
    }

    /// The user turned down a reset after exhaustion.
    pub fn is_declined(&self) -> bool {
        self.declined
    }

    /// Draw an unseen quote uniformly, avoiding the one shown last whenever
    /// another candidate remains.
    pub fn next_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> QuoteDraw {
        let last = self.last_shown;
        let avoid_last = self.unseen.len() > 1;
        let picked = self
            .unseen
            .iter()
            .copied()
            .filter(|idx| !(avoid_last && Some(*idx) == last))
            .choose(rng);
        match picked {
            Some(idx) => {
                self.unseen.remove(&idx);
                self.last_shown = Some(idx);
                QuoteDraw::Quote(self.quotes[idx].clone())
            }
            None => {
                if !self.quotes.is_empty() {
                    self.exhausted_surfaced = true;
                }
                QuoteDraw::Exhausted
            }
        }
    }

    /// Make every quote eligible again. Only honoured once exhaustion has
    /// been reported to the caller.
    pub fn reset(&mut self) -> bool {
        if !self.exhausted_surfaced {
            return false;
        }
        self.unseen = (0..self.quotes.len()).collect();
        self.shown_since_reset = 0;
        self.exhausted_surfaced = false;
        self.declined = false;
        info!(count = self.quotes.len(), "quote rotation reset");
        true
    }

    pub fn decline_reset(&mut self) {
        self.declined = true;
    }

    /// Count a request to see a quote. Past the limit inside the window the
    /// request is not counted and the caller should show the reminder.
    pub fn record_display(&mut self, now: Instant) -> DisplayDecision {
        self.prune_requests(now);
        if self.requests.len() >= self.throttle.limit {
            return DisplayDecision::Remind;
        }
        self.force_display(now);
        DisplayDecision::Show
    }

    /// Count a request that bypasses the reminder.
    pub fn force_display(&mut self, now: Instant) {
        self.requests.push_back(now);
        self.shown_since_reset += 1;
    }

    fn prune_requests(&mut self, now: Instant) {
        while let Some(first) = self.requests.front() {
            if now.saturating_duration_since(*first) >= self.throttle.window {
                self.requests.pop_front();
            } else {
                break;
            }
        }
    }
}

/// Split the source into paragraphs; blank lines separate quotes.
pub fn parse_quotes(text: &str) -> Vec<String> {
    let mut quotes = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                quotes.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        quotes.push(current.join("\n"));
    }
    quotes
}
