//! Configuration loading and merging.
//!
//! Config is loaded from up to three sources, later ones taking precedence
//! per key:
//! 1. User-level: `$XDG_CONFIG_HOME/notator/config.toml`
//! 2. Local: `<cwd>/.notator/config.toml`
//! 3. An explicit `--config` file
//!
//! Missing or unparsable files are skipped and defaults fill the gaps.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

const DEFAULT_NOTES_DIR: &str = "data";
const DEFAULT_EXTENSION: &str = "txt";
const DEFAULT_SESSION_FILE: &str = "session.toml";
const DEFAULT_QUOTES_FILE: &str = "quotes.txt";
const DEFAULT_PRESETS: [u64; 4] = [30, 180, 420, 660];
const DEFAULT_RESTART_WINDOW_MS: u64 = 2000;
const DEFAULT_ALERT_SECS: u64 = 5;
const DEFAULT_REMINDER_AFTER: usize = 3;
const DEFAULT_QUOTE_WINDOW_SECS: u64 = 15 * 60;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub keymap: KeymapConfig,
    pub storage: StorageConfig,
    pub timer: TimerConfig,
    pub quotes: QuotesConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapConfig {
    pub new_tab: String,
    pub close_tab: String,
    pub next_tab: String,
    pub prev_tab: String,
    pub open: String,
    pub save: String,
    pub timer_menu: String,
    pub timer_restart: String,
    pub delete: String,
    pub quote: String,
    pub hemingway: String,
    pub tab_bar: String,
    pub quit: String,
    pub suppressed: Vec<String>,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            new_tab: "ctrl+n".to_string(),
            close_tab: "ctrl+w".to_string(),
            next_tab: "ctrl+pagedown".to_string(),
            prev_tab: "ctrl+pageup".to_string(),
            open: "ctrl+o".to_string(),
            save: "ctrl+s".to_string(),
            timer_menu: "ctrl+t".to_string(),
            timer_restart: "ctrl+r".to_string(),
            delete: "ctrl+delete".to_string(),
            quote: "ctrl+l".to_string(),
            hemingway: "ctrl+g".to_string(),
            tab_bar: "ctrl+b".to_string(),
            quit: "ctrl+q".to_string(),
            suppressed: vec![
                "ctrl+h".to_string(),
                "ctrl+k".to_string(),
                "ctrl+m".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub notes_dir: PathBuf,
    pub extension: String,
    pub session_file: Option<PathBuf>,
    pub quotes_file: Option<PathBuf>,
}

impl StorageConfig {
    /// Session snapshot location, defaulting to a file in the notes directory.
    pub fn session_path(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| self.notes_dir.join(DEFAULT_SESSION_FILE))
    }

    pub fn quotes_path(&self) -> PathBuf {
        self.quotes_file
            .clone()
            .unwrap_or_else(|| self.notes_dir.join(DEFAULT_QUOTES_FILE))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub presets: Vec<Duration>,
    pub restart_window: Duration,
    /// How long the finished alert stays on the timer display.
    pub alert: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotesConfig {
    pub reminder_after: usize,
    pub window: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: String,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    keymap: Option<RawKeymap>,
    storage: Option<RawStorage>,
    timer: Option<RawTimer>,
    quotes: Option<RawQuotes>,
    log: Option<RawLog>,
}

#[derive(Debug, Default, Deserialize)]
struct RawKeymap {
    #[serde(alias = "newTab")]
    new_tab: Option<String>,
    #[serde(alias = "closeTab")]
    close_tab: Option<String>,
    #[serde(alias = "nextTab")]
    next_tab: Option<String>,
    #[serde(alias = "prevTab")]
    prev_tab: Option<String>,
    open: Option<String>,
    save: Option<String>,
    #[serde(alias = "timerMenu")]
    timer_menu: Option<String>,
    #[serde(alias = "timerRestart")]
    timer_restart: Option<String>,
    delete: Option<String>,
    quote: Option<String>,
    hemingway: Option<String>,
    #[serde(alias = "tabBar")]
    tab_bar: Option<String>,
    quit: Option<String>,
    suppressed: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawStorage {
    #[serde(alias = "notesDir")]
    notes_dir: Option<String>,
    extension: Option<String>,
    #[serde(alias = "sessionFile")]
    session_file: Option<String>,
    #[serde(alias = "quotesFile")]
    quotes_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawTimer {
    presets: Option<Vec<u64>>,
    #[serde(alias = "restartWindowMs")]
    restart_window_ms: Option<u64>,
    #[serde(alias = "alertSecs")]
    alert_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawQuotes {
    #[serde(alias = "reminderAfter")]
    reminder_after: Option<usize>,
    #[serde(alias = "windowSecs")]
    window_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLog {
    level: Option<String>,
    path: Option<String>,
}

fn read_toml(path: &Path) -> Option<RawConfig> {
    let contents = fs::read_to_string(path).ok()?;
    if contents.trim().is_empty() {
        return None;
    }
    match toml::from_str::<RawConfig>(&contents) {
        Ok(raw) => Some(raw),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring unparsable config");
            None
        }
    }
}

/// Value from the highest-precedence layer that sets it.
fn layered<T>(layers: &[RawConfig], get: impl Fn(&RawConfig) -> Option<T>) -> Option<T> {
    layers.iter().rev().find_map(get)
}

fn merge_config(layers: &[RawConfig]) -> Config {
    let defaults = KeymapConfig::default();
    let key = |get: fn(&RawKeymap) -> Option<String>, fallback: &str| {
        layered(layers, |c| c.keymap.as_ref().and_then(get))
            .unwrap_or_else(|| fallback.to_string())
    };
    let keymap = KeymapConfig {
        new_tab: key(|k| k.new_tab.clone(), &defaults.new_tab),
        close_tab: key(|k| k.close_tab.clone(), &defaults.close_tab),
        next_tab: key(|k| k.next_tab.clone(), &defaults.next_tab),
        prev_tab: key(|k| k.prev_tab.clone(), &defaults.prev_tab),
        open: key(|k| k.open.clone(), &defaults.open),
        save: key(|k| k.save.clone(), &defaults.save),
        timer_menu: key(|k| k.timer_menu.clone(), &defaults.timer_menu),
        timer_restart: key(|k| k.timer_restart.clone(), &defaults.timer_restart),
        delete: key(|k| k.delete.clone(), &defaults.delete),
        quote: key(|k| k.quote.clone(), &defaults.quote),
        hemingway: key(|k| k.hemingway.clone(), &defaults.hemingway),
        tab_bar: key(|k| k.tab_bar.clone(), &defaults.tab_bar),
        quit: key(|k| k.quit.clone(), &defaults.quit),
        suppressed: layered(layers, |c| {
            c.keymap.as_ref().and_then(|k| k.suppressed.clone())
        })
        .unwrap_or(defaults.suppressed),
    };

    let stored = |get: fn(&RawStorage) -> Option<String>| {
        layered(layers, |c| c.storage.as_ref().and_then(get))
    };
    let storage = StorageConfig {
        notes_dir: PathBuf::from(
            stored(|s| s.notes_dir.clone()).unwrap_or_else(|| DEFAULT_NOTES_DIR.to_string()),
        ),
        extension: stored(|s| s.extension.clone())
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string()),
        session_file: stored(|s| s.session_file.clone()).map(PathBuf::from),
        quotes_file: stored(|s| s.quotes_file.clone()).map(PathBuf::from),
    };

    let presets = layered(layers, |c| c.timer.as_ref().and_then(|t| t.presets.clone()))
        .map(|secs| secs.into_iter().filter(|s| *s > 0).collect::<Vec<_>>())
        .filter(|secs| !secs.is_empty())
        .unwrap_or_else(|| DEFAULT_PRESETS.to_vec());
    let restart_window_ms = layered(layers, |c| c.timer.as_ref().and_then(|t| t.restart_window_ms))
        .unwrap_or(DEFAULT_RESTART_WINDOW_MS);
    let alert_secs = layered(layers, |c| c.timer.as_ref().and_then(|t| t.alert_secs))
        .unwrap_or(DEFAULT_ALERT_SECS);

    let reminder_after = layered(layers, |c| c.quotes.as_ref().and_then(|q| q.reminder_after))
        .unwrap_or(DEFAULT_REMINDER_AFTER);
    let window_secs = layered(layers, |c| c.quotes.as_ref().and_then(|q| q.window_secs))
        .unwrap_or(DEFAULT_QUOTE_WINDOW_SECS);

    let level = layered(layers, |c| c.log.as_ref().and_then(|l| l.level.clone()))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let log_path = layered(layers, |c| c.log.as_ref().and_then(|l| l.path.clone()));

    Config {
        keymap,
        storage,
        timer: TimerConfig {
            presets: presets.into_iter().map(Duration::from_secs).collect(),
            restart_window: Duration::from_millis(restart_window_ms),
            alert: Duration::from_secs(alert_secs),
        },
        quotes: QuotesConfig {
            reminder_after,
            window: Duration::from_secs(window_secs),
        },
        log: LogConfig {
            level,
            path: log_path.map(PathBuf::from),
        },
    }
}

pub fn local_config_path(cwd: &Path) -> PathBuf {
    cwd.join(".notator").join("config.toml")
}

pub fn user_config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("notator").join("config.toml"))
}

pub fn load_config(cwd: &Path, extra: Option<&Path>) -> Config {
    let mut layers = Vec::new();
    if let Some(user) = user_config_path().and_then(|path| read_toml(&path)) {
        layers.push(user);
    }
    if let Some(local) = read_toml(&local_config_path(cwd)) {
        layers.push(local);
    }
    if let Some(extra) = extra.and_then(read_toml) {
        layers.push(extra);
    }
    merge_config(&layers)
}

impl Default for Config {
    fn default() -> Self {
        merge_config(&[])
    }
}

#[cfg(test)]
mod tests;
