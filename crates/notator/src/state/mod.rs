//! Persistent session layout.
//!
//! Stores which tabs were open, which one was active, and the global view
//! toggles in `<notes_dir>/session.toml`, e.g.:
//!
//! ```toml
//! hemingway = false
//! tab_bar = true
//!
//! [[tabs]]
//! path = "data/a.txt"
//! title = "a"
//! active = false
//! ```
//!
//! Written after every save, close and delete; read once at startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::document::write_atomic;
use crate::error::{NoteError, NoteResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub hemingway: bool,
    pub tab_bar: bool,
    pub tabs: Vec<TabRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub title: String,
    pub active: bool,
}

impl SessionSnapshot {
    /// Index of the tab marked active, or the first tab.
    pub fn active_index(&self) -> usize {
        self.tabs
            .iter()
            .position(|record| record.active)
            .unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    hemingway: Option<bool>,
    #[serde(alias = "tabBar")]
    tab_bar: Option<bool>,
    tabs: Option<Vec<RawTabRecord>>,
}

#[derive(Debug, Deserialize)]
struct RawTabRecord {
    path: Option<String>,
    title: Option<String>,
    #[serde(alias = "last_active")]
    active: Option<bool>,
}

/// Read the snapshot. Absent, empty, unparsable or tab-less files all give
/// `None`; the caller starts with a fresh tab.
pub fn load_snapshot(path: &Path) -> Option<SessionSnapshot> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no session snapshot");
            return None;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read session snapshot");
            return None;
        }
    };
    if contents.trim().is_empty() {
        return None;
    }

    let raw: RawSnapshot = match toml::from_str(&contents) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "corrupt session snapshot");
            return None;
        }
    };
    let tabs: Vec<TabRecord> = raw
        .tabs
        .unwrap_or_default()
        .into_iter()
        .filter_map(|record| {
            let path = record
                .path
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from);
            let title = record.title.filter(|title| !title.trim().is_empty());
            // A record needs something to restore from.
            if path.is_none() && title.is_none() {
                return None;
            }
            Some(TabRecord {
                title: title.unwrap_or_default(),
                path,
                active: record.active.unwrap_or(false),
            })
        })
        .collect();
    if tabs.is_empty() {
        return None;
    }

    Some(SessionSnapshot {
        hemingway: raw.hemingway.unwrap_or(false),
        tab_bar: raw.tab_bar.unwrap_or(true),
        tabs,
    })
}

pub fn save_snapshot(path: &Path, snapshot: &SessionSnapshot) -> NoteResult<()> {
    let contents = toml::to_string(snapshot).map_err(|err| {
        NoteError::io(path, io::Error::new(io::ErrorKind::InvalidInput, err))
    })?;
    write_atomic(path, contents.as_bytes()).map_err(|err| NoteError::io(path, err))?;
    debug!(path = %path.display(), tabs = snapshot.tabs.len(), "session snapshot written");
    Ok(())
}
