//! Document store: one plain-text file per tab under the notes directory.
//!
//! Files are read whole and written atomically (temp file in the same
//! directory, then rename) so a crash mid-save never leaves a truncated
//! note behind.

use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::editor::{EditableText, TextBuffer};
use crate::error::{NoteError, NoteResult};

pub type TabId = u64;

pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub path: Option<PathBuf>,
    pub editor: TextBuffer,
    pub dirty: bool,
    pub last_saved_hash: u64,
    /// First visible row, maintained by the renderer.
    pub scroll: usize,
}

impl Tab {
    pub fn untitled(id: TabId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            path: None,
            editor: TextBuffer::default(),
            dirty: false,
            last_saved_hash: content_hash(""),
            scroll: 0,
        }
    }

    /// Idempotent: a dirty tab stays dirty.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Dirty and the text really differs from what was last written.
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty && content_hash(&self.editor.text()) != self.last_saved_hash
    }

    /// A blank untitled tab that can be replaced without losing anything.
    pub fn is_pristine(&self) -> bool {
        self.path.is_none() && !self.dirty && self.editor.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    notes_dir: PathBuf,
    extension: String,
    /// Files that live beside the notes but are never listed as notes.
    reserved: Vec<PathBuf>,
}

impl DocumentStore {
    pub fn new(notes_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            reserved: Vec::new(),
        }
    }

    pub fn reserve(mut self, path: impl Into<PathBuf>) -> Self {
        self.reserved.push(path.into());
        self
    }

    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    pub fn ensure_dir(&self) -> NoteResult<()> {
        fs::create_dir_all(&self.notes_dir).map_err(|err| NoteError::io(&self.notes_dir, err))
    }

    /// Load `path` into a new tab. A missing file gives an empty buffer.
    pub fn open(&self, id: TabId, path: &Path) -> NoteResult<Tab> {
        let text = match fs::read(path) {
            Ok(bytes) => String::from_utf8(bytes).map_err(|_| NoteError::Encoding {
                path: path.to_path_buf(),
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(NoteError::io(path, err)),
        };
        debug!(path = %path.display(), bytes = text.len(), "opened note");
        Ok(Tab {
            id,
            title: self.display_name(path),
            path: Some(path.to_path_buf()),
            editor: TextBuffer::new(&text),
            dirty: false,
            last_saved_hash: content_hash(&text),
            scroll: 0,
        })
    }

    /// Write the tab to its file. Tabs without a path yield `NeedsPath`
    /// and nothing touches the disk.
    pub fn save(&self, tab: &mut Tab) -> NoteResult<()> {
        let path = tab.path.clone().ok_or(NoteError::NeedsPath)?;
        let text = tab.editor.text();
        write_atomic(&path, text.as_bytes()).map_err(|err| NoteError::io(&path, err))?;
        tab.dirty = false;
        tab.last_saved_hash = content_hash(&text);
        info!(path = %path.display(), bytes = text.len(), "saved note");
        Ok(())
    }

    /// Give the tab a new file under the notes directory and save it there.
    /// On failure the tab keeps its previous path and title.
    pub fn save_as(&self, tab: &mut Tab, name: &str) -> NoteResult<PathBuf> {
        let path = self.resolve_name(name)?;
        self.ensure_dir()?;
        let previous = tab.path.replace(path.clone());
        if let Err(err) = self.save(tab) {
            tab.path = previous;
            return Err(err);
        }
        tab.title = self.display_name(&path);
        Ok(path)
    }

    /// Map a user-typed name to a file inside the notes directory.
    pub fn resolve_name(&self, name: &str) -> NoteResult<PathBuf> {
        let trimmed = name.trim();
        let invalid = trimmed.is_empty()
            || trimmed.contains(['/', '\\'])
            || trimmed == "."
            || trimmed.contains("..");
        if invalid {
            return Err(NoteError::InvalidName(name.to_string()));
        }
        let mut path = self.notes_dir.join(trimmed);
        if path.extension().is_none() {
            path.set_extension(&self.extension);
        }
        Ok(path)
    }

    /// Remove a note file. Already gone counts as success.
    pub fn delete(&self, path: &Path) -> NoteResult<()> {
        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "deleted note");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(NoteError::io(path, err)),
        }
    }

    /// Notes with the storage extension, sorted by display name.
    pub fn list(&self) -> Vec<DocumentEntry> {
        let Ok(entries) = fs::read_dir(&self.notes_dir) else {
            return Vec::new();
        };
        let mut documents: Vec<DocumentEntry> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && self.has_extension(path))
            .filter(|path| !self.reserved.contains(path))
            .map(|path| DocumentEntry {
                name: self.display_name(&path),
                path,
            })
            .collect();
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        documents
    }

    /// File name with the storage extension stripped.
    pub fn display_name(&self, path: &Path) -> String {
        if self.has_extension(path) {
            if let Some(stem) = path.file_stem() {
                return stem.to_string_lossy().to_string();
            }
        }
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    fn has_extension(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy() == self.extension)
    }
}

pub fn content_hash(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

/// Write through a sibling temp file and rename over the target.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut tmp_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, contents)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
