//! Error taxonomy shared by the document store, timer and session code.
//!
//! None of these are fatal: the event loop turns every variant into a
//! transient notice and leaves the previous state in place.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("kunne ikke læse eller skrive {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} er ikke gyldig UTF-8", path.display())]
    Encoding { path: PathBuf },
    /// Save was requested for a tab that has no file yet.
    #[error("noten har intet filnavn")]
    NeedsPath,
    #[error("ugyldig varighed: {0:?}")]
    InvalidDuration(String),
    #[error("ugyldigt filnavn: {0:?}")]
    InvalidName(String),
}

impl NoteError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::InvalidData {
            return NoteError::Encoding { path };
        }
        NoteError::Io { path, source }
    }
}

pub type NoteResult<T> = Result<T, NoteError>;
