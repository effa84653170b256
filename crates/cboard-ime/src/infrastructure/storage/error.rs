//! Error type for settings document operations.
//!
//! These errors never leave the store's infallible operations; they are
//! logged there and replaced by defaults.  The `try_*` operations return them
//! to callers that want to check for themselves.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for settings document operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but has no content.
    #[error("settings document at {0} is empty")]
    EmptyDocument(PathBuf),

    /// The document text is not a valid settings document.
    #[error("failed to parse settings document: {0}")]
    Parse(#[source] serde_json::Error),

    /// The settings could not be serialised.
    #[error("failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the document simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
