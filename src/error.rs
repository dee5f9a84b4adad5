//! Error types for store access, export and per-session assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("database file does not exist: {}", .0.display())]
    StoreNotFound(PathBuf),

    #[error("could not determine the default Cursor database location; pass --db-path")]
    NoDefaultStore,

    #[error("failed to read database: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors confined to a single session; the session is skipped and reported
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("record {key} has an unexpected shape: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fragment {key} has an unexpected shape: {source}")]
    MalformedFragment {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write document for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}
