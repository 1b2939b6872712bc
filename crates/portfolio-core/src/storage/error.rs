//! Storage error handling
//!
//! Typed errors for store operations. The underlying SQLite or I/O error is
//! always kept as the `source` so callers see the engine's own failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ProjectId;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to create data directory
    #[error("Failed to create data directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The database could not be opened
    #[error("Failed to open database at '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Schema creation failed
    #[error("Failed to initialize database schema: {0}")]
    Schema(#[source] rusqlite::Error),

    /// A read request failed
    #[error("Failed to read projects: {0}")]
    Read(#[source] rusqlite::Error),

    /// A write request failed
    #[error("Failed to write project: {0}")]
    Write(#[source] rusqlite::Error),

    /// `add` was given an id that is already taken
    #[error("A project with id {0} already exists")]
    DuplicateKey(ProjectId),

    /// `update` was given a project that was never saved
    #[error("Cannot update a project without an id")]
    MissingId,

    /// The blocking worker running the request failed
    #[error("Storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl StoreError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind.
    pub fn from_io(error: io::Error, path: PathBuf) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => StoreError::PermissionDenied {
                path,
                source: error,
            },
            _ => StoreError::CreateDirectory {
                path,
                source: error,
            },
        }
    }

    /// Whether the error comes from opening the store rather than a request
    pub fn is_open_error(&self) -> bool {
        matches!(
            self,
            StoreError::CreateDirectory { .. }
                | StoreError::PermissionDenied { .. }
                | StoreError::Open { .. }
                | StoreError::Schema(_)
        )
    }

    /// Check if this error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::PermissionDenied { .. }
                | StoreError::DuplicateKey(_)
                | StoreError::MissingId
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::PermissionDenied { .. } => {
                Some("Check file and directory permissions, or point data_dir somewhere writable.")
            }
            StoreError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            StoreError::DuplicateKey(_) => {
                Some("Omit the id when adding a project, or use update to replace it.")
            }
            StoreError::MissingId => Some("Add the project first to have an id assigned."),
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
