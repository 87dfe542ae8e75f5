//! Error handling for archive import operations.
//!
//! Provides error types with context for archive indexing, filename
//! classification, database writes and the backup step that runs
//! before an import.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Cannot extract a station id from archive entry: {entry}")]
    MalformedEntryName { entry: String },

    #[error("file {entry} does not match any of the expected patterns")]
    UnrecognizedFilename { entry: String },

    #[error("Unknown data category '{token}' (expected grundwasser-gwo or meteo-n)")]
    UnknownCategory { token: String },

    #[error("Failed to read archive entry {entry}: {source}")]
    EntryRead {
        entry: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to back up database {path}: {source}")]
    Backup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ImportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
