//! Configuration for a single import run.
//!
//! The database and archive paths are carried explicitly in an
//! [`ImportConfig`] and handed to the orchestrator and record store,
//! together with the backup mode and progress preference.

use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

/// What to do with an existing database file before importing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BackupMode {
    /// Move the database to the backup slot; the import starts from an empty database
    Move,
    /// Copy the database to the backup slot and import into the existing file
    Copy,
    /// Leave the database untouched and import into it
    None,
}

/// Settings for one archive import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    /// SQLite database file to create or update
    pub database_path: PathBuf,

    /// Zip archive to import
    pub archive_path: PathBuf,

    /// Backup handling for a pre-existing database
    pub backup_mode: BackupMode,

    /// Show a progress bar while importing files
    pub show_progress: bool,
}

impl ImportConfig {
    pub fn new(database_path: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            archive_path: archive_path.into(),
            backup_mode: BackupMode::Move,
            show_progress: true,
        }
    }

    pub fn with_backup_mode(mut self, backup_mode: BackupMode) -> Self {
        self.backup_mode = backup_mode;
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Check paths before any file is touched
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ImportError::configuration("database path must not be empty"));
        }

        if self.database_path.is_dir() {
            return Err(ImportError::configuration(format!(
                "database path {} is a directory",
                self.database_path.display()
            )));
        }

        if !self.archive_path.is_file() {
            return Err(ImportError::configuration(format!(
                "archive {} does not exist or is not a file",
                self.archive_path.display()
            )));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}
