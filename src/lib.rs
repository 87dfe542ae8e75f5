//! Hydrological Archive Importer Library
//!
//! Imports groundwater level and precipitation readings distributed as a
//! zip archive of semi-structured CSV files into a SQLite database keyed
//! by date, with one column per measurement station.
//!
//! This library provides tools for:
//! - Indexing archive entries and the stations they cover
//! - Classifying entry names against the three historic naming conventions
//! - Maintaining a dynamic wide-table schema with non-clobbering upserts
//! - Streaming entry contents into the database one transaction per file

pub mod archive;
pub mod backup;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod error;
pub mod importer;
pub mod models;
pub mod processor;
pub mod store;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::{BackupMode, ImportConfig};
pub use error::{ImportError, Result};
pub use models::{Category, Disposition, ImportStats};
pub use processor::ArchiveImporter;
pub use store::RecordStore;
