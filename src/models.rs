//! Core data structures and types for archive imports.
//!
//! Defines measurement categories, classifier dispositions, the archive
//! index produced before an import, and the statistics reported after it.

use crate::constants::{
    RAIN_DATA_TABLE, RAIN_PREFIX, RAIN_STATIONS_TABLE, RAIN_TOKEN, WATER_DATA_TABLE, WATER_PREFIX,
    WATER_STATIONS_TABLE, WATER_TOKEN,
};
use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Measurement categories found in an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Groundwater level readings (`grundwasser-gwo/`)
    Water,
    /// Precipitation readings (`meteo-n/`)
    Rain,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Water, Category::Rain];

    /// Map an archive directory token to its category
    pub fn from_token(token: &str) -> Result<Self> {
        match token {
            WATER_TOKEN => Ok(Category::Water),
            RAIN_TOKEN => Ok(Category::Rain),
            other => Err(ImportError::UnknownCategory {
                token: other.to_string(),
            }),
        }
    }

    /// Top-level archive prefix, including the trailing slash
    pub fn archive_prefix(&self) -> &'static str {
        match self {
            Category::Water => WATER_PREFIX,
            Category::Rain => RAIN_PREFIX,
        }
    }

    /// Wide, date-keyed table holding one column per station
    pub fn data_table(&self) -> &'static str {
        match self {
            Category::Water => WATER_DATA_TABLE,
            Category::Rain => RAIN_DATA_TABLE,
        }
    }

    /// Station metadata table
    pub fn stations_table(&self) -> &'static str {
        match self {
            Category::Water => WATER_STATIONS_TABLE,
            Category::Rain => RAIN_STATIONS_TABLE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Water => write!(f, "water"),
            Category::Rain => write!(f, "rain"),
        }
    }
}

/// Which naming convention an importable entry followed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// `{station}_beginn_bis_{date}_...csv`
    FullHistory,
    /// `{station}_{start}_{end}_...csv`
    YearToDate,
}

/// An archive entry that should be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportTarget {
    pub category: Category,
    pub station_id: String,
    pub kind: FileKind,
}

/// Classifier outcome for one archive entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Import(ImportTarget),
    /// Same-day partial data
    Skip,
}

/// Archive listing with the station ids found under each category prefix
#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex {
    /// Every entry name, in archive order
    pub entries: Vec<String>,
    pub water_stations: BTreeSet<String>,
    pub rain_stations: BTreeSet<String>,
}

impl ArchiveIndex {
    pub fn stations(&self, category: Category) -> &BTreeSet<String> {
        match category {
            Category::Water => &self.water_stations,
            Category::Rain => &self.rain_stations,
        }
    }
}

/// Result of importing a single archive entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileImportStats {
    pub rows_written: usize,
    pub station_names: usize,
    pub header_found: bool,
}

/// Summary of one import run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportStats {
    pub entries_total: usize,
    pub files_imported: usize,
    pub files_skipped: usize,
    pub directories_ignored: usize,
    pub rows_written: usize,
    pub station_names: usize,
    pub water_stations: usize,
    pub rain_stations: usize,
    pub processing_time_ms: u64,
}

impl ImportStats {
    /// Fold the outcome of one imported file into the run totals
    pub fn record_file(&mut self, file: &FileImportStats) {
        self.files_imported += 1;
        self.rows_written += file.rows_written;
        self.station_names += file.station_names;
    }
}
