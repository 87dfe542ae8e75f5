//! Archive indexing.
//!
//! Lists every entry of the downloaded zip archive and collects the
//! distinct station ids found under the groundwater and precipitation
//! prefixes. The index is used for reporting only; it does not decide
//! which entries get imported.

use crate::constants::STATION_ID_PATTERN;
use crate::error::{ImportError, Result};
use crate::models::{ArchiveIndex, Category};
use regex::Regex;
use std::io::{Read, Seek};
use tracing::debug;
use zip::ZipArchive;

/// Builds an [`ArchiveIndex`] from an open zip archive
pub struct ArchiveIndexer {
    station_id: Regex,
}

impl ArchiveIndexer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            station_id: Regex::new(STATION_ID_PATTERN)?,
        })
    }

    /// List all entries and the deduplicated station ids per category
    pub fn index<R: Read + Seek>(&self, archive: &ZipArchive<R>) -> Result<ArchiveIndex> {
        let entries: Vec<String> = archive.file_names().map(str::to_string).collect();
        self.index_names(entries)
    }

    /// Index an already-listed set of entry names
    pub fn index_names(&self, entries: Vec<String>) -> Result<ArchiveIndex> {
        let mut index = ArchiveIndex::default();

        for entry in &entries {
            if entry.ends_with('/') {
                continue;
            }

            for category in Category::ALL {
                if !entry.starts_with(category.archive_prefix()) {
                    continue;
                }

                let station = self.station_id(entry)?;
                match category {
                    Category::Water => index.water_stations.insert(station),
                    Category::Rain => index.rain_stations.insert(station),
                };
            }
        }

        debug!(
            "Indexed {} entries: {} water stations, {} rain stations",
            entries.len(),
            index.water_stations.len(),
            index.rain_stations.len()
        );

        index.entries = entries;
        Ok(index)
    }

    fn station_id(&self, entry: &str) -> Result<String> {
        self.station_id
            .captures(entry)
            .and_then(|caps| caps.name("number"))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ImportError::MalformedEntryName {
                entry: entry.to_string(),
            })
    }
}
