//! Import of a single archive entry.
//!
//! Entries are `;`-separated text with a free-form preamble. The preamble
//! may carry the station display name; a `Datum;...;Prüfstatus` header row
//! ends it, and every following line is a `date;value;...` record with a
//! comma as decimal separator.

use crate::constants::{
    FIELD_SEPARATOR, HEADER_PATTERN, SOURCE_DECIMAL_SEPARATOR, STATION_NAME_PATTERN,
};
use crate::error::{ImportError, Result};
use crate::models::{FileImportStats, ImportTarget};
use crate::store::{RecordStore, StoreTransaction};
use regex::Regex;
use std::io::{BufRead, BufReader, Read, Seek};
use tracing::{debug, warn};
use zip::ZipArchive;

/// Where the line scan is within one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Preamble; station-name lines are recorded
    SeekingHeader,
    /// Every line is a data record
    ImportingData,
}

/// Streams archive entries into the [`RecordStore`]
pub struct FileImporter {
    station_name: Regex,
    header: Regex,
}

impl FileImporter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            station_name: Regex::new(STATION_NAME_PATTERN)?,
            header: Regex::new(HEADER_PATTERN)?,
        })
    }

    /// Import one classified entry, committing its writes as a unit
    pub fn import_entry<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        entry: &str,
        target: &ImportTarget,
        store: &mut RecordStore,
    ) -> Result<FileImportStats> {
        let file = archive.by_name(entry)?;
        let tx = store.transaction()?;

        let stats = self.import_lines(BufReader::new(file), entry, target, &tx)?;
        tx.commit()?;

        debug!(
            "Imported {}: {} rows for {} station {}",
            entry, stats.rows_written, target.category, target.station_id
        );
        Ok(stats)
    }

    /// Scan decoded lines and write station names and measurements
    pub fn import_lines<B: BufRead>(
        &self,
        reader: B,
        entry: &str,
        target: &ImportTarget,
        tx: &StoreTransaction<'_>,
    ) -> Result<FileImportStats> {
        let mut state = ScanState::SeekingHeader;
        let mut column_ready = false;
        let mut stats = FileImportStats::default();

        for line in reader.lines() {
            let line = line.map_err(|source| ImportError::EntryRead {
                entry: entry.to_string(),
                source,
            })?;

            match state {
                ScanState::SeekingHeader => {
                    if let Some(caps) = self.station_name.captures(&line) {
                        let name = caps
                            .name("name")
                            .map_or("", |m| m.as_str())
                            .trim_end_matches('\r');
                        tx.upsert_station_metadata(target.category, &target.station_id, name)?;
                        stats.station_names += 1;
                    } else if self.header.is_match(&line) {
                        state = ScanState::ImportingData;
                        stats.header_found = true;
                    }
                }
                ScanState::ImportingData => {
                    let line = line.replace(SOURCE_DECIMAL_SEPARATOR, ".");
                    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
                    if fields.len() < 2 {
                        continue;
                    }

                    if !column_ready {
                        tx.ensure_station_column(target.category, &target.station_id)?;
                        column_ready = true;
                    }

                    tx.upsert_measurement(
                        target.category,
                        fields[0],
                        &target.station_id,
                        parse_value(fields[1]),
                    )?;
                    stats.rows_written += 1;
                }
            }
        }

        if !stats.header_found {
            warn!("No data header found in {}", entry);
        }

        Ok(stats)
    }
}

/// Parse a measurement value; empty or malformed input is a missing value
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, FileKind};
    use std::io::Cursor;

    fn water_target(station_id: &str) -> ImportTarget {
        ImportTarget {
            category: Category::Water,
            station_id: station_id.to_string(),
            kind: FileKind::FullHistory,
        }
    }

    fn store() -> RecordStore {
        let store = RecordStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn import(store: &mut RecordStore, content: &str, target: &ImportTarget) -> FileImportStats {
        let importer = FileImporter::new().unwrap();
        let tx = store.transaction().unwrap();
        let stats = importer
            .import_lines(Cursor::new(content), "test.csv", target, &tx)
            .unwrap();
        tx.commit().unwrap();
        stats
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("12.5"), Some(12.5));
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(" 3.25\r"), Some(3.25));
        assert_eq!(parse_value("-0.5"), Some(-0.5));
        assert_eq!(parse_value("12,5"), None);
    }

    #[test]
    fn test_import_preamble_header_and_rows() {
        let mut store = store();
        let content = "Messstellen-Name:;Test Well\n\
                       Messstellen-Nr.:;100\n\
                       Datum;Wert;Prüfstatus\n\
                       01.01.2020;12,5;OK\n\
                       02.01.2020;;OK\n\
                       03.01.2020;n/a;OK\n";

        let stats = import(&mut store, content, &water_target("100"));

        assert!(stats.header_found);
        assert_eq!(stats.station_names, 1);
        assert_eq!(stats.rows_written, 3);
        assert_eq!(
            store.station_name(Category::Water, "100").unwrap().as_deref(),
            Some("Test Well")
        );
        assert_eq!(
            store.measurement(Category::Water, "01.01.2020", "100").unwrap(),
            Some(12.5)
        );
        assert_eq!(
            store.measurement(Category::Water, "02.01.2020", "100").unwrap(),
            None
        );
        assert_eq!(
            store.measurement(Category::Water, "03.01.2020", "100").unwrap(),
            None
        );
        assert_eq!(store.row_count(Category::Water).unwrap(), 3);
    }

    #[test]
    fn test_lines_before_header_are_not_data() {
        let mut store = store();
        let content = "Quelle;Bayerisches Landesamt\n\
                       01.01.2020;9,9;OK\n\
                       Datum;Wert;Prüfstatus\n\
                       02.01.2020;1,0;OK\n";

        let stats = import(&mut store, content, &water_target("100"));

        assert_eq!(stats.rows_written, 1);
        assert_eq!(stats.station_names, 0);
        assert_eq!(store.row_count(Category::Water).unwrap(), 1);
    }

    #[test]
    fn test_station_name_lines_after_header_are_data() {
        let mut store = store();
        let content = "Datum;Wert;Prüfstatus\n\
                       Messstellen-Name:;Late Name\n";

        let stats = import(&mut store, content, &water_target("100"));

        assert_eq!(stats.station_names, 0);
        assert_eq!(stats.rows_written, 1);
        assert_eq!(store.station_name(Category::Water, "100").unwrap(), None);
    }

    #[test]
    fn test_short_lines_are_skipped() {
        let mut store = store();
        let content = "Datum;Wert;Prüfstatus\n\
                       01.01.2020;4,0;OK\n\
                       \n\
                       trailer\n";

        let stats = import(&mut store, content, &water_target("100"));

        assert_eq!(stats.rows_written, 1);
        assert_eq!(store.row_count(Category::Water).unwrap(), 1);
    }

    #[test]
    fn test_crlf_lines() {
        let mut store = store();
        let content = "Messstellen-Name:;Brunnen Nord\r\n\
                       Datum;Wert;Prüfstatus\r\n\
                       01.01.2020;7,25\r\n";

        import(&mut store, content, &water_target("100"));

        assert_eq!(
            store.station_name(Category::Water, "100").unwrap().as_deref(),
            Some("Brunnen Nord")
        );
        assert_eq!(
            store.measurement(Category::Water, "01.01.2020", "100").unwrap(),
            Some(7.25)
        );
    }

    #[test]
    fn test_file_without_header_writes_no_rows() {
        let mut store = store();
        let content = "Messstellen-Name:;Only Preamble\n01.01.2020;1,0;OK\n";

        let stats = import(&mut store, content, &water_target("100"));

        assert!(!stats.header_found);
        assert_eq!(stats.rows_written, 0);
        assert!(store.station_columns(Category::Water).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_entry_read_error() {
        let mut store = store();
        let importer = FileImporter::new().unwrap();
        let tx = store.transaction().unwrap();
        let bytes: &[u8] = b"Datum;Wert;Pr\xfcfstatus\n";

        let result = importer.import_lines(Cursor::new(bytes), "bad.csv", &water_target("1"), &tx);

        assert!(matches!(
            result,
            Err(ImportError::EntryRead { ref entry, .. }) if entry == "bad.csv"
        ));
    }
}
