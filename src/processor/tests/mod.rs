//! Integration tests for the processor module
//!
//! Tests the complete import pipeline using in-memory zip archives that
//! mirror the layout of the downloaded data sets.


use crate::config::{BackupMode, ImportConfig};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;

/// Groundwater file content for one station with the given data lines
pub fn water_file(name: &str, rows: &[&str]) -> String {
    let mut content = format!(
        "Messstellen-Name:;{}\nMessstellen-Nr.:;0\nDatum;Grundwasserstand [m NN];Prüfstatus\n",
        name
    );
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Build a zip archive in memory from `(entry name, content)` pairs
pub fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
        let options = SimpleFileOptions::default();
        for (name, content) in entries {
            if name.ends_with('/') {
                zip.add_directory(name.trim_end_matches('/'), options).unwrap();
            } else {
                zip.start_file(*name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
        }
        zip.finish().unwrap();
    }
    buf
}

/// Write an archive into `dir` and return its path
pub fn write_archive(dir: &Path, entries: &[(&str, &str)]) -> PathBuf {
    let path = dir.join("download.zip");
    std::fs::write(&path, build_archive(entries)).unwrap();
    path
}

/// Quiet configuration importing `archive` into `dir/hydro.sqlite`
pub fn test_config(dir: &Path, archive: &Path) -> ImportConfig {
    ImportConfig::new(dir.join("hydro.sqlite"), archive)
        .with_backup_mode(BackupMode::None)
        .with_progress(false)
}
