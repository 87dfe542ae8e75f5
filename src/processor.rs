//! Import orchestration.
//!
//! Runs one archive import end to end: open the database and archive,
//! index the archive for reporting, then classify and import every entry
//! in archive order. Processing is strictly sequential, and the first
//! classification or import error aborts the run.

use crate::archive::ArchiveIndexer;
use crate::classifier::FilenameClassifier;
use crate::config::ImportConfig;
use crate::constants::{PROGRESS_CHARS, PROGRESS_TEMPLATE};
use crate::error::Result;
use crate::importer::FileImporter;
use crate::models::{ArchiveIndex, Disposition, ImportStats};
use crate::store::RecordStore;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::time::Instant;
use tracing::{debug, error, info};
use zip::ZipArchive;

/// Orchestrates the import of one archive into one database
pub struct ArchiveImporter {
    config: ImportConfig,
    indexer: ArchiveIndexer,
    classifier: FilenameClassifier,
    importer: FileImporter,
}

impl ArchiveImporter {
    pub fn new(config: ImportConfig) -> Result<Self> {
        Ok(Self {
            config,
            indexer: ArchiveIndexer::new()?,
            classifier: FilenameClassifier::new()?,
            importer: FileImporter::new()?,
        })
    }

    /// Main import entry point
    ///
    /// The database connection is closed on every exit path. Files imported
    /// before a failure stay committed; the failing file's writes do not.
    pub fn run(&self) -> Result<ImportStats> {
        let start_time = Instant::now();

        let mut store = RecordStore::open(&self.config.database_path)?;
        let outcome = self.run_with_store(&mut store);
        let closed = store.close();

        let mut stats = outcome?;
        closed?;

        stats.processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Imported {} files ({} rows) in {}ms",
            stats.files_imported, stats.rows_written, stats.processing_time_ms
        );
        Ok(stats)
    }

    /// Initialise the schema, then import the configured archive into `store`
    pub fn run_with_store(&self, store: &mut RecordStore) -> Result<ImportStats> {
        store.initialize()?;

        let file = File::open(&self.config.archive_path)?;
        let mut archive = ZipArchive::new(BufReader::new(file))?;
        debug!(
            "Opened archive {} with {} entries",
            self.config.archive_path.display(),
            archive.len()
        );

        self.import_archive(&mut archive, store)
    }

    /// Import every entry of an already opened archive
    pub fn import_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        store: &mut RecordStore,
    ) -> Result<ImportStats> {
        let index = self.indexer.index(archive)?;
        self.report_index(&index);

        let mut stats = ImportStats {
            entries_total: index.entries.len(),
            water_stations: index.water_stations.len(),
            rain_stations: index.rain_stations.len(),
            ..Default::default()
        };

        let pb = self.progress_bar(index.entries.len());
        for entry in &index.entries {
            pb.set_message(entry.clone());

            if let Err(e) = self.import_one(archive, entry, store, &mut stats) {
                error!("Import aborted at {}: {}", entry, e);
                pb.abandon_with_message(format!("Failed: {}", entry));
                return Err(e);
            }
            pb.inc(1);
        }
        pb.finish_with_message("All files imported");

        Ok(stats)
    }

    fn import_one<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        entry: &str,
        store: &mut RecordStore,
        stats: &mut ImportStats,
    ) -> Result<()> {
        if entry.ends_with('/') {
            stats.directories_ignored += 1;
            return Ok(());
        }

        match self.classifier.classify(entry)? {
            Disposition::Skip => {
                debug!("Skipped same-day file {}", entry);
                stats.files_skipped += 1;
            }
            Disposition::Import(target) => {
                let file_stats = self.importer.import_entry(archive, entry, &target, store)?;
                stats.record_file(&file_stats);
            }
        }
        Ok(())
    }

    fn report_index(&self, index: &ArchiveIndex) {
        info!(
            "Archive {} contains {} entries from {} rain and {} water stations",
            self.config.archive_path.display(),
            index.entries.len(),
            index.rain_stations.len(),
            index.water_stations.len()
        );

        if self.config.show_progress {
            println!(
                "zip file {} contains data from {} rain measurement stations and {} water measurement stations...",
                self.config.archive_path.display().to_string().bright_cyan(),
                index.rain_stations.len().to_string().bright_white().bold(),
                index.water_stations.len().to_string().bright_white().bold()
            );
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            pb.set_style(style.progress_chars(PROGRESS_CHARS));
        }
        pb.set_message("importing files");
        pb
    }
}

#[cfg(test)]
mod tests;
