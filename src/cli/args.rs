//! Command-line argument definitions for the hydrological archive importer
//!
//! Defines the CLI interface using the clap derive API: a global database
//! option shared by all subcommands and the `zipimport` subcommand.

use crate::config::BackupMode;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the hydrological archive importer
///
/// Imports groundwater level and precipitation data downloaded from the
/// Bavarian Environment Agency into a local SQLite database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hydro-import",
    version,
    about = "Import groundwater and rainfall CSV archives into a SQLite database",
    long_about = "Imports zip archives of groundwater level (grundwasser-gwo) and precipitation \
                  (meteo-n) CSV files into a SQLite database with one date-keyed table per \
                  category and one column per measurement station."
)]
pub struct Args {
    /// Path to the SQLite database file on which to operate
    ///
    /// An existing file is backed up to <PATH>.bak before the command runs,
    /// replacing any earlier backup.
    #[arg(
        long = "sqlitedb",
        value_name = "PATH",
        help = "Path to the sqlite database file on which to operate"
    )]
    pub sqlitedb: PathBuf,

    /// Import into the existing database instead of starting fresh
    ///
    /// The database is copied to the backup slot rather than moved there,
    /// so new data accumulates on top of earlier imports.
    #[arg(
        long = "append",
        help = "Copy the database to the backup slot and import into it",
        conflicts_with = "no_backup"
    )]
    pub append: bool,

    /// Skip the backup and import into the existing database
    #[arg(long = "no-backup", help = "Do not back up the existing database")]
    pub no_backup: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,

    /// Output format for the final summary
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        global = true,
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a downloaded zip archive into the database
    Zipimport(ZipImportArgs),
}

/// Arguments for the zipimport command
#[derive(Debug, Clone, Parser)]
pub struct ZipImportArgs {
    /// The downloaded zip file to import
    ///
    /// Prompted for interactively when omitted.
    #[arg(
        long = "zipfile",
        value_name = "FILE",
        help = "The downloaded zip file from the Bayerisches Landesamt für Umwelt to import"
    )]
    pub zipfile: Option<PathBuf>,

    /// Disable the progress bar
    #[arg(long = "no-progress", help = "Do not show a progress bar")]
    pub no_progress: bool,
}

/// Output format options for the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the log level based on verbosity and quiet flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Backup handling selected by the flags
    pub fn backup_mode(&self) -> BackupMode {
        if self.no_backup {
            BackupMode::None
        } else if self.append {
            BackupMode::Copy
        } else {
            BackupMode::Move
        }
    }

    /// Human-readable console output (status lines, progress) is wanted
    pub fn show_console_output(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }
}
