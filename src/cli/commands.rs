//! Command implementations for the hydrological archive importer CLI
//!
//! Wires parsed arguments to the import core: logging setup, the
//! single-slot database backup, interactive archive selection and the
//! final summary report.

use crate::backup::backup_database;
use crate::cli::args::{Args, Commands, OutputFormat, ZipImportArgs};
use crate::config::ImportConfig;
use crate::models::ImportStats;
use crate::processor::ArchiveImporter;
use anyhow::{Context, Result};
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Main command runner
///
/// Returns the import statistics, or `None` when no subcommand was given.
pub fn run(args: Args) -> Result<Option<ImportStats>> {
    setup_logging(&args);
    debug!("Command line arguments: {:?}", args);

    let Some(command) = args.command.clone() else {
        return Ok(None);
    };

    match command {
        Commands::Zipimport(zip_args) => run_zipimport(&args, &zip_args).map(Some),
    }
}

fn run_zipimport(args: &Args, zip_args: &ZipImportArgs) -> Result<ImportStats> {
    let console = args.show_console_output();
    if console {
        println!(
            "using database file {}...",
            args.sqlitedb.display().to_string().bright_cyan()
        );
    }

    let archive_path = match &zip_args.zipfile {
        Some(path) => path.clone(),
        None => prompt_for_archive()?,
    };

    let config = ImportConfig::new(&args.sqlitedb, archive_path)
        .with_backup_mode(args.backup_mode())
        .with_progress(console && !zip_args.no_progress);
    config.validate()?;

    if let Some(backup) = backup_database(&config.database_path, config.backup_mode)? {
        if console {
            println!(
                "database file exists - created backup {}",
                backup.display().to_string().bright_yellow()
            );
        }
    }

    let stats = ArchiveImporter::new(config)?
        .run()
        .context("Import failed")?;

    generate_final_report(args.output_format, console, &stats)?;
    Ok(stats)
}

/// Ask for the archive path on stdin
fn prompt_for_archive() -> Result<PathBuf> {
    print!("{}", "zip file to import: ".bright_white());
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;

    let path = input.trim();
    if path.is_empty() {
        anyhow::bail!("No zip file given");
    }
    Ok(PathBuf::from(path))
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hydro_import={}", log_level)));

    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    // A subscriber may already be installed when running in-process
    if initialized.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

fn generate_final_report(format: OutputFormat, console: bool, stats: &ImportStats) -> Result<()> {
    info!("Generating final report");

    match format {
        OutputFormat::Human if console => generate_human_report(stats),
        OutputFormat::Human => {}
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(stats).context("Failed to serialize summary")?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn generate_human_report(stats: &ImportStats) {
    println!("\n{}", "Import Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Entries in archive:".bright_cyan(),
        stats.entries_total.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files imported:".bright_cyan(),
        stats.files_imported.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Same-day files skipped:".bright_cyan(),
        stats.files_skipped.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Rows written:".bright_cyan(),
        stats.rows_written.to_string().bright_white().bold()
    );
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
}
