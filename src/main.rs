use clap::Parser;
use hydro_import::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(_stats) => {
            // Success - the summary has already been reported by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Hydro Import - Groundwater and Rainfall Archive Importer");
    println!("========================================================");
    println!();
    println!("Import zip archives of groundwater level and precipitation CSV files");
    println!("into a SQLite database with one column per measurement station.");
    println!();
    println!("USAGE:");
    println!("    hydro-import --sqlitedb <PATH> <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    zipimport   Import a downloaded zip archive into the database");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Import into a fresh database (an existing one is moved to .bak):");
    println!("    hydro-import --sqlitedb hydro.sqlite zipimport --zipfile download.zip");
    println!();
    println!("    # Add a newer download to the existing database:");
    println!("    hydro-import --sqlitedb hydro.sqlite --append zipimport --zipfile latest.zip");
    println!();
    println!("For detailed help on any command, use:");
    println!("    hydro-import <COMMAND> --help");
}
