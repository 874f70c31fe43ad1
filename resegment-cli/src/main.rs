// resegment-cli/src/main.rs
//
// Entry point for the `resegment` binary: parses arguments, installs the
// logger, dispatches to a subcommand and turns its result into an exit code.

use clap::Parser;
use log::{LevelFilter, error, info};
use resegment_cli::output::EXIT_FATAL;
use resegment_cli::{Cli, Commands, logging, run_pipeline, run_rename};

use std::process;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match logging::init_logging(level, cli.log_dir.as_deref(), cli.command.wants_json()) {
        Ok(Some(path)) => info!("Log file: {}", path.display()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(EXIT_FATAL);
        }
    }

    let result = match cli.command {
        Commands::Run(args) => run_pipeline(args),
        Commands::Rename(args) => run_rename(args),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("{e}");
            process::exit(EXIT_FATAL);
        }
    }
}
