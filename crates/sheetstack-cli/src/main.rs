//! sheetstack - consolidate sprite animation sheets into one packed sheet.

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use sheetstack_cli::cli_args::{Cli, Commands};
use sheetstack_cli::commands::{self, Mode};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Merge { args } => commands::run(Mode::Merge, args),
        Commands::Overlay { args } => commands::run(Mode::Overlay, args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
