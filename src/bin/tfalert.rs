// src/bin/tfalert.rs
use clap::Parser;
use colored::Colorize;
use tfalert_core::cli::{self, Cli};
use tfalert_core::exit::TfAlertExit;

fn main() -> TfAlertExit {
    let cli = Cli::parse();

    let result = if let Some(command) = cli.command {
        cli::dispatch::execute(command)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(TfAlertExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            TfAlertExit::Error
        }
    }
}
