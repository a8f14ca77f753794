// src/cli/dispatch.rs
//! Command dispatch, kept out of the binary to keep main small.

use super::args::Commands;
use super::handlers;
use crate::exit::TfAlertExit;
use anyhow::Result;

/// Executes the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(command: Commands) -> Result<TfAlertExit> {
    match command {
        Commands::Stacks { walk } => handlers::handle_stacks(walk),
        Commands::Show { target, json, full } => handlers::handle_show(&target, json, full),
        Commands::Check { target, json } => handlers::handle_check(&target, json),

        Commands::Add {
            target,
            name,
            set,
            commit,
        } => handlers::handle_add(&target, name.as_deref(), &set, commit),
        Commands::Edit {
            target,
            index,
            set,
            dry_run,
            commit,
        } => handlers::handle_edit(&target, index, &set, dry_run, commit),
        Commands::Delete {
            target,
            index,
            commit,
        } => handlers::handle_delete(&target, index, commit),
        Commands::Fmt { target, commit } => handlers::handle_fmt(&target, commit),

        Commands::Config { key, value } => handlers::handle_config(key.as_deref(), value.as_deref()),
    }
}
