// src/cli/args.rs
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tfalert", version)]
#[command(about = "Edit New Relic NRQL alert definitions in Terraform auto.tfvars files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List stacks that carry an alert definitions file
    Stacks {
        /// Walk the whole data directory instead of the conventional stacks path
        #[arg(long)]
        walk: bool,
    },
    /// Show the alerts defined for a stack or file
    Show {
        /// Stack name, or a path to a tfvars file
        target: String,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
        /// Print every field of every alert
        #[arg(long)]
        full: bool,
    },
    /// Append a new alert from the default template
    Add {
        target: String,
        /// Name for the new alert
        #[arg(long)]
        name: Option<String>,
        /// Field assignments applied to the new alert
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Commit the file after saving
        #[arg(long)]
        commit: bool,
    },
    /// Edit one alert by index
    Edit {
        target: String,
        /// Index of the alert (as printed by show)
        index: usize,
        /// Field assignments to merge into the alert
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
        /// Print the changelog without saving
        #[arg(long)]
        dry_run: bool,
        /// Commit the file after saving
        #[arg(long)]
        commit: bool,
    },
    /// Delete one alert by index
    Delete {
        target: String,
        index: usize,
        /// Commit the file after saving
        #[arg(long)]
        commit: bool,
    },
    /// Validate alerts without writing
    Check {
        target: String,
        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-render the alert block in canonical form
    Fmt {
        target: String,
        /// Commit the file after saving
        #[arg(long)]
        commit: bool,
    },
    /// Get or set configuration values
    Config {
        /// Settings key; omit to print all settings
        key: Option<String>,
        /// New value; omit to print the current value
        value: Option<String>,
    },
}
