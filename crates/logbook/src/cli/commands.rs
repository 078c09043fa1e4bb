//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Month to render (YYYY-MM); defaults to the first month of the range
    #[arg(short, long)]
    pub month: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Months command arguments.
#[derive(Debug, Args)]
pub struct MonthsCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Day to show (YYYY-MM-DD)
    pub date: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Day to record the duty on (YYYY-MM-DD)
    pub date: String,

    /// Duty text; remaining words are joined with spaces
    #[arg(trailing_var_arg = true, num_args = 0..)]
    pub text: Vec<String>,
}

impl AddCommand {
    /// The duty text as one string.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.join(" ")
    }
}

/// Remove command arguments.
#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Day to edit (YYYY-MM-DD)
    pub date: String,

    /// Position of the duty, as shown by `list`
    pub index: usize,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
