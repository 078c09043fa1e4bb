//! Command-line interface for logbook.
//!
//! This module provides the CLI structure for the `logbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    AddCommand, ConfigCommand, ListCommand, MonthsCommand, OutputFormat, RemoveCommand,
    ShowCommand, StatusCommand,
};

/// logbook - Record what you did, day by day
///
/// Browse a fixed range of months and keep a list of duties for every day
/// in it.
#[derive(Debug, Parser)]
#[command(name = "logbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a month with its days and duties
    Show(ShowCommand),

    /// List the months in range
    Months(MonthsCommand),

    /// Show the duties recorded for a day
    List(ListCommand),

    /// Record a duty for a day
    Add(AddCommand),

    /// Delete a duty by position
    #[command(alias = "rm")]
    Remove(RemoveCommand),

    /// Edit interactively, one command per line
    Session,

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
