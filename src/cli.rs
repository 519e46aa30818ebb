//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `climock`.
#[derive(Debug, Parser)]
#[command(name = "climock", version, about = "Inspect and maintain HTTP fixture files")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Work with recorded fixture files.
    #[command(subcommand)]
    Fixture(FixtureCommand),
}

/// Fixture maintenance subcommands.
#[derive(Debug, Subcommand)]
pub enum FixtureCommand {
    /// List every scope with its recorded calls.
    Scopes {
        /// Fixture file to read.
        path: PathBuf,
    },
    /// Print one scope as YAML.
    Show {
        /// Fixture file to read.
        path: PathBuf,
        /// Zero-based test index.
        index: usize,
    },
    /// Relax request-body matching for mutating calls in place.
    Normalize {
        /// Fixture file to rewrite.
        path: PathBuf,
        /// Report what would change without writing.
        #[arg(long)]
        dry_run: bool,
    },
}
