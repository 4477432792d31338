//! Command-line argument definitions for the Wallsheet CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. `generate` writes a sheet from a JSON request and
//! `validate` prints the derived wall profile. Configuration file selection
//! and logging verbosity apply to both.

use clap::{Parser, Subcommand};

use wallsheet::config::OutputFormat;

/// Command-line arguments for the Wallsheet tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a technical sheet from a JSON request
    Generate(GenerateArgs),

    /// Print the wall profile derived from a JSON request
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug)]
pub struct GenerateArgs {
    /// Path to the JSON request
    #[arg(help = "Path to the input request")]
    pub input: String,

    /// Output format (dxf, svg); overrides the configuration
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Directory the sheet is written to; overrides the configuration
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Open the written sheet in the configured viewer
    #[arg(long)]
    pub open: bool,

    /// Viewer program used with --open; overrides the configuration
    #[arg(long, requires = "open")]
    pub viewer: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON request
    #[arg(help = "Path to the input request")]
    pub input: String,

    /// Write the report to this file instead of standard output
    #[arg(short, long)]
    pub output: Option<String>,
}
