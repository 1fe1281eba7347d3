//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Warehouse transfer task CLI
#[derive(Parser, Debug)]
#[command(name = "warehouse-transfer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Transfer profile file (YAML)
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Variables file (JSON or YAML)
    #[arg(long, global = true)]
    pub variables: Option<PathBuf>,

    /// Inline variables JSON
    #[arg(long, global = true)]
    pub variables_json: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute the transfer once
    Run {
        /// Destination override (local path or URL)
        /// Supports: /path, gs://bucket/path, s3://bucket/path, az://container/path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Test the warehouse connection
    Check,

    /// Validate the transfer profile
    Validate,
}
