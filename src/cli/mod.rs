//! CLI module
//!
//! Command-line interface for the transfer task.
//!
//! # Commands
//!
//! - `run` - Execute the transfer once
//! - `check` - Test the warehouse connection
//! - `validate` - Validate the transfer profile

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
