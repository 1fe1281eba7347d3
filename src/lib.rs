// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]

//! # warehouse-transfer
//!
//! A scheduled task that queries an analytical warehouse and uploads the
//! result as a comma-joined text artifact to an object-storage bucket.
//! Scheduling and retries live in the external orchestrator; the destination
//! bucket and key prefix live in an external variable store.
//!
//! ## Flow
//!
//! ```text
//! variables ──▶ destination (bucket + key prefix)
//!                    │
//! warehouse ──▶ fetch all rows ──▶ local CSV artifact ──▶ PUT object
//!                    │                                        │
//!                  close on every exit path          full overwrite, fixed key
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use warehouse_transfer::config::TransferProfile;
//! use warehouse_transfer::task::TransferTask;
//! use warehouse_transfer::vars::VariableStore;
//!
//! #[tokio::main]
//! async fn main() -> warehouse_transfer::Result<()> {
//!     let profile = TransferProfile::from_file("profiles/books_export.yaml")?;
//!     let vars = VariableStore::from_file("variables.json")?;
//!     let report = TransferTask::new(profile, vars).run(None).await?;
//!     println!("uploaded {} rows to {}", report.rows, report.object_path);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// External variable store
pub mod vars;

/// Transfer profile configuration
pub mod config;

/// Row and cell types
pub mod row;

/// Warehouse access
pub mod warehouse;

/// Local CSV artifact
pub mod artifact;

/// Object storage destinations
pub mod output;

/// The transfer task
pub mod task;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use task::{TransferReport, TransferTask};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
