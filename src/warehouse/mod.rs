//! Warehouse access
//!
//! The warehouse is reached through DuckDB, which attaches PostgreSQL,
//! MySQL, and SQLite databases via extensions and speaks to its own files
//! natively. The task itself depends only on the `RowSource` trait.

mod engine;

pub use engine::WarehouseEngine;

use crate::error::Result;
use crate::row::Row;

/// A source of query result rows
///
/// The transfer task drives this seam: one query, all rows fetched into
/// memory at once, and a `close` that must run on every exit path.
pub trait RowSource {
    /// Execute a query and fetch every row
    fn fetch_all(&mut self, query: &str) -> Result<Vec<Row>>;

    /// Release the underlying connection
    ///
    /// Idempotent; the task calls this on success and on failure.
    fn close(&mut self);
}
