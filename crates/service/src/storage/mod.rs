//! Storage abstractions for service layer
//!
//! `TableStorage` is the seam the ledger talks to; `FlatFileTable` is the
//! newline-delimited, comma-separated implementation used in production.

pub mod flat_file;

use async_trait::async_trait;

use crate::errors::ServiceError;

pub use flat_file::FlatFileTable;

/// One persisted table of records, kept in insertion order.
#[async_trait]
pub trait TableStorage<R: Send + Sync + 'static>: Send + Sync {
    /// Append one record at the end of the table.
    async fn append(&self, record: &R) -> Result<(), ServiceError>;
    /// Read every record in table order.
    async fn read_all(&self) -> Result<Vec<R>, ServiceError>;
    /// Replace the whole table with `records`, in order.
    async fn rewrite(&self, records: &[R]) -> Result<(), ServiceError>;
}
