//! Spreadsheet store contract.
//!
//! The whole external surface of the hosted spreadsheet is two operations:
//! read a table as a grid of values (header row first) and append exactly
//! one row to a table. [`SheetStore`] captures that contract; the Google
//! Sheets implementation lives in [`client`], and [`memory`] provides an
//! in-memory implementation for tests and local development.

pub mod client;
pub mod memory;

pub use client::SheetsClient;
pub use memory::InMemorySheets;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when talking to the spreadsheet store.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error response.
    #[error("Sheets API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the Sheets API.
    #[error("rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// The named table does not exist in the spreadsheet.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),
}

/// A grid of cell values as returned by the store, header row first.
pub type ValueGrid = Vec<Vec<Value>>;

/// The append-only spreadsheet store.
///
/// Implementations must treat `append_row` as atomic: the row is either
/// fully appended or not at all. Concurrent appends from independent
/// processes are serialized by the store itself.
pub trait SheetStore: Clone + Send + Sync + 'static {
    /// Read a full table, header row included.
    fn read_table(
        &self,
        table: &str,
    ) -> impl Future<Output = Result<ValueGrid, SheetsError>> + Send;

    /// Append exactly one row to a table.
    fn append_row(
        &self,
        table: &str,
        row: Vec<Value>,
    ) -> impl Future<Output = Result<(), SheetsError>> + Send;
}
