//! In-memory sheet store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{SheetStore, SheetsError, ValueGrid};

/// An in-memory [`SheetStore`].
///
/// Tables are plain value grids keyed by name. Reads can be forced to fail
/// to exercise the reference-data fallback paths, and appends can be forced
/// to fail to exercise write-failure handling.
#[derive(Clone, Default)]
pub struct InMemorySheets {
    inner: Arc<InMemoryInner>,
}

#[derive(Default)]
struct InMemoryInner {
    tables: Mutex<HashMap<String, ValueGrid>>,
    fail_reads: AtomicBool,
    fail_appends: AtomicBool,
}

impl InMemorySheets {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table, replacing any existing one with the same name.
    #[must_use]
    pub fn with_table(self, name: &str, grid: ValueGrid) -> Self {
        self.set_table(name, grid);
        self
    }

    /// Replace a table's contents.
    pub fn set_table(&self, name: &str, grid: ValueGrid) {
        let mut tables = self.inner.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.insert(name.to_owned(), grid);
    }

    /// Snapshot of a table's rows, header included.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<ValueGrid> {
        let tables = self.inner.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.get(name).cloned()
    }

    /// Number of rows appended to a table since it was last set.
    ///
    /// Tables created implicitly by an append start empty, so for those this
    /// is simply the number of append calls.
    #[must_use]
    pub fn appended_count(&self, name: &str) -> usize {
        self.table(name).map_or(0, |grid| grid.len())
    }

    /// Make all subsequent reads fail, simulating an unreachable store.
    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make all subsequent appends fail.
    pub fn set_fail_appends(&self, fail: bool) {
        self.inner.fail_appends.store(fail, Ordering::SeqCst);
    }

    fn unreachable_error() -> SheetsError {
        SheetsError::Api {
            status: 503,
            message: "store unreachable".to_owned(),
        }
    }
}

impl SheetStore for InMemorySheets {
    async fn read_table(&self, table: &str) -> Result<ValueGrid, SheetsError> {
        if self.inner.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        self.table(table)
            .ok_or_else(|| SheetsError::TableNotFound(table.to_owned()))
    }

    async fn append_row(&self, table: &str, row: Vec<Value>) -> Result<(), SheetsError> {
        if self.inner.fail_appends.load(Ordering::SeqCst) {
            return Err(Self::unreachable_error());
        }
        let mut tables = self.inner.tables.lock().unwrap_or_else(|e| e.into_inner());
        tables.entry(table.to_owned()).or_default().push(row);
        Ok(())
    }
}
