//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::RegisterConfig;
use crate::reference::ReferenceData;
use crate::sheets::SheetStore;

/// Application state shared across all handlers.
///
/// This is the explicit session context: configuration, the sheet store,
/// and the cached reference tables, threaded into the pipeline instead of
/// living as ambient process state. Cheaply cloneable via `Arc`. Generic
/// over the sheet store so tests can run against the in-memory one.
#[derive(Clone)]
pub struct AppState<S: SheetStore> {
    inner: Arc<AppStateInner<S>>,
}

struct AppStateInner<S: SheetStore> {
    config: RegisterConfig,
    sheets: S,
    reference: ReferenceData<S>,
}

impl<S: SheetStore> AppState<S> {
    /// Create a new application state over a sheet store.
    #[must_use]
    pub fn new(config: RegisterConfig, sheets: S) -> Self {
        let reference = ReferenceData::new(sheets.clone(), config.reference_ttl);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                sheets,
                reference,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &RegisterConfig {
        &self.inner.config
    }

    /// Get a reference to the sheet store.
    #[must_use]
    pub fn sheets(&self) -> &S {
        &self.inner.sheets
    }

    /// Get a reference to the cached reference data.
    #[must_use]
    pub fn reference(&self) -> &ReferenceData<S> {
        &self.inner.reference
    }
}
