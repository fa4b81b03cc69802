//! TTL-cached reference data access.
//!
//! Three read-only tables back the form selectors: the guard roster, the
//! product catalog, and the warehouse user roster. They change rarely, so
//! snapshots are cached with a long TTL (7 days by default) in a `moka`
//! cache keyed by sheet name.
//!
//! On a reload failure the layer falls back to the last snapshot it loaded
//! successfully and logs a staleness warning; only when there is no such
//! snapshot does the caller see [`ReferenceError::Unavailable`]. Schema
//! errors (a column disappeared) are never papered over with stale data -
//! they indicate the sheet itself changed shape and need an operator.

pub mod table;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use moka::future::Cache;
use thiserror::Error;
use tracing::{debug, warn};

use storewatch_core::{CatalogEntry, GuardRosterEntry, Sku, WarehouseUser};

use crate::sheets::{SheetStore, SheetsError};

use table::{TableError, parse_catalog, parse_guards, parse_warehouse_users};

/// Default snapshot lifetime: 7 days.
pub const DEFAULT_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Errors from the reference data layer.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// The table could not be loaded and no previous snapshot exists.
    #[error("reference table {table} unavailable: {source}")]
    Unavailable {
        /// Sheet name.
        table: &'static str,
        /// Underlying store failure.
        #[source]
        source: SheetsError,
    },

    /// The loaded grid does not match the expected columns.
    #[error(transparent)]
    Schema(#[from] TableError),
}

/// The three reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReferenceTable {
    Guards,
    Catalog,
    WarehouseUsers,
}

impl ReferenceTable {
    const fn sheet(self) -> &'static str {
        match self {
            Self::Guards => "VIGILANTES",
            Self::Catalog => "HFB",
            Self::WarehouseUsers => "USUARIO WH",
        }
    }
}

/// A cached table snapshot.
#[derive(Debug, Clone)]
enum Snapshot {
    Guards(Arc<Vec<GuardRosterEntry>>),
    Catalog(Arc<Vec<CatalogEntry>>),
    WarehouseUsers(Arc<Vec<WarehouseUser>>),
}

/// Read-only, TTL-cached access to the reference tables.
///
/// Cheaply cloneable; all submissions share one cache.
#[derive(Clone)]
pub struct ReferenceData<S> {
    store: S,
    cache: Cache<&'static str, Snapshot>,
    last_good: Arc<RwLock<HashMap<&'static str, Snapshot>>>,
}

impl<S: SheetStore> ReferenceData<S> {
    /// Create a reference data handle over a sheet store.
    #[must_use]
    pub fn new(store: S, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(ttl)
            .build();
        Self {
            store,
            cache,
            last_good: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Drop all cached snapshots so the next read reloads from the store.
    ///
    /// Last-known-good snapshots are kept; a failed reload after an
    /// invalidation still falls back.
    pub fn invalidate(&self) {
        self.cache.invalidate_all();
    }

    /// The full guard roster.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn guards(&self) -> Result<Arc<Vec<GuardRosterEntry>>, ReferenceError> {
        match self.snapshot(ReferenceTable::Guards).await? {
            Snapshot::Guards(guards) => Ok(guards),
            _ => unreachable!("guards key always holds a guards snapshot"),
        }
    }

    /// Guard roster entries for one store.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn guards_for_store(
        &self,
        store_id: i64,
    ) -> Result<Vec<GuardRosterEntry>, ReferenceError> {
        let guards = self.guards().await?;
        Ok(guards
            .iter()
            .filter(|g| g.store_id == store_id)
            .cloned()
            .collect())
    }

    /// The full product catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn catalog(&self) -> Result<Arc<Vec<CatalogEntry>>, ReferenceError> {
        match self.snapshot(ReferenceTable::Catalog).await? {
            Snapshot::Catalog(catalog) => Ok(catalog),
            _ => unreachable!("catalog key always holds a catalog snapshot"),
        }
    }

    /// Look up one catalog entry by normalized SKU.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn catalog_entry(&self, sku: &Sku) -> Result<Option<CatalogEntry>, ReferenceError> {
        let catalog = self.catalog().await?;
        Ok(catalog.iter().find(|e| &e.sku == sku).cloned())
    }

    /// All catalog SKUs, for populating the selector.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn catalog_skus(&self) -> Result<Vec<Sku>, ReferenceError> {
        let catalog = self.catalog().await?;
        Ok(catalog.iter().map(|e| e.sku.clone()).collect())
    }

    /// The warehouse user roster.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn warehouse_users(&self) -> Result<Arc<Vec<WarehouseUser>>, ReferenceError> {
        match self.snapshot(ReferenceTable::WarehouseUsers).await? {
            Snapshot::WarehouseUsers(users) => Ok(users),
            _ => unreachable!("users key always holds a users snapshot"),
        }
    }

    /// Look up one warehouse user by username.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError`] when the table cannot be served.
    pub async fn warehouse_user(
        &self,
        username: &str,
    ) -> Result<Option<WarehouseUser>, ReferenceError> {
        let users = self.warehouse_users().await?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn snapshot(&self, table: ReferenceTable) -> Result<Snapshot, ReferenceError> {
        let key = table.sheet();

        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        match self.load(table).await {
            Ok(snapshot) => {
                self.cache.insert(key, snapshot.clone()).await;
                self.last_good
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .insert(key, snapshot.clone());
                debug!(table = key, "reference table loaded");
                Ok(snapshot)
            }
            // Schema drift means the sheet changed shape; stale data would
            // only mask it.
            Err(err @ ReferenceError::Schema(_)) => Err(err),
            Err(err) => {
                let stale = self
                    .last_good
                    .read()
                    .unwrap_or_else(|e| e.into_inner())
                    .get(key)
                    .cloned();
                match stale {
                    Some(snapshot) => {
                        warn!(table = key, error = %err, "reference reload failed, serving last-known-good snapshot");
                        Ok(snapshot)
                    }
                    None => Err(err),
                }
            }
        }
    }

    async fn load(&self, table: ReferenceTable) -> Result<Snapshot, ReferenceError> {
        let grid = self
            .store
            .read_table(table.sheet())
            .await
            .map_err(|source| ReferenceError::Unavailable {
                table: table.sheet(),
                source,
            })?;

        let snapshot = match table {
            ReferenceTable::Guards => Snapshot::Guards(Arc::new(parse_guards(grid)?)),
            ReferenceTable::Catalog => Snapshot::Catalog(Arc::new(parse_catalog(grid)?)),
            ReferenceTable::WarehouseUsers => {
                Snapshot::WarehouseUsers(Arc::new(parse_warehouse_users(grid)?))
            }
        };
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::sheets::InMemorySheets;

    use super::*;

    fn seeded_store() -> InMemorySheets {
        InMemorySheets::new()
            .with_table(
                "VIGILANTES",
                vec![
                    vec![json!("ID_TIENDA"), json!("NOMBRE VIGILANTE")],
                    vec![json!(1), json!("Carlos Rojas")],
                    vec![json!(2), json!("Diana Mesa")],
                ],
            )
            .with_table(
                "HFB",
                vec![
                    vec![json!("SKU"), json!("ITEM"), json!("FAMILIA")],
                    vec![json!("123"), json!("BILLY Bookcase"), json!("Storage")],
                ],
            )
            .with_table(
                "USUARIO WH",
                vec![
                    vec![json!("NOMBRE"), json!("USUARIO")],
                    vec![json!("Jane Doe"), json!("jdoe1")],
                ],
            )
    }

    #[tokio::test]
    async fn test_guards_filtered_by_store() {
        let reference = ReferenceData::new(seeded_store(), DEFAULT_TTL);
        let guards = reference.guards_for_store(1).await.expect("loaded");
        assert_eq!(guards.len(), 1);
        assert_eq!(guards[0].guard_name, "Carlos Rojas");
    }

    #[tokio::test]
    async fn test_catalog_lookup_uses_normalized_sku() {
        let reference = ReferenceData::new(seeded_store(), DEFAULT_TTL);
        let entry = reference
            .catalog_entry(&Sku::normalize("123"))
            .await
            .expect("loaded")
            .expect("present");
        assert_eq!(entry.item, "BILLY Bookcase");
    }

    #[tokio::test]
    async fn test_reload_failure_serves_last_known_good() {
        let store = seeded_store();
        let reference = ReferenceData::new(store.clone(), DEFAULT_TTL);

        // Populate the cache, then force the next reload to fail.
        reference.guards().await.expect("initial load");
        reference.invalidate();
        store.set_fail_reads(true);

        let guards = reference.guards().await.expect("stale fallback");
        assert_eq!(guards.len(), 2);
    }

    #[tokio::test]
    async fn test_unavailable_without_previous_snapshot() {
        let store = seeded_store();
        store.set_fail_reads(true);
        let reference = ReferenceData::new(store, DEFAULT_TTL);

        let err = reference.guards().await.unwrap_err();
        assert!(matches!(err, ReferenceError::Unavailable { table: "VIGILANTES", .. }));
    }

    #[tokio::test]
    async fn test_schema_error_is_not_masked() {
        let store = InMemorySheets::new().with_table(
            "HFB",
            vec![vec![json!("SKU"), json!("ITEM")], vec![json!("1"), json!("X")]],
        );
        let reference = ReferenceData::new(store, DEFAULT_TTL);
        let err = reference.catalog().await.unwrap_err();
        assert!(matches!(err, ReferenceError::Schema(_)));
    }
}
