//! Reference data route handlers.
//!
//! These populate the form selectors: stores, the guard roster for the
//! selected store, catalog lookups while the operator types a SKU, and the
//! warehouse user labels.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use storewatch_core::{CatalogEntry, GuardRosterEntry, Sku, Store, WarehouseUser};

use crate::error::{AppError, Result};
use crate::sheets::SheetStore;
use crate::state::AppState;

/// One store as shown in the selector.
#[derive(Debug, Serialize)]
pub struct StoreOption {
    pub id: i64,
    pub name: &'static str,
}

/// The fixed store list.
pub async fn stores() -> Json<Vec<StoreOption>> {
    Json(
        Store::ALL
            .into_iter()
            .map(|store| StoreOption {
                id: store.id(),
                name: store.name(),
            })
            .collect(),
    )
}

/// Guard roster for one store.
pub async fn guards<S: SheetStore>(
    State(state): State<AppState<S>>,
    Path(store_id): Path<i64>,
) -> Result<Json<Vec<GuardRosterEntry>>> {
    if !Store::ALL.iter().any(|s| s.id() == store_id) {
        return Err(AppError::NotFound(format!("store {store_id}")));
    }
    let guards = state.reference().guards_for_store(store_id).await?;
    Ok(Json(guards))
}

/// All catalog SKUs, for populating the selector.
pub async fn skus<S: SheetStore>(State(state): State<AppState<S>>) -> Result<Json<Vec<Sku>>> {
    let skus = state.reference().catalog_skus().await?;
    Ok(Json(skus))
}

/// Product and family lookup by SKU, normalized before the search.
pub async fn catalog<S: SheetStore>(
    State(state): State<AppState<S>>,
    Path(sku): Path<String>,
) -> Result<Json<CatalogEntry>> {
    let sku = Sku::normalize(&sku);
    let entry = state
        .reference()
        .catalog_entry(&sku)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("SKU {sku}")))?;
    Ok(Json(entry))
}

/// Warehouse user selector labels.
pub async fn users<S: SheetStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<String>>> {
    let users = state.reference().warehouse_users().await?;
    Ok(Json(users.iter().map(WarehouseUser::label).collect()))
}

/// Drop cached reference snapshots so the next read reloads.
pub async fn refresh<S: SheetStore>(State(state): State<AppState<S>>) -> StatusCode {
    state.reference().invalidate();
    StatusCode::NO_CONTENT
}
