//! Typed reference-table records.
//!
//! These are the shapes the reference data access layer produces after
//! converting the loosely-typed spreadsheet grids. Column names live with
//! the deserialization code in the server crate; only the typed results
//! are shared here.

use serde::{Deserialize, Serialize};

use crate::types::sku::Sku;

/// One entry of the guard roster (`VIGILANTES` sheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardRosterEntry {
    /// Store the guard is assigned to.
    pub store_id: i64,
    /// Guard display name, as written into submission rows.
    pub guard_name: String,
}

/// One entry of the product catalog (`HFB` sheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Normalized 8-digit SKU.
    pub sku: Sku,
    /// Product description.
    pub item: String,
    /// Product family (HFB grouping).
    pub family: String,
}

/// One entry of the warehouse user roster (`USUARIO WH` sheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseUser {
    /// Full display name.
    pub name: String,
    /// Warehouse system username.
    pub username: String,
}

impl WarehouseUser {
    /// The composite selector label, `"Name (username)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.username)
    }
}
