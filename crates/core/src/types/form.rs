//! Form types and their row schemas.
//!
//! Each form type appends to one target sheet with a fixed column order.
//! The column order is a bit-exact contract with the spreadsheet consumers
//! (reports are built on column positions), so the schemas live here as
//! constants rather than being derived from anything.

use serde::{Deserialize, Serialize};

/// A fixed, ordered row schema for one form type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSchema {
    /// Sheet the form appends to.
    pub target_sheet: &'static str,
    /// Column names in append order.
    pub columns: &'static [&'static str],
}

impl RowSchema {
    /// Number of columns a written row must have.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the schema has no columns. Never the case for the three
    /// form schemas; present for completeness.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// CCTV recovery log schema.
pub const RECOVERY_SCHEMA: RowSchema = RowSchema {
    target_sheet: "RECUPERACIONES",
    columns: &[
        "timestamp",
        "store",
        "date",
        "time",
        "guardName",
        "floor",
        "location",
        "requestingArea",
        "coworkerName",
        "posNumber",
        "sku",
        "family",
        "product",
        "quantity",
        "unitValue",
        "total",
        "description",
        "monthName",
        "weekdayName",
        "hourRange",
    ],
};

/// Warehouse receiving audit schema.
pub const RECEIVING_AUDIT_SCHEMA: RowSchema = RowSchema {
    target_sheet: "AUDITORIA BODEGA",
    columns: &[
        "timestamp",
        "store",
        "date",
        "time",
        "guardName",
        "monthName",
        "weekdayName",
        "hourRange",
    ],
};

/// Warehouse inventory audit schema.
pub const WAREHOUSE_AUDIT_SCHEMA: RowSchema = RowSchema {
    target_sheet: "WAREHOUSE",
    columns: &[
        "date",
        "auditProcess",
        "issueType",
        "documentType",
        "documentNumber",
        "sku",
        "auditorName",
        "workerName",
        "workerUsername",
        "observations",
        "issueCategory",
        "area",
        "quantity",
        "unitCost",
        "total",
        "isoWeekNumber",
    ],
};

/// The three data-entry forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    /// CCTV recovery log.
    Recovery,
    /// Warehouse receiving audit.
    ReceivingAudit,
    /// Warehouse inventory audit.
    WarehouseAudit,
}

impl FormType {
    /// The row schema this form writes.
    #[must_use]
    pub const fn schema(self) -> RowSchema {
        match self {
            Self::Recovery => RECOVERY_SCHEMA,
            Self::ReceivingAudit => RECEIVING_AUDIT_SCHEMA,
            Self::WarehouseAudit => WAREHOUSE_AUDIT_SCHEMA,
        }
    }

    /// The sheet this form appends to.
    #[must_use]
    pub const fn target_sheet(self) -> &'static str {
        self.schema().target_sheet
    }
}
