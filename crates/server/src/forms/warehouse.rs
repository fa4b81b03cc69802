//! Warehouse inventory audit form.
//!
//! Unlike the two CCTV forms this one is keyed by document (OLPN/ILPN)
//! rather than by store, and records the warehouse worker who reported the
//! issue, selected through a `"Name (username)"` label.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use storewatch_core::Sku;

use crate::lookup;
use crate::reference::ReferenceData;
use crate::sheets::SheetStore;

use super::{FormError, RequiredFields, text_cell};

/// Raw warehouse audit fields as captured by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WarehouseAuditForm {
    /// Date of the audit.
    pub date: Option<NaiveDate>,
    /// Audit process (e.g. "Auditoria DO ECOM", "Plan Enfermero").
    pub audit_process: Option<String>,
    /// Issue found (e.g. "SOBRANTE", "AVERIA").
    pub issue_type: Option<String>,
    /// Document type, OLPN or ILPN.
    pub document_type: Option<String>,
    /// Document number the issue was found on.
    pub document_number: Option<String>,
    /// Product SKU, normalized before lookup.
    pub sku: Option<String>,
    /// Auditor name. Free text: the auditor list accepts new names.
    pub auditor_name: Option<String>,
    /// Warehouse worker selector label, `"Name (username)"`.
    pub worker_label: Option<String>,
    /// Free-text description of the issue.
    pub observations: Option<String>,
    /// Issue category (e.g. "Print", "Faltante").
    pub issue_category: Option<String>,
    /// Warehouse area.
    pub area: Option<String>,
    /// Units affected.
    pub quantity: Option<u32>,
    /// Unit cost.
    pub unit_cost: Option<Decimal>,
}

#[derive(Debug)]
struct Validated<'a> {
    date: NaiveDate,
    document_number: &'a str,
    sku: &'a str,
    worker_label: &'a str,
    quantity: u32,
    unit_cost: Decimal,
}

impl WarehouseAuditForm {
    fn validate(&self) -> Result<Validated<'_>, FormError> {
        let mut required = RequiredFields::new();
        let date = required.value("date", self.date);
        let document_number = required.text("document_number", self.document_number.as_deref());
        let sku = required.text("sku", self.sku.as_deref());
        let worker_label = required.text("worker_label", self.worker_label.as_deref());
        let quantity = required.value("quantity", self.quantity);
        let unit_cost = required.value("unit_cost", self.unit_cost);
        required.check()?;

        match (date, document_number, sku, worker_label, quantity, unit_cost) {
            (
                Some(date),
                Some(document_number),
                Some(sku),
                Some(worker_label),
                Some(quantity),
                Some(unit_cost),
            ) => Ok(Validated {
                date,
                document_number,
                sku,
                worker_label,
                quantity,
                unit_cost,
            }),
            _ => unreachable!("check() verified all required fields are present"),
        }
    }
}

/// Validate, derive, and assemble a warehouse audit row in schema order.
pub(super) async fn assemble<S: SheetStore>(
    reference: &ReferenceData<S>,
    form: &WarehouseAuditForm,
) -> Result<Vec<Value>, FormError> {
    let v = form.validate()?;

    let sku = Sku::normalize(v.sku);
    if reference.catalog_entry(&sku).await?.is_none() {
        return Err(FormError::Derivation {
            field: "sku",
            message: format!("SKU {sku} not found in catalog"),
        });
    }

    let username = lookup::parse_username_from_label(v.worker_label)
        .map_err(|e| FormError::derivation("worker_label", &e))?;
    let worker = reference
        .warehouse_user(&username)
        .await?
        .ok_or_else(|| FormError::Derivation {
            field: "worker_label",
            message: format!("no warehouse user with username {username:?}"),
        })?;

    let iso_week = lookup::iso_week_number(v.date);
    let total = Decimal::from(v.quantity) * v.unit_cost;

    Ok(vec![
        json!(v.date.to_string()),
        text_cell(form.audit_process.as_ref()),
        text_cell(form.issue_type.as_ref()),
        text_cell(form.document_type.as_ref()),
        json!(v.document_number),
        json!(sku.as_str()),
        text_cell(form.auditor_name.as_ref()),
        json!(worker.name),
        json!(worker.username),
        text_cell(form.observations.as_ref()),
        text_cell(form.issue_category.as_ref()),
        text_cell(form.area.as_ref()),
        json!(v.quantity),
        json!(v.unit_cost),
        json!(total),
        json!(iso_week),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_lists_missing_fields() {
        let form = WarehouseAuditForm {
            date: NaiveDate::from_ymd_opt(2026, 8, 26),
            sku: Some("40576219".to_owned()),
            ..WarehouseAuditForm::default()
        };
        let err = form.validate().unwrap_err();
        match err {
            FormError::Validation { missing } => {
                assert_eq!(
                    missing,
                    vec!["document_number", "worker_label", "quantity", "unit_cost"]
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
