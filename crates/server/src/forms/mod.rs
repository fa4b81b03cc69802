//! The form submission pipeline.
//!
//! One submission attempt runs Collecting -> Validating -> Deriving ->
//! Writing and ends Succeeded or Failed. There is no retry transition: a
//! failed attempt surfaces one human-readable error and the operator
//! resubmits from scratch. Nothing is ever partially written - the single
//! `append_row` call happens only after validation and derivation both
//! passed, and identical submissions append independent rows (each one is
//! a distinct event, deduplication is deliberately absent).
//!
//! Each form type supplies a required-field set, a derivation step over the
//! lookup resolver and reference data, and a fixed row schema (see
//! `storewatch_core::form`). Dispatch is a tagged enum resolved at compile
//! time.

pub mod receiving;
pub mod recovery;
pub mod warehouse;

pub use receiving::ReceivingAuditForm;
pub use recovery::RecoveryForm;
pub use warehouse::WarehouseAuditForm;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use storewatch_core::FormType;

use crate::lookup::LookupError;
use crate::reference::{ReferenceData, ReferenceError};
use crate::sheets::{SheetStore, SheetsError};

/// Errors from a submission attempt.
#[derive(Debug, Error)]
pub enum FormError {
    /// Required fields are missing; nothing was written.
    #[error("missing required fields: {}", missing.join(", "))]
    Validation {
        /// Every missing field, reported at once.
        missing: Vec<String>,
    },

    /// A lookup could not be resolved; nothing was written.
    #[error("could not derive {field}: {message}")]
    Derivation {
        /// The field whose derivation failed.
        field: &'static str,
        /// What went wrong, in operator terms.
        message: String,
    },

    /// Reference data could not be served.
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    /// The append itself failed; the operator must resubmit.
    #[error("append failed: {0}")]
    Write(#[source] SheetsError),
}

impl FormError {
    pub(crate) fn derivation(field: &'static str, err: &LookupError) -> Self {
        Self::Derivation {
            field,
            message: err.to_string(),
        }
    }
}

/// A form submission as captured by the presentation layer.
///
/// The `form` tag selects the variant, so the frontend posts e.g.
/// `{"form": "recovery", "store": "IKEA NQS", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Submission {
    /// CCTV recovery log entry.
    Recovery(RecoveryForm),
    /// Warehouse receiving audit entry.
    ReceivingAudit(ReceivingAuditForm),
    /// Warehouse inventory audit entry.
    WarehouseAudit(WarehouseAuditForm),
}

impl Submission {
    /// Which form this submission belongs to.
    #[must_use]
    pub const fn form_type(&self) -> FormType {
        match self {
            Self::Recovery(_) => FormType::Recovery,
            Self::ReceivingAudit(_) => FormType::ReceivingAudit,
            Self::WarehouseAudit(_) => FormType::WarehouseAudit,
        }
    }
}

/// The row written by a successful submission, returned for confirmation
/// display.
#[derive(Debug, Clone, Serialize)]
pub struct SubmittedRow {
    /// Form that produced the row.
    pub form: FormType,
    /// Sheet the row was appended to.
    pub sheet: &'static str,
    /// Column names, in the order the values were written.
    pub columns: &'static [&'static str],
    /// Cell values, in schema order.
    pub values: Vec<Value>,
}

/// Run the full pipeline for one submission at the current instant.
///
/// # Errors
///
/// Returns [`FormError`] from any stage; nothing is written unless every
/// stage before the append succeeded.
pub async fn submit<S: SheetStore>(
    reference: &ReferenceData<S>,
    sheets: &S,
    submission: &Submission,
) -> Result<SubmittedRow, FormError> {
    submit_at(reference, sheets, submission, Utc::now()).await
}

/// Run the full pipeline with an explicit submission instant.
///
/// # Errors
///
/// Returns [`FormError`] from any stage.
pub async fn submit_at<S: SheetStore>(
    reference: &ReferenceData<S>,
    sheets: &S,
    submission: &Submission,
    now: DateTime<Utc>,
) -> Result<SubmittedRow, FormError> {
    // Validating: report every missing field in one pass, then deriving.
    let values = match submission {
        Submission::Recovery(form) => recovery::assemble(reference, form, now).await?,
        Submission::ReceivingAudit(form) => receiving::assemble(reference, form, now).await?,
        Submission::WarehouseAudit(form) => warehouse::assemble(reference, form).await?,
    };

    let form = submission.form_type();
    let schema = form.schema();
    debug_assert_eq!(values.len(), schema.len(), "row must match its schema");

    // Writing: exactly one append to exactly one sheet.
    sheets
        .append_row(schema.target_sheet, values.clone())
        .await
        .map_err(FormError::Write)?;

    info!(form = ?form, sheet = schema.target_sheet, "submission row appended");

    Ok(SubmittedRow {
        form,
        sheet: schema.target_sheet,
        columns: schema.columns,
        values,
    })
}

/// Track missing required fields during validation.
#[derive(Debug, Default)]
pub(crate) struct RequiredFields {
    missing: Vec<String>,
}

impl RequiredFields {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty text field.
    pub(crate) fn text<'a>(&mut self, name: &str, value: Option<&'a str>) -> Option<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Some(v),
            _ => {
                self.missing.push(name.to_owned());
                None
            }
        }
    }

    /// Require any typed field to be present.
    pub(crate) fn value<T: Copy>(&mut self, name: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.missing.push(name.to_owned());
        }
        value
    }

    /// Finish validation, failing if anything was missing.
    pub(crate) fn check(self) -> Result<(), FormError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation {
                missing: self.missing,
            })
        }
    }
}

/// An empty-able optional text cell: trimmed value or blank.
pub(crate) fn text_cell(value: Option<&String>) -> Value {
    Value::String(value.map(|s| s.trim().to_owned()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields_reports_all_missing_at_once() {
        let mut required = RequiredFields::new();
        required.text("store", None);
        required.text("guard_name", Some("  "));
        required.value::<u32>("quantity", None);
        let err = required.check().unwrap_err();
        match err {
            FormError::Validation { missing } => {
                assert_eq!(missing, vec!["store", "guard_name", "quantity"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_fields_passes_when_complete() {
        let mut required = RequiredFields::new();
        let store = required.text("store", Some("IKEA NQS"));
        assert_eq!(store, Some("IKEA NQS"));
        assert!(required.check().is_ok());
    }

    #[test]
    fn test_submission_tagged_deserialization() {
        let raw = serde_json::json!({
            "form": "recovery",
            "store": "IKEA NQS",
            "quantity": 2,
        });
        let submission: Submission = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(submission.form_type(), FormType::Recovery);
    }
}
