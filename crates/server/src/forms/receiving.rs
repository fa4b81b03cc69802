//! Warehouse receiving audit form.
//!
//! The smallest of the three forms: who audited the receiving dock, where
//! and when. Everything else on the row is derived.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use storewatch_core::Store;

use crate::lookup;
use crate::reference::ReferenceData;
use crate::sheets::SheetStore;

use super::{FormError, RequiredFields};

/// Raw receiving audit fields as captured by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceivingAuditForm {
    /// Store display name.
    pub store: Option<String>,
    /// Date of the audit.
    pub date: Option<NaiveDate>,
    /// Time of the audit.
    pub time: Option<NaiveTime>,
    /// Guard on duty; must belong to the selected store's roster.
    pub guard_name: Option<String>,
}

#[derive(Debug)]
struct Validated<'a> {
    store_name: &'a str,
    date: NaiveDate,
    time: NaiveTime,
    guard_name: &'a str,
}

impl ReceivingAuditForm {
    fn validate(&self) -> Result<Validated<'_>, FormError> {
        let mut required = RequiredFields::new();
        let store_name = required.text("store", self.store.as_deref());
        let date = required.value("date", self.date);
        let time = required.value("time", self.time);
        let guard_name = required.text("guard_name", self.guard_name.as_deref());
        required.check()?;

        match (store_name, date, time, guard_name) {
            (Some(store_name), Some(date), Some(time), Some(guard_name)) => Ok(Validated {
                store_name,
                date,
                time,
                guard_name,
            }),
            _ => unreachable!("check() verified all required fields are present"),
        }
    }
}

/// Validate, derive, and assemble a receiving audit row in schema order.
pub(super) async fn assemble<S: SheetStore>(
    reference: &ReferenceData<S>,
    form: &ReceivingAuditForm,
    now: DateTime<Utc>,
) -> Result<Vec<Value>, FormError> {
    let v = form.validate()?;

    let store = Store::from_name(v.store_name).map_err(|err| FormError::Derivation {
        field: "store",
        message: err.to_string(),
    })?;

    let roster = reference.guards_for_store(store.id()).await?;
    if !roster.iter().any(|g| g.guard_name == v.guard_name) {
        return Err(FormError::Derivation {
            field: "guard_name",
            message: format!("{} is not on the roster for {}", v.guard_name, store),
        });
    }

    let month = lookup::month_name(v.date.month())
        .map_err(|e| FormError::derivation("date", &e))?;
    let weekday = lookup::weekday_name(v.date.weekday().num_days_from_monday())
        .map_err(|e| FormError::derivation("date", &e))?;
    let hour_range = lookup::hour_range_label(v.time.hour())
        .map_err(|e| FormError::derivation("time", &e))?;

    Ok(vec![
        json!(lookup::submission_timestamp(now)),
        json!(store.name()),
        json!(v.date.to_string()),
        json!(v.time.format("%H:%M:%S").to_string()),
        json!(v.guard_name),
        json!(month),
        json!(weekday),
        json!(hour_range),
    ])
}
