//! CCTV recovery log form.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use storewatch_core::{Sku, Store};

use crate::lookup;
use crate::reference::ReferenceData;
use crate::sheets::SheetStore;

use super::{FormError, RequiredFields, text_cell};

/// Marker value written when no requesting area applies.
const NO_REQUESTING_AREA: &str = "No aplica";

/// Location value that carries a requesting area with it.
const REQUEST_LOCATION: &str = "Solicitud";

/// Raw recovery form fields as captured by the frontend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryForm {
    /// Store display name.
    pub store: Option<String>,
    /// Date of the recovery.
    pub date: Option<NaiveDate>,
    /// Time of the recovery.
    pub time: Option<NaiveTime>,
    /// Guard on duty; must belong to the selected store's roster.
    pub guard_name: Option<String>,
    /// Floor where the recovery happened.
    pub floor: Option<String>,
    /// Location within the floor.
    pub location: Option<String>,
    /// Requesting area; only meaningful when location is "Solicitud".
    pub requesting_area: Option<String>,
    /// Coworker who handled the product.
    pub coworker_name: Option<String>,
    /// POS terminal number.
    pub pos_number: Option<String>,
    /// Product SKU, normalized before lookup.
    pub sku: Option<String>,
    /// Units recovered.
    pub quantity: Option<u32>,
    /// Unit sale value.
    pub unit_value: Option<Decimal>,
    /// Free-text case description.
    pub description: Option<String>,
}

#[derive(Debug)]
struct Validated<'a> {
    store_name: &'a str,
    date: NaiveDate,
    time: NaiveTime,
    guard_name: &'a str,
    sku: &'a str,
    quantity: u32,
    unit_value: Decimal,
}

impl RecoveryForm {
    fn validate(&self) -> Result<Validated<'_>, FormError> {
        let mut required = RequiredFields::new();
        let store_name = required.text("store", self.store.as_deref());
        let date = required.value("date", self.date);
        let time = required.value("time", self.time);
        let guard_name = required.text("guard_name", self.guard_name.as_deref());
        let sku = required.text("sku", self.sku.as_deref());
        let quantity = required.value("quantity", self.quantity);
        let unit_value = required.value("unit_value", self.unit_value);
        required.check()?;

        // check() returned Ok, so every field captured above is present.
        match (store_name, date, time, guard_name, sku, quantity, unit_value) {
            (
                Some(store_name),
                Some(date),
                Some(time),
                Some(guard_name),
                Some(sku),
                Some(quantity),
                Some(unit_value),
            ) => Ok(Validated {
                store_name,
                date,
                time,
                guard_name,
                sku,
                quantity,
                unit_value,
            }),
            _ => unreachable!("check() verified all required fields are present"),
        }
    }

    /// The requesting area written to the row: the entered area when the
    /// location is a request, `"No aplica"` otherwise.
    fn requesting_area_value(&self) -> String {
        if self.location.as_deref().map(str::trim) == Some(REQUEST_LOCATION) {
            self.requesting_area
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(NO_REQUESTING_AREA)
                .to_owned()
        } else {
            NO_REQUESTING_AREA.to_owned()
        }
    }

    /// POS numbers are numeric on the sheet when they parse, verbatim text
    /// when they do not.
    fn pos_cell(&self) -> Value {
        match self.pos_number.as_deref().map(str::trim) {
            Some(pos) if !pos.is_empty() => pos
                .parse::<i64>()
                .map_or_else(|_| json!(pos), |n| json!(n)),
            _ => json!(""),
        }
    }
}

/// Validate, derive, and assemble a recovery row in schema order.
pub(super) async fn assemble<S: SheetStore>(
    reference: &ReferenceData<S>,
    form: &RecoveryForm,
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

    let sku = Sku::normalize(v.sku);
    if !sku.is_conforming() {
        // Preserved as entered; the catalog lookup below decides its fate.
        warn!(sku = %sku, "SKU longer than 8 digits");
    }
    let entry = reference
        .catalog_entry(&sku)
        .await?
        .ok_or_else(|| FormError::Derivation {
            field: "sku",
            message: format!("SKU {sku} not found in catalog"),
        })?;

    let month = lookup::month_name(v.date.month())
        .map_err(|e| FormError::derivation("date", &e))?;
    let weekday = lookup::weekday_name(v.date.weekday().num_days_from_monday())
        .map_err(|e| FormError::derivation("date", &e))?;
    let hour_range = lookup::hour_range_label(v.time.hour())
        .map_err(|e| FormError::derivation("time", &e))?;

    let total = Decimal::from(v.quantity) * v.unit_value;

    Ok(vec![
        json!(lookup::submission_timestamp(now)),
        json!(store.name()),
        json!(v.date.to_string()),
        json!(v.time.format("%H:%M:%S").to_string()),
        json!(v.guard_name),
        text_cell(form.floor.as_ref()),
        text_cell(form.location.as_ref()),
        json!(form.requesting_area_value()),
        text_cell(form.coworker_name.as_ref()),
        form.pos_cell(),
        json!(sku.as_str()),
        json!(entry.family),
        json!(entry.item),
        json!(v.quantity),
        json!(v.unit_value),
        json!(total),
        text_cell(form.description.as_ref()),
        json!(month),
        json!(weekday),
        json!(hour_range),
    ])
}
