//! Pure derivation functions.
//!
//! Every value here is a deterministic function of its input: month and
//! weekday display names (Spanish, as the report sheets expect), hour-range
//! labels, ISO week numbers, the submission timestamp, and the username
//! parsed out of a `"Name (username)"` selector label.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

/// Bogota is fixed at UTC-5 year round; Colombia has no daylight saving.
const BOGOTA_UTC_OFFSET_SECS: i32 = -5 * 3600;

/// Errors from the lookup functions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// A numeric input fell outside its valid range.
    #[error("{field} out of range: {value}")]
    OutOfRange {
        /// Which input was out of range.
        field: &'static str,
        /// The offending value.
        value: i64,
    },

    /// A selector label did not contain a parenthesized username.
    #[error("malformed label: {0:?}")]
    MalformedLabel(String),
}

/// Month display names, January first.
const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Weekday display names, Monday first.
const WEEKDAY_NAMES: [&str; 7] = [
    "Lunes",
    "Martes",
    "Miercoles",
    "Jueves",
    "Viernes",
    "Sabado",
    "Domingo",
];

/// Display name for a month number (1-12).
///
/// # Errors
///
/// Returns [`LookupError::OutOfRange`] outside 1-12.
pub fn month_name(month: u32) -> Result<&'static str, LookupError> {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .ok_or(LookupError::OutOfRange {
            field: "month",
            value: i64::from(month),
        })
}

/// Display name for a weekday index (0 = Monday .. 6 = Sunday).
///
/// # Errors
///
/// Returns [`LookupError::OutOfRange`] outside 0-6.
pub fn weekday_name(weekday: u32) -> Result<&'static str, LookupError> {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .copied()
        .ok_or(LookupError::OutOfRange {
            field: "weekday",
            value: i64::from(weekday),
        })
}

/// One-hour range label for an hour of day, e.g. `"14 - 15"`.
///
/// Hour 23 renders as `"23 - 24"`; the label marks a range end, not a clock
/// reading, so there is no wraparound.
///
/// # Errors
///
/// Returns [`LookupError::OutOfRange`] outside 0-23.
pub fn hour_range_label(hour: u32) -> Result<String, LookupError> {
    if hour > 23 {
        return Err(LookupError::OutOfRange {
            field: "hour",
            value: i64::from(hour),
        });
    }
    Ok(format!("{hour} - {}", hour + 1))
}

/// ISO-8601 week number (1-53) of a date.
#[must_use]
pub fn iso_week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

/// Extract the username from a `"Name (username)"` selector label.
///
/// Takes the substring between the last `'('` and the following `')'`,
/// trimmed.
///
/// # Errors
///
/// Returns [`LookupError::MalformedLabel`] when the label carries no
/// parenthesized part.
pub fn parse_username_from_label(label: &str) -> Result<String, LookupError> {
    let after_paren = label
        .rsplit_once('(')
        .map(|(_, rest)| rest)
        .ok_or_else(|| LookupError::MalformedLabel(label.to_owned()))?;
    let username = after_paren
        .split_once(')')
        .map_or(after_paren, |(inner, _)| inner);
    Ok(username.trim().to_owned())
}

/// Render a submission instant in the Bogota timezone as
/// `YYYY-MM-DD HH:MM:SS`.
#[must_use]
pub fn submission_timestamp(now: DateTime<Utc>) -> String {
    // The offset is a constant well inside chrono's valid range.
    let bogota = FixedOffset::east_opt(BOGOTA_UTC_OFFSET_SECS).expect("UTC-5 is a valid offset");
    now.with_timezone(&bogota)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
