//! Field-level validation for external text input.
//!
//! Drafts run these checks before a record is built, so an invalid field
//! never reaches a record set.

use crate::error::{Result, StoreError};
use chrono::NaiveDate;

/// Calendar date format accepted by the store.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reject an empty required field, pass the value through otherwise.
pub fn required(field: &'static str, value: String) -> Result<String> {
    if value.is_empty() {
        Err(StoreError::MissingField(field))
    } else {
        Ok(value)
    }
}

/// Check that a value parses as a `YYYY-MM-DD` calendar date.
///
/// The string itself is stored, not the parsed date.
pub fn date(field: &'static str, value: String) -> Result<String> {
    match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
        Ok(_) => Ok(value),
        Err(_) => Err(StoreError::InvalidDate { field, value }),
    }
}

/// Parse a donation amount. Any real number is accepted.
pub fn amount(value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| StoreError::InvalidAmount(value.to_string()))
}
