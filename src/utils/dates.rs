//! Calendar date parsing for request fields.

use chrono::NaiveDate;
use serde_json::json;

use crate::AppError;

/// Wire format of every date accepted or returned by the API.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` date supplied in `field`.
///
/// Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the field if the value is not a
/// valid calendar date.
///
/// # Examples
///
/// ```ignore
/// let date = parse_date("issue_date", "2024-01-05").unwrap();
/// assert_eq!(date.to_string(), "2024-01-05");
/// ```
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        AppError::bad_request(
            "Invalid date format",
            json!({ "field": field, "value": value, "expected": "YYYY-MM-DD" }),
        )
    })
}
