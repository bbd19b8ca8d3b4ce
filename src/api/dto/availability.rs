//! Query parameters for the availability listing.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::domain::availability::CarFilter;
use crate::error::AppError;
use crate::utils::dates::parse_date;

/// `GET /api/cars/status` query parameters.
///
/// Values are kept raw and parsed in [`AvailabilityParams::filter`] so a bad
/// value reports a `validation_error` like a bad date does. An absent or
/// empty parameter leaves that filter off.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    /// Target date, `YYYY-MM-DD`. Defaults to today.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub date: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub model: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub capacity: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub availability: Option<String>,
}

impl AvailabilityParams {
    /// Target date, falling back to `today` when none was given.
    pub fn date_or(&self, today: NaiveDate) -> Result<NaiveDate, AppError> {
        match &self.date {
            Some(raw) => parse_date("date", raw),
            None => Ok(today),
        }
    }

    /// Builds the listing filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] naming the field if `capacity` is not an
    /// integer or `availability` is not a boolean.
    pub fn filter(&self) -> Result<CarFilter, AppError> {
        let capacity = self
            .capacity
            .as_deref()
            .map(|raw| parse_capacity("capacity", raw))
            .transpose()?;
        let availability = self
            .availability
            .as_deref()
            .map(|raw| parse_flag("availability", raw))
            .transpose()?;

        Ok(CarFilter::new()
            .with_model(self.model.clone())
            .with_seating_capacity(capacity)
            .with_availability(availability))
    }
}

fn parse_capacity(field: &str, value: &str) -> Result<i32, AppError> {
    value.trim().parse().map_err(|_| {
        AppError::bad_request(
            "Invalid integer",
            json!({ "field": field, "value": value, "expected": "integer" }),
        )
    })
}

/// Accepts `true`/`false` in any letter case, so `True` and `False` work too.
fn parse_flag(field: &str, value: &str) -> Result<bool, AppError> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AppError::bad_request(
            "Invalid boolean",
            json!({ "field": field, "value": value, "expected": "true or false" }),
        ))
    }
}
