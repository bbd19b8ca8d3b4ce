//! DTOs for booking, extending and listing reservations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::booking::DateSpan;
use crate::domain::entities::{NewReservation, Reservation};
use crate::error::AppError;
use crate::utils::dates::parse_date;

/// Request body for booking a car.
///
/// Dates are `YYYY-MM-DD` strings so a malformed value is reported as a
/// validation error naming the field.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub customer: i64,
    pub car: i64,
    pub issue_date: String,
    pub return_date: String,
}

impl BookingRequest {
    pub fn parse(&self) -> Result<NewReservation, AppError> {
        Ok(NewReservation {
            customer_id: self.customer,
            car_id: self.car,
            issue_date: parse_date("issue_date", &self.issue_date)?,
            return_date: parse_date("return_date", &self.return_date)?,
        })
    }
}

/// Request body for moving a reservation to new dates.
///
/// Other reservation fields may be sent and are ignored: the customer and the
/// car of a reservation never change.
#[derive(Debug, Deserialize)]
pub struct ExtendRequest {
    pub issue_date: String,
    pub return_date: String,
}

impl ExtendRequest {
    pub fn parse(&self) -> Result<DateSpan, AppError> {
        Ok(DateSpan::new(
            parse_date("issue_date", &self.issue_date)?,
            parse_date("return_date", &self.return_date)?,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ReservationItem {
    pub id: i64,
    pub customer: i64,
    pub car: i64,
    pub issue_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl From<Reservation> for ReservationItem {
    fn from(r: Reservation) -> Self {
        ReservationItem {
            id: r.id,
            customer: r.customer_id,
            car: r.car_id,
            issue_date: r.issue_date,
            return_date: r.return_date,
        }
    }
}
