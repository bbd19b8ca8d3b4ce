//! Reservation entity linking a customer to a car for a date range.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::booking::DateSpan;

/// A booking of one car by one customer.
///
/// `issue_date` and `return_date` are both inclusive. The store does not
/// enforce their order; the booking validator does before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub car_id: i64,
    pub issue_date: NaiveDate,
    pub return_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new Reservation instance.
    pub fn new(
        id: i64,
        customer_id: i64,
        car_id: i64,
        issue_date: NaiveDate,
        return_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            car_id,
            issue_date,
            return_date,
            created_at,
        }
    }

    /// The reserved dates as a [`DateSpan`].
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.issue_date, self.return_date)
    }
}

/// Input data for storing a validated booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub customer_id: i64,
    pub car_id: i64,
    pub issue_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl NewReservation {
    pub fn span(&self) -> DateSpan {
        DateSpan::new(self.issue_date, self.return_date)
    }
}

/// Replacement dates for an extended reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationDates {
    pub issue_date: NaiveDate,
    pub return_date: NaiveDate,
}

impl From<DateSpan> for ReservationDates {
    fn from(span: DateSpan) -> Self {
        Self {
            issue_date: span.start,
            return_date: span.end,
        }
    }
}
