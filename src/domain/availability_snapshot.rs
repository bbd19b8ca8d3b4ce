//! Availability snapshot handed to the flag write-back worker.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Result of one availability computation, queued for persistence.
///
/// Produced by [`crate::application::services::AvailabilityService`] after each
/// computation and consumed by
/// [`crate::domain::availability_worker::run_availability_worker`], which
/// writes the flags onto the car records. Sending never blocks the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySnapshot {
    pub date: NaiveDate,
    pub occupied: BTreeSet<i64>,
}

impl AvailabilitySnapshot {
    pub fn new(date: NaiveDate, occupied: BTreeSet<i64>) -> Self {
        Self { date, occupied }
    }
}
