//! Car entity available for rent.

use chrono::{DateTime, Utc};

/// A rentable car.
///
/// `availability` is the flag last written by the availability snapshot worker
/// for whatever date was queried most recently. It is informational only:
/// availability decisions are always recomputed from reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    pub id: i64,
    pub vehicle_number: String,
    pub model: String,
    pub seating_capacity: i32,
    pub rent_per_day: i32,
    pub availability: Option<bool>,
    pub dealer_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Car {
    /// Creates a new Car instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        vehicle_number: String,
        model: String,
        seating_capacity: i32,
        rent_per_day: i32,
        availability: Option<bool>,
        dealer_id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            vehicle_number,
            model,
            seating_capacity,
            rent_per_day,
            availability,
            dealer_id,
            created_at,
        }
    }
}

/// Input data for registering a car, also used for full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub vehicle_number: String,
    pub model: String,
    pub seating_capacity: i32,
    pub rent_per_day: i32,
    pub dealer_id: Option<i64>,
}
