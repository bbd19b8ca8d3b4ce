//! DTOs for car management and availability listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::reservation::ReservationItem;
use crate::domain::availability::CarAvailability;
use crate::domain::entities::{Car, NewCar};

/// Request body for registering or replacing a car.
#[derive(Debug, Deserialize, Validate)]
pub struct CarRequest {
    #[validate(length(min = 1, max = 20))]
    pub vehicle_number: String,

    #[validate(length(min = 1, max = 50))]
    pub model: String,

    #[validate(range(min = 1))]
    pub seating_capacity: i32,

    #[validate(range(min = 0))]
    pub rent_per_day: i32,

    /// Optional dealer the car is listed under.
    #[serde(default)]
    pub dealer: Option<i64>,
}

impl From<CarRequest> for NewCar {
    fn from(r: CarRequest) -> Self {
        NewCar {
            vehicle_number: r.vehicle_number,
            model: r.model,
            seating_capacity: r.seating_capacity,
            rent_per_day: r.rent_per_day,
            dealer_id: r.dealer,
        }
    }
}

/// Car as returned by the CRUD endpoints.
///
/// The stored availability flag is omitted; it only reflects the last date
/// someone queried.
#[derive(Debug, Serialize)]
pub struct CarItem {
    pub id: i64,
    pub vehicle_number: String,
    pub model: String,
    pub seating_capacity: i32,
    pub rent_per_day: i32,
    pub dealer: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<Car> for CarItem {
    fn from(c: Car) -> Self {
        CarItem {
            id: c.id,
            vehicle_number: c.vehicle_number,
            model: c.model,
            seating_capacity: c.seating_capacity,
            rent_per_day: c.rent_per_day,
            dealer: c.dealer_id,
            created_at: c.created_at,
        }
    }
}

/// Car with its availability computed for the requested date.
#[derive(Debug, Serialize)]
pub struct AvailableCarItem {
    pub id: i64,
    pub vehicle_number: String,
    pub model: String,
    pub seating_capacity: i32,
    pub rent_per_day: i32,
    pub availability: bool,
}

impl From<CarAvailability> for AvailableCarItem {
    fn from(a: CarAvailability) -> Self {
        AvailableCarItem {
            id: a.car.id,
            vehicle_number: a.car.vehicle_number,
            model: a.car.model,
            seating_capacity: a.car.seating_capacity,
            rent_per_day: a.car.rent_per_day,
            availability: a.available,
        }
    }
}

/// A car together with its bookings that have not ended yet.
#[derive(Debug, Serialize)]
pub struct CarBookingsResponse {
    pub car: CarItem,
    pub current_active_bookings: Vec<ReservationItem>,
}
