//! Date-based car availability.
//!
//! The projection is computed from reservations every time it is requested:
//! [`OccupancyQuery`] selects the reservations that make a car unavailable on a
//! date, [`occupied_car_ids`] collapses them to car ids and [`project`] marks
//! every car accordingly. [`CarFilter`] then narrows the result.

use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use crate::domain::booking::BookingRules;
use crate::domain::entities::{Car, Reservation};

/// Predicate selecting reservations that occupy a car on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupancyQuery {
    /// `issue_date >= date OR return_date >= date`.
    ///
    /// Historical predicate. It also matches reservations that start after
    /// `date`, so a car booked only next month shows as unavailable today.
    Legacy { date: NaiveDate },
    /// `issue_date <= date AND return_date >= date`.
    Covering { date: NaiveDate },
}

impl OccupancyQuery {
    pub fn for_date(date: NaiveDate, rules: BookingRules) -> Self {
        match rules {
            BookingRules::Legacy => OccupancyQuery::Legacy { date },
            BookingRules::Strict => OccupancyQuery::Covering { date },
        }
    }

    pub fn date(&self) -> NaiveDate {
        match *self {
            OccupancyQuery::Legacy { date } | OccupancyQuery::Covering { date } => date,
        }
    }

    pub fn matches(&self, reservation: &Reservation) -> bool {
        match *self {
            OccupancyQuery::Legacy { date } => {
                reservation.issue_date >= date || reservation.return_date >= date
            }
            OccupancyQuery::Covering { date } => reservation.span().contains(date),
        }
    }
}

/// Distinct ids of cars held by at least one matching reservation.
pub fn occupied_car_ids(reservations: &[Reservation], query: OccupancyQuery) -> BTreeSet<i64> {
    reservations
        .iter()
        .filter(|r| query.matches(r))
        .map(|r| r.car_id)
        .collect()
}

/// A car together with its computed availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarAvailability {
    pub car: Car,
    pub available: bool,
}

/// Marks every car available unless it is in `occupied`.
pub fn project(cars: Vec<Car>, occupied: &BTreeSet<i64>) -> Vec<CarAvailability> {
    cars.into_iter()
        .map(|car| {
            let available = !occupied.contains(&car.id);
            CarAvailability { car, available }
        })
        .collect()
}

/// Same projection keyed by car id.
pub fn availability_map(cars: &[Car], occupied: &BTreeSet<i64>) -> BTreeMap<i64, bool> {
    cars.iter()
        .map(|car| (car.id, !occupied.contains(&car.id)))
        .collect()
}

/// Equality filters applied after availability is computed.
///
/// A `None` field leaves that dimension unfiltered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarFilter {
    pub model: Option<String>,
    pub seating_capacity: Option<i32>,
    pub availability: Option<bool>,
}

impl CarFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }

    pub fn with_seating_capacity(mut self, seating_capacity: Option<i32>) -> Self {
        self.seating_capacity = seating_capacity;
        self
    }

    pub fn with_availability(mut self, availability: Option<bool>) -> Self {
        self.availability = availability;
        self
    }

    pub fn matches(&self, item: &CarAvailability) -> bool {
        self.model.as_ref().is_none_or(|m| *m == item.car.model)
            && self
                .seating_capacity
                .is_none_or(|c| c == item.car.seating_capacity)
            && self.availability.is_none_or(|a| a == item.available)
    }

    pub fn apply(&self, items: Vec<CarAvailability>) -> Vec<CarAvailability> {
        items.into_iter().filter(|i| self.matches(i)).collect()
    }
}
