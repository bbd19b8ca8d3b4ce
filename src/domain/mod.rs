//! Domain layer containing business entities and decision logic.
//!
//! The domain layer has no dependency on HTTP or on a particular store.
//!
//! # Architecture
//!
//! - [`entities`] - Customer, Dealer, Car and Reservation records
//! - [`repositories`] - Entity store contracts implemented by the infrastructure layer
//! - [`booking`] - Booking validator: conflict and date-range rules
//! - [`availability`] - Availability engine: occupancy predicate, projection, filters
//! - [`clock`] - Source of "today"
//! - [`availability_snapshot`] / [`availability_worker`] - Asynchronous write-back
//!   of computed availability flags onto car records
//!
//! # Availability Flow
//!
//! 1. A handler asks [`crate::application::services::AvailabilityService`] for a date
//! 2. The occupied-car set is read from cache or computed from reservations
//! 3. Cars are projected and filtered, then returned to the caller
//! 4. An [`availability_snapshot::AvailabilitySnapshot`] is queued and written
//!    back by [`availability_worker::run_availability_worker`]

pub mod availability;
pub mod availability_snapshot;
pub mod availability_worker;
pub mod booking;
pub mod clock;
pub mod entities;
pub mod repositories;
