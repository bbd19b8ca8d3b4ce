//! Repository trait for reservations.

use chrono::NaiveDate;

use crate::domain::availability::OccupancyQuery;
use crate::domain::entities::{NewReservation, Reservation, ReservationDates};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reservations.
///
/// Stores whatever it is given: date-order and overlap rules are enforced by
/// [`crate::domain::booking`] before any write reaches the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgReservationRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_reservation.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Stores a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car or customer does not exist.
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    async fn create(&self, new_reservation: NewReservation) -> Result<Reservation, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Reservation>, AppError>;

    /// Lists all reservations ordered by id.
    async fn list(&self) -> Result<Vec<Reservation>, AppError>;

    /// All reservations of a car, ordered by issue date.
    async fn find_by_car(&self, car_id: i64) -> Result<Vec<Reservation>, AppError>;

    /// Reservations of a car that have not ended before `from`
    /// (`return_date >= from`), ordered by issue date.
    async fn find_active_by_car(
        &self,
        car_id: i64,
        from: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError>;

    /// Reservations matching an occupancy predicate.
    async fn find_by_occupancy(&self, query: OccupancyQuery)
    -> Result<Vec<Reservation>, AppError>;

    /// Replaces the dates of a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reservation does not exist.
    async fn update_dates(
        &self,
        id: i64,
        dates: ReservationDates,
    ) -> Result<Reservation, AppError>;

    /// Deletes a reservation.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reservation does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    async fn count(&self) -> Result<i64, AppError>;
}
