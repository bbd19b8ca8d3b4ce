//! Repository trait for cars.

use crate::domain::entities::{Car, NewCar};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing cars.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCarRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryStore`] - In-memory implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Registers a new car. The availability flag starts unset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `dealer_id` references no dealer.
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    async fn create(&self, new_car: NewCar) -> Result<Car, AppError>;

    /// Finds a car by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Car>, AppError>;

    /// Lists all cars ordered by id.
    async fn list(&self) -> Result<Vec<Car>, AppError>;

    /// Replaces the descriptive fields of a car. The availability flag is kept.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car or the referenced dealer does not exist.
    async fn update(&self, id: i64, car: NewCar) -> Result<Car, AppError>;

    /// Deletes a car together with its reservations.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Counts registered cars.
    async fn count(&self) -> Result<i64, AppError>;

    /// Overwrites the availability flag on every car.
    async fn set_all_availability(&self, available: bool) -> Result<(), AppError>;

    /// Sets the availability flag on one car.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    async fn update_availability(&self, id: i64, available: bool) -> Result<(), AppError>;
}
