//! Car management service.

use serde_json::json;
use std::sync::Arc;

use crate::application::services::availability_service::invalidate_availability;
use crate::domain::clock::Clock;
use crate::domain::entities::{Car, NewCar, Reservation};
use crate::domain::repositories::{CarRepository, ReservationRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service for managing cars and listing their upcoming bookings.
pub struct CarService<C: CarRepository + ?Sized, R: ReservationRepository + ?Sized> {
    cars: Arc<C>,
    reservations: Arc<R>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
}

impl<C, R> CarService<C, R>
where
    C: CarRepository + ?Sized,
    R: ReservationRepository + ?Sized,
{
    pub fn new(
        cars: Arc<C>,
        reservations: Arc<R>,
        cache: Arc<dyn CacheService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cars,
            reservations,
            cache,
            clock,
        }
    }

    /// Registers a car.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `dealer_id` references no dealer.
    pub async fn create_car(&self, car: NewCar) -> Result<Car, AppError> {
        let created = self.cars.create(car).await?;
        tracing::info!(car_id = created.id, model = %created.model, "Car registered");
        Ok(created)
    }

    pub async fn list_cars(&self) -> Result<Vec<Car>, AppError> {
        self.cars.list().await
    }

    /// Retrieves a car by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    pub async fn get_car(&self, id: i64) -> Result<Car, AppError> {
        self.cars
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Car not found", json!({ "id": id })))
    }

    pub async fn update_car(&self, id: i64, car: NewCar) -> Result<Car, AppError> {
        self.cars.update(id, car).await
    }

    /// Deletes a car and, by cascade, its reservations.
    pub async fn delete_car(&self, id: i64) -> Result<(), AppError> {
        self.cars.delete(id).await?;
        invalidate_availability(self.cache.as_ref()).await;
        tracing::info!(car_id = id, "Car deleted");
        Ok(())
    }

    /// The car and its reservations that have not ended before today.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car does not exist.
    pub async fn active_bookings(&self, id: i64) -> Result<(Car, Vec<Reservation>), AppError> {
        let car = self.get_car(id).await?;
        let bookings = self
            .reservations
            .find_active_by_car(id, self.clock.today())
            .await?;
        Ok((car, bookings))
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.cars.count().await
    }
}
