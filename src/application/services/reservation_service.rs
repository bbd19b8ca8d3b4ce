//! Reservation booking service.

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::application::services::availability_service::invalidate_availability;
use crate::domain::booking::{
    BookingKind, BookingOutcome, BookingRejection, BookingRules, DateSpan, evaluate,
};
use crate::domain::clock::Clock;
use crate::domain::entities::{NewReservation, Reservation, ReservationDates};
use crate::domain::repositories::{CarRepository, CustomerRepository, ReservationRepository};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Service that books, extends and cancels reservations.
///
/// Booking decisions are made by [`crate::domain::booking::evaluate`] against
/// every reservation of the car. Validation reads and then writes without a
/// lock, so two concurrent bookings of one car can both be accepted.
///
/// Every accepted write and every cancellation invalidates the availability
/// cache.
pub struct ReservationService<R, C, U>
where
    R: ReservationRepository + ?Sized,
    C: CarRepository + ?Sized,
    U: CustomerRepository + ?Sized,
{
    reservations: Arc<R>,
    cars: Arc<C>,
    customers: Arc<U>,
    cache: Arc<dyn CacheService>,
    clock: Arc<dyn Clock>,
    rules: BookingRules,
}

impl<R, C, U> ReservationService<R, C, U>
where
    R: ReservationRepository + ?Sized,
    C: CarRepository + ?Sized,
    U: CustomerRepository + ?Sized,
{
    pub fn new(
        reservations: Arc<R>,
        cars: Arc<C>,
        customers: Arc<U>,
        cache: Arc<dyn CacheService>,
        clock: Arc<dyn Clock>,
        rules: BookingRules,
    ) -> Self {
        Self {
            reservations,
            cars,
            customers,
            cache,
            clock,
            rules,
        }
    }

    pub fn rules(&self) -> BookingRules {
        self.rules
    }

    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, AppError> {
        self.reservations.list().await
    }

    /// Retrieves a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reservation does not exist.
    pub async fn get_reservation(&self, id: i64) -> Result<Reservation, AppError> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found", json!({ "id": id })))
    }

    /// Books a car for a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the car or the customer does not exist.
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    /// Conflicts and invalid ranges are returned as [`BookingOutcome::Rejected`].
    pub async fn book(
        &self,
        request: NewReservation,
    ) -> Result<BookingOutcome<Reservation>, AppError> {
        if self.cars.find_by_id(request.car_id).await?.is_none() {
            return Err(AppError::not_found(
                "Car not found",
                json!({ "car": request.car_id }),
            ));
        }
        if self.customers.find_by_id(request.customer_id).await?.is_none() {
            return Err(AppError::not_found(
                "Customer not found",
                json!({ "customer": request.customer_id }),
            ));
        }

        let existing = self.reservations.find_by_car(request.car_id).await?;
        let kind = BookingKind::New;

        if let Err(rejection) = self.decide(&existing, request.span(), kind) {
            return Ok(BookingOutcome::Rejected(rejection));
        }

        let created = self.reservations.create(request).await?;
        invalidate_availability(self.cache.as_ref()).await;
        info!(
            reservation_id = created.id,
            car_id = created.car_id,
            issue_date = %created.issue_date,
            return_date = %created.return_date,
            "Reservation booked"
        );

        Ok(BookingOutcome::Accepted(created))
    }

    /// Moves a reservation to new dates. The car never changes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reservation does not exist.
    /// Returns [`AppError::StoreUnavailable`] or [`AppError::Internal`] on store errors.
    /// Conflicts and invalid ranges are returned as [`BookingOutcome::Rejected`].
    pub async fn extend(
        &self,
        id: i64,
        requested: DateSpan,
    ) -> Result<BookingOutcome<Reservation>, AppError> {
        let reservation = self.get_reservation(id).await?;
        let existing = self.reservations.find_by_car(reservation.car_id).await?;
        let kind = BookingKind::Extension { reservation_id: id };

        if let Err(rejection) = self.decide(&existing, requested, kind) {
            return Ok(BookingOutcome::Rejected(rejection));
        }

        let updated = self
            .reservations
            .update_dates(id, ReservationDates::from(requested))
            .await?;
        invalidate_availability(self.cache.as_ref()).await;
        info!(
            reservation_id = id,
            issue_date = %updated.issue_date,
            return_date = %updated.return_date,
            "Reservation extended"
        );

        Ok(BookingOutcome::Accepted(updated))
    }

    /// Cancels a reservation unconditionally.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reservation does not exist.
    pub async fn cancel(&self, id: i64) -> Result<(), AppError> {
        self.reservations.delete(id).await?;
        invalidate_availability(self.cache.as_ref()).await;
        info!(reservation_id = id, "Reservation cancelled");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        self.reservations.count().await
    }

    fn decide(
        &self,
        existing: &[Reservation],
        requested: DateSpan,
        kind: BookingKind,
    ) -> Result<(), BookingRejection> {
        let today = self.clock.today();
        let decision = evaluate(existing, requested, kind, self.rules, today);

        let outcome = match &decision {
            Ok(()) => "accepted",
            Err(rejection) => rejection.label(),
        };
        metrics::counter!(
            "booking_decisions_total",
            "kind" => kind.label(),
            "outcome" => outcome
        )
        .increment(1);

        if let Err(rejection) = &decision {
            info!(
                kind = kind.label(),
                rules = %self.rules,
                outcome,
                start = %requested.start,
                end = %requested.end,
                ?rejection,
                "Booking rejected"
            );
        }

        decision
    }
}
