//! Handlers for reservation endpoints.
//!
//! Booking decisions come back from the service as
//! [`BookingOutcome`](crate::domain::booking::BookingOutcome) values; a
//! rejection is turned into a 409 or 400 response here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::list::ListResponse;
use crate::api::dto::reservation::{BookingRequest, ExtendRequest, ReservationItem};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/reservations`
pub async fn reservation_list_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<ReservationItem>>, AppError> {
    let reservations = state.reservation_service.list_reservations().await?;
    Ok(Json(reservations.into_iter().collect()))
}

/// `GET /api/reservations/{id}`
pub async fn reservation_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ReservationItem>, AppError> {
    let reservation = state.reservation_service.get_reservation(id).await?;
    Ok(Json(reservation.into()))
}

/// Books a car.
///
/// # Endpoint
///
/// `POST /api/reservations`
///
/// # Request
///
/// ```json
/// { "customer": 1, "car": 2, "issue_date": "2024-01-05", "return_date": "2024-01-07" }
/// ```
///
/// # Errors
///
/// Returns 400 `validation_error` if a date is malformed.
/// Returns 400 `invalid_date_range` if the issue date is in the past or after the return date.
/// Returns 404 if the car or the customer does not exist.
/// Returns 409 `booking_conflict` if the car is already reserved.
pub async fn book_reservation_handler(
    State(state): State<AppState>,
    Json(payload): Json<BookingRequest>,
) -> Result<(StatusCode, Json<ReservationItem>), AppError> {
    let request = payload.parse()?;

    let reservation = state
        .reservation_service
        .book(request)
        .await?
        .into_result()?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// Moves a reservation to new dates.
///
/// # Endpoint
///
/// `PUT /api/reservations/{id}/extend`
///
/// # Errors
///
/// Same as [`book_reservation_handler`], with 404 for an unknown reservation.
pub async fn extend_reservation_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<ExtendRequest>,
) -> Result<Json<ReservationItem>, AppError> {
    let requested = payload.parse()?;

    let reservation = state
        .reservation_service
        .extend(id, requested)
        .await?
        .into_result()?;

    Ok(Json(reservation.into()))
}

/// Cancels a reservation.
///
/// # Endpoint
///
/// `DELETE /api/reservations/{id}`
pub async fn cancel_reservation_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.reservation_service.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
