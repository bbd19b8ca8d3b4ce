//! Handlers for car endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::car::{CarBookingsResponse, CarItem, CarRequest};
use crate::api::dto::list::ListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all cars.
///
/// # Endpoint
///
/// `GET /api/cars`
pub async fn car_list_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<CarItem>>, AppError> {
    let cars = state.car_service.list_cars().await?;
    Ok(Json(cars.into_iter().collect()))
}

/// Returns one car.
///
/// # Endpoint
///
/// `GET /api/cars/{id}`
///
/// # Errors
///
/// Returns 404 if the car does not exist.
pub async fn car_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CarItem>, AppError> {
    let car = state.car_service.get_car(id).await?;
    Ok(Json(car.into()))
}

/// Returns a car with its bookings that end today or later.
///
/// # Endpoint
///
/// `GET /api/cars/{id}/active-bookings`
///
/// # Errors
///
/// Returns 404 if the car does not exist.
pub async fn car_active_bookings_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CarBookingsResponse>, AppError> {
    let (car, bookings) = state.car_service.active_bookings(id).await?;

    Ok(Json(CarBookingsResponse {
        car: car.into(),
        current_active_bookings: bookings.into_iter().map(Into::into).collect(),
    }))
}

/// Registers a car.
///
/// # Endpoint
///
/// `POST /api/cars`
///
/// # Errors
///
/// Returns 400 if a field fails validation.
/// Returns 404 if `dealer` references no dealer.
pub async fn create_car_handler(
    State(state): State<AppState>,
    Json(payload): Json<CarRequest>,
) -> Result<(StatusCode, Json<CarItem>), AppError> {
    payload.validate()?;

    let car = state.car_service.create_car(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(car.into())))
}

/// Replaces a car's descriptive fields.
///
/// # Endpoint
///
/// `PUT /api/cars/{id}`
pub async fn update_car_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CarRequest>,
) -> Result<Json<CarItem>, AppError> {
    payload.validate()?;

    let car = state.car_service.update_car(id, payload.into()).await?;
    Ok(Json(car.into()))
}

/// Deletes a car and its reservations.
///
/// # Endpoint
///
/// `DELETE /api/cars/{id}`
pub async fn delete_car_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.car_service.delete_car(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
