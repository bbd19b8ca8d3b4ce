//! Handler for the date-based availability listing.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::availability::AvailabilityParams;
use crate::api::dto::car::AvailableCarItem;
use crate::api::dto::list::ListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists cars with their availability on a date.
///
/// # Endpoint
///
/// `GET /api/cars/status`
///
/// # Query Parameters
///
/// - `date` (optional): Target date, `YYYY-MM-DD` (default: today)
/// - `model` (optional): Exact model name
/// - `capacity` (optional): Exact seating capacity
/// - `availability` (optional): `true` or `false`, any letter case
///
/// # Response
///
/// ```json
/// {
///   "items": [
///     {
///       "id": 1,
///       "vehicle_number": "KA-01-1234",
///       "model": "Swift",
///       "seating_capacity": 5,
///       "rent_per_day": 1500,
///       "availability": true
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if `date`, `capacity` or `availability` is malformed.
pub async fn cars_status_handler(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<ListResponse<AvailableCarItem>>, AppError> {
    let date = params.date_or(state.availability_service.today())?;

    let cars = state
        .availability_service
        .cars_on_date(date, &params.filter()?)
        .await?;

    Ok(Json(cars.into_iter().collect()))
}
