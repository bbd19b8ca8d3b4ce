//! Handlers for customer endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::customer::{CustomerItem, CustomerRequest};
use crate::api::dto::list::ListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all customers.
///
/// # Endpoint
///
/// `GET /api/customers`
pub async fn customer_list_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<CustomerItem>>, AppError> {
    let customers = state.customer_service.list_customers().await?;
    Ok(Json(customers.into_iter().collect()))
}

/// Returns one customer.
///
/// # Endpoint
///
/// `GET /api/customers/{id}`
///
/// # Errors
///
/// Returns 404 if the customer does not exist.
pub async fn customer_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<CustomerItem>, AppError> {
    let customer = state.customer_service.get_customer(id).await?;
    Ok(Json(customer.into()))
}

/// Creates a customer.
///
/// # Endpoint
///
/// `POST /api/customers`
///
/// # Errors
///
/// Returns 400 if a field fails validation.
pub async fn create_customer_handler(
    State(state): State<AppState>,
    Json(payload): Json<CustomerRequest>,
) -> Result<(StatusCode, Json<CustomerItem>), AppError> {
    payload.validate()?;

    let customer = state.customer_service.create_customer(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(customer.into())))
}

/// Replaces a customer.
///
/// # Endpoint
///
/// `PUT /api/customers/{id}`
///
/// # Errors
///
/// Returns 400 if a field fails validation.
/// Returns 404 if the customer does not exist.
pub async fn update_customer_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CustomerRequest>,
) -> Result<Json<CustomerItem>, AppError> {
    payload.validate()?;

    let customer = state
        .customer_service
        .update_customer(id, payload.into())
        .await?;
    Ok(Json(customer.into()))
}

/// Deletes a customer and their reservations.
///
/// # Endpoint
///
/// `DELETE /api/customers/{id}`
pub async fn delete_customer_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.customer_service.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
