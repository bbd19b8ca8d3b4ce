//! Handlers for dealer endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::dealer::{DealerItem, DealerRequest};
use crate::api::dto::list::ListResponse;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/dealers`
pub async fn dealer_list_handler(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<DealerItem>>, AppError> {
    let dealers = state.dealer_service.list_dealers().await?;
    Ok(Json(dealers.into_iter().collect()))
}

/// `GET /api/dealers/{id}`
pub async fn dealer_detail_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DealerItem>, AppError> {
    let dealer = state.dealer_service.get_dealer(id).await?;
    Ok(Json(dealer.into()))
}

/// `POST /api/dealers`
pub async fn create_dealer_handler(
    State(state): State<AppState>,
    Json(payload): Json<DealerRequest>,
) -> Result<(StatusCode, Json<DealerItem>), AppError> {
    payload.validate()?;

    let dealer = state.dealer_service.create_dealer(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(dealer.into())))
}

/// `PUT /api/dealers/{id}`
pub async fn update_dealer_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<DealerRequest>,
) -> Result<Json<DealerItem>, AppError> {
    payload.validate()?;

    let dealer = state.dealer_service.update_dealer(id, payload.into()).await?;
    Ok(Json(dealer.into()))
}

/// `DELETE /api/dealers/{id}`
///
/// Cars listed under the dealer are kept and unlinked.
pub async fn delete_dealer_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.dealer_service.delete_dealer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
