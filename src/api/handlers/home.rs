//! Handler for the root endpoint.

use axum::Json;
use serde_json::{Value, json};

/// Returns the welcome message.
///
/// # Endpoint
///
/// `GET /`
pub async fn home_handler() -> Json<Value> {
    Json(json!([{ "message": "Welcome to Car-Rental-Agency" }]))
}
