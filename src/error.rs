//! Application error type and its HTTP representation.
//!
//! Business rejections from the booking engine are not errors inside the core
//! (see [`crate::domain::booking::BookingOutcome`]); handlers convert them into
//! [`AppError::BookingConflict`] or [`AppError::InvalidDateRange`] only when
//! building the HTTP response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::booking::{BookingKind, BookingRejection};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload, also embedded in responses that report
/// per-item failures.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },
    #[error("{message}")]
    NotFound { message: String, details: Value },
    #[error("{message}")]
    Conflict { message: String, details: Value },
    #[error("{message}")]
    BookingConflict { message: String, details: Value },
    #[error("{message}")]
    InvalidDateRange { message: String, details: Value },
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    fn parts(&self) -> (StatusCode, &'static str, &String, &Value) {
        match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "validation_error", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::BookingConflict { message, details } => {
                (StatusCode::CONFLICT, "booking_conflict", message, details)
            }
            AppError::InvalidDateRange { message, details } => (
                StatusCode::BAD_REQUEST,
                "invalid_date_range",
                message,
                details,
            ),
            AppError::StoreUnavailable { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "store_unavailable",
                message,
                details,
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code, message, details) = self.parts();
        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        if status.is_server_error() {
            tracing::error!(code = body.error.code, "{}", body.error.message);
        }

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found", json!({})),
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            ),
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::not_found(
                "Referenced record not found",
                json!({ "constraint": db.constraint() }),
            ),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed => {
                AppError::store_unavailable("Entity store unavailable", json!({}))
            }
            _ => {
                tracing::error!(error = %e, "Unexpected database error");
                AppError::internal("Database error", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(e.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<BookingRejection> for AppError {
    fn from(rejection: BookingRejection) -> Self {
        match rejection {
            BookingRejection::Conflict {
                kind,
                conflicting_reservation,
                existing,
            } => AppError::BookingConflict {
                message: match kind {
                    BookingKind::New => "The selected car is not available on this date",
                    BookingKind::Extension { .. } => {
                        "Failed to extend the date. Car is not available."
                    }
                }
                .to_string(),
                details: json!({
                    "conflicting_reservation": conflicting_reservation,
                    "issue_date": existing.start,
                    "return_date": existing.end,
                }),
            },
            BookingRejection::InvalidRange { requested, today } => AppError::InvalidDateRange {
                message: "Issue date must not be in the past or after the return date"
                    .to_string(),
                details: json!({
                    "issue_date": requested.start,
                    "return_date": requested.end,
                    "today": today,
                }),
            },
        }
    }
}
