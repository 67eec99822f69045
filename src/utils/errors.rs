//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas. Los rechazos del núcleo
//! de reservas llegan aquí como `RejectionReason` y conservan su mensaje.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::core::RejectionReason;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Rejection(#[from] RejectionReason),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

/// Status y código de API para cada motivo de rechazo del núcleo.
fn rejection_parts(reason: &RejectionReason) -> (StatusCode, &'static str, &'static str) {
    match reason {
        RejectionReason::ConstraintViolation(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Constraint Violation",
            "CONSTRAINT_VIOLATION",
        ),
        RejectionReason::CapacityExceeded { .. } => (
            StatusCode::CONFLICT,
            "Capacity Exceeded",
            "CAPACITY_EXCEEDED",
        ),
        RejectionReason::IllegalTransition { .. } => (
            StatusCode::CONFLICT,
            "Illegal Transition",
            "ILLEGAL_TRANSITION",
        ),
        RejectionReason::ReferenceNotFound(_) => (
            StatusCode::NOT_FOUND,
            "Reference Not Found",
            "REFERENCE_NOT_FOUND",
        ),
        RejectionReason::StateInUse(_) => {
            (StatusCode::CONFLICT, "State In Use", "STATE_IN_USE")
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Database Error".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("DB_ERROR".to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Rejection(reason) => {
                tracing::warn!("Booking rejection: {}", reason);
                let (status, error, code) = rejection_parts(&reason);
                let details = match &reason {
                    RejectionReason::CapacityExceeded { remaining } => {
                        Some(json!({ "remaining_seats": remaining }))
                    }
                    RejectionReason::IllegalTransition { context, from, to } => Some(json!({
                        "context": context.as_str(),
                        "from": from,
                        "to": to,
                    })),
                    _ => None,
                };
                (
                    status,
                    ErrorResponse {
                        error: error.to_string(),
                        message: reason.to_string(),
                        details,
                        code: Some(code.to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::Forbidden(msg) => {
                tracing::warn!("Forbidden access: {}", msg);
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse {
                        error: "Forbidden".to_string(),
                        message: msg,
                        details: None,
                        code: Some("FORBIDDEN".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::warn!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }

            AppError::Jwt(msg) => {
                tracing::warn!("JWT error: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "JWT Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("JWT_ERROR".to_string()),
                    },
                )
            }

            AppError::Hash(msg) => {
                tracing::error!("Hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Hash Error".to_string(),
                        message: msg,
                        details: None,
                        code: Some("HASH_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_status_mapping() {
        let (status, _, code) =
            rejection_parts(&RejectionReason::CapacityExceeded { remaining: 2 });
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code, "CAPACITY_EXCEEDED");

        let (status, _, code) =
            rejection_parts(&RejectionReason::ReferenceNotFound("route run".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(code, "REFERENCE_NOT_FOUND");

        let (status, _, _) =
            rejection_parts(&RejectionReason::StateInUse("Pending".to_string()));
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn test_rejection_message_survives_conversion() {
        let err: AppError = RejectionReason::CapacityExceeded { remaining: 2 }.into();
        assert_eq!(err.to_string(), "insufficient capacity, 2 seats available");
    }
}
