use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::OceanVariable;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid variable: {0}")]
    InvalidVariable(String),

    #[error("Insufficient samples: need at least {required}, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("Undefined correlation: {0}")]
    UndefinedCorrelation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DataUnavailable(ref e) => {
                tracing::warn!("Data unavailable: {}", e);
                (StatusCode::NOT_FOUND, e.clone())
            }
            AppError::InvalidVariable(ref name) => {
                let body = Json(json!({
                    "error": "Invalid layer",
                    "message": format!("Unknown ocean variable '{}'", name),
                    "available_layers": OceanVariable::ALL
                        .iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>(),
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InsufficientSamples { .. } | AppError::UndefinedCorrelation(_) => {
                tracing::info!("Analysis not possible: {}", self);
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string())
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.clone()),
            AppError::NotFound(ref e) => (StatusCode::NOT_FOUND, e.clone()),
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
