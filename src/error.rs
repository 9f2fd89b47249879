use crate::domain::validation::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

/// Message returned whenever a referenced message id does not exist.
pub const NOT_FOUND_MESSAGE: &str = "item not found";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found")]
    NotFound,
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Database(e) => {
                tracing::error!(error = %e, "Database error");
                Value::from("Internal server error")
            }
            Self::Validation(errors) => {
                tracing::debug!(count = errors.len(), "Validation failed");
                json!(errors)
            }
            Self::BadRequest(msg) => {
                tracing::debug!(message = %msg, "Bad request");
                Value::from(msg)
            }
            Self::NotFound => {
                tracing::debug!("Resource not found");
                Value::from(NOT_FOUND_MESSAGE)
            }
            Self::Conflict(msg) => {
                tracing::debug!(message = %msg, "Conflict");
                Value::from(msg)
            }
            Self::MethodNotAllowed => {
                tracing::debug!("Method not allowed");
                Value::from("method not allowed")
            }
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}
