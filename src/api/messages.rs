use crate::api::AppState;
use crate::api::schemas::messages::{MessagePosted, MessageView, StatusResponse};
use crate::domain::validation::{validate_create, validate_patch};
use crate::error::{AppError, Result};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::Value;

/// Route ids only match integers; anything else is treated like an unknown id.
fn parse_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>().map_err(|_| AppError::NotFound)
}

fn parse_json(body: &Bytes) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))
}

/// Returns a single message.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn get_message(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let message = state.message_service.get(id).await?;
    Ok(Json(MessageView::from(message)))
}

/// Creates a message from a `{title, text, owner_name}` body.
///
/// # Errors
/// Returns `AppError::Validation` if a field is missing or invalid.
/// Returns `AppError::Conflict` if the title is already taken.
pub async fn create_message(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse> {
    let payload = parse_json(&body)?;
    let new_message = validate_create(&payload).map_err(AppError::Validation)?;

    let message = state.message_service.create(new_message).await?;
    Ok(Json(MessagePosted::from(message)))
}

/// Updates any subset of `title`, `text` and `owner_name`.
///
/// # Errors
/// Returns `AppError::Validation` if a present field is invalid.
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn update_message(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    let payload = parse_json(&body)?;
    let patch = validate_patch(&payload).map_err(AppError::Validation)?;

    state.message_service.update(id, patch).await?;
    Ok(Json(StatusResponse::new("success")))
}

/// Deletes a message.
///
/// # Errors
/// Returns `AppError::NotFound` if the message does not exist.
pub async fn delete_message(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<impl IntoResponse> {
    let id = parse_id(&raw_id)?;
    state.message_service.delete(id).await?;
    Ok(Json(StatusResponse::new("deletion success")))
}

/// Fallback for unknown routes, so they share the error envelope.
pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert!(matches!(parse_id("abc"), Err(AppError::NotFound)));
        assert!(matches!(parse_id("99999999999"), Err(AppError::NotFound)));
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        let body = Bytes::from_static(b"{not json");
        assert!(matches!(parse_json(&body), Err(AppError::BadRequest(_))));
    }
}
