// Inbound HTTP handlers.
//
// Responsibilities
// - Decode JSON bodies (malformed bodies are 422), call the store, map typed
//   store failures onto status codes. User-visible messaging stays here; the
//   store never learns about HTTP.

pub mod events;
pub mod nested;
pub mod registration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use campus_events::application::errors::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

pub fn error_response(err: StoreError) -> Response {
    let status = match &err {
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::DuplicateId { .. } => StatusCode::CONFLICT,
        StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Load(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
