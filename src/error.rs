use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::db::StoreError;
use crate::services::menu_codec::MalformedMenu;

/// Failures surfaced to whoever triggered the action. Nothing here is retried.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(StoreError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    MalformedMenu(#[from] MalformedMenu),
    #[error("menu generation failed: {0}")]
    GenerationFailed(String),
    #[error("menu generation is not configured")]
    GenerationDisabled,
    #[error("{0}")]
    InvalidRequest(String),
    #[error("reordering is disabled while a filter is active")]
    ReorderBlocked,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound("record"),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::MalformedMenu(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::GenerationDisabled => StatusCode::SERVICE_UNAVAILABLE,
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ReorderBlocked => StatusCode::CONFLICT,
        }
    }

    /// Shape used by every handler: `(status, {"error": message})`.
    pub fn into_response_parts(self) -> (StatusCode, Json<Value>) {
        (self.status(), Json(json!({ "error": self.to_string() })))
    }
}
