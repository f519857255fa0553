use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use quire_shared::ValidationErrors;
use quire_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid data")]
    Validation(#[from] ValidationErrors),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { kind, .. } => ServerError::NotFound(kind),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidJson(rejection.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(rejection: QueryRejection) -> Self {
        ServerError::InvalidQuery(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ServerError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({
                    "error": self.to_string(),
                    "details": details,
                }),
            ),
            ServerError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                serde_json::json!({ "error": self.to_string() }),
            ),
            ServerError::InvalidJson(cause) => {
                tracing::warn!(%cause, "Rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({ "error": "Invalid JSON body" }),
                )
            }
            ServerError::InvalidQuery(cause) => {
                tracing::warn!(%cause, "Rejected query string");
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({ "error": "Invalid query string" }),
                )
            }
            ServerError::Internal(cause) => {
                tracing::error!(%cause, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}
