use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    /// The accounts service rejected a token exchange or refresh.
    #[error("Upstream auth error: {0}")]
    UpstreamAuth(String),

    /// Non-success resource response, forwarded to the caller verbatim.
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(e) => (StatusCode::BAD_REQUEST, e),
            AppError::Unauthenticated(e) => (StatusCode::UNAUTHORIZED, e),
            AppError::UpstreamAuth(e) => {
                tracing::error!("Upstream auth error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e)
            }
            AppError::Upstream { status, body } => {
                // Body is whatever the upstream sent; don't re-wrap it.
                let status = StatusCode::from_u16(status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                return (
                    status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response();
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e)
            }
            AppError::Http(e) => {
                tracing::error!("HTTP error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Upstream request failed".to_string(),
                )
            }
        };

        let body = json!({
            "detail": error_message
        });

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
