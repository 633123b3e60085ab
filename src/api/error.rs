use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use tracing::error;

use crate::db::DbError;

/// Handler failure. Everything except a missed detail lookup collapses to
/// a generic 500; the originating route and raw error only reach the log.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Movie not found")]
    NotFound,
    #[error("{route}: {source}")]
    Internal {
        route: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub fn internal(route: &'static str, source: DbError) -> Self {
        Self::Internal { route, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "message": "Movie not found" })),
            )
                .into_response(),
            ApiError::Internal { route, source } => {
                error!(route, error = %source, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Server error" })),
                )
                    .into_response()
            }
        }
    }
}
