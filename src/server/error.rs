//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::diagnostics::SnapshotCheckpoint;
use crate::scrape::ScrapeError;

/// Everything a handler can surface to a caller. Attempt-level errors never
/// reach here directly; the searcher has already folded them into the
/// single primary→fallback substitution.
#[derive(Debug)]
pub enum ApiError {
    /// Request body absent or not a JSON object. Absent individual fields
    /// are always valid and never produce this.
    MissingBody,
    /// Both scrape attempts failed.
    ScrapeFailed(ScrapeError),
    /// Anything else in request handling.
    Unexpected(anyhow::Error),
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        match err {
            all @ ScrapeError::AllAttemptsFailed { .. } => ApiError::ScrapeFailed(all),
            other => ApiError::Unexpected(other.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingBody => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Search parameters are required" })),
            )
                .into_response(),
            ApiError::ScrapeFailed(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to retrieve doctor data",
                    "details": format!(
                        "Both scraping methods failed ({err}). The website structure \
                         may have changed. Check the debug screenshots in the \
                         snapshot directory."
                    ),
                    "debug": {
                        "screenshots": SnapshotCheckpoint::all_file_names(),
                    },
                })),
            )
                .into_response(),
            ApiError::Unexpected(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "message": err.to_string(),
                })),
            )
                .into_response(),
        }
    }
}
