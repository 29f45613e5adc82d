//! Error taxonomy for the bulletin pipeline.
//!
//! Every failure surfaces to the request layer uncaught — there is no
//! local recovery or default-value substitution. A single failed source
//! fails an all-sources request in its entirety.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// All errors that can occur while scraping and serving bulletins.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    /// Requested product key is not in the source registry.
    #[error("unknown product: {0}")]
    UnknownSource(String),

    /// Upstream returned a non-success status or was unreachable
    /// (status 0 when no response was received at all).
    #[error("upstream fetch failed with status {status}: {url}")]
    FetchFailure { url: String, status: u16 },

    /// The per-fetch timeout elapsed before the page arrived.
    #[error("upstream fetch timed out: {0}")]
    Timeout(String),

    /// The page could not be parsed into the expected structural tree.
    #[error("bulletin page could not be parsed: {0}")]
    ParseFailure(String),
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            TrackerError::UnknownSource(_) => (StatusCode::BAD_REQUEST, "E_UNKNOWN_SOURCE"),
            TrackerError::FetchFailure { .. } => (StatusCode::BAD_GATEWAY, "E_FETCH"),
            TrackerError::Timeout(_) => (StatusCode::BAD_GATEWAY, "E_TIMEOUT"),
            TrackerError::ParseFailure(_) => (StatusCode::BAD_GATEWAY, "E_PARSE"),
        };
        let body = Json(serde_json::json!({
            "error": { "code": code, "message": self.to_string() }
        }));
        (status, body).into_response()
    }
}
