//! Site error types and response handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors returned by the RSVP and guestbook endpoints
///
/// Both render as `{ "ok": false, "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// Client-correctable input problem (400)
    Validation(String),
    /// Datastore or configuration failure (500)
    Upstream(String),
}

impl SiteError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Upstream(msg) => msg,
        }
    }
}

impl From<JsonRejection> for SiteError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Validation(msg) => tracing::info!("Rejected request: {} - {}", status, msg),
            Self::Upstream(msg) => tracing::error!("Upstream error: {} - {}", status, msg),
        }
        (status, Json(json!({ "ok": false, "error": self.message() }))).into_response()
    }
}
