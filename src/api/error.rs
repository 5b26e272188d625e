//! HTTP mapping for [`GateError`].
//!
//! Redirect surfaces carry `error`/`details` query parameters; JSON surfaces
//! carry an `{error, details}` body. Only sanitized detail strings reach
//! either one.

use crate::gate::GateError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use url::form_urlencoded;
use utoipa::ToSchema;

/// JSON error body for the `/follow` endpoint.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(error: &str, details: String) -> Self {
        Self {
            error: error.to_string(),
            details: Some(details),
        }
    }
}

impl GateError {
    fn status(&self) -> StatusCode {
        match self {
            Self::AuthDenied(_) => StatusCode::FORBIDDEN,
            Self::MissingCode | Self::StateMismatch => StatusCode::BAD_REQUEST,
            Self::TokenExchangeFailed(_)
            | Self::VerificationFailed(_)
            | Self::FollowActionFailed { .. } => StatusCode::BAD_GATEWAY,
            // The write was accepted but is not observable yet; the client
            // should retry rather than restart the flow.
            Self::VerificationAfterActionFailed => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorResponse::with_details(self.tag(), self.details());
        (self.status(), Json(body)).into_response()
    }
}

/// Append `error`/`details` query parameters to a redirect target.
///
/// The base may already carry a query string; parameters are appended either
/// way and values are form-encoded.
pub(crate) fn tagged_url(base: &str, tag: &str, details: &str) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("error", tag);
    if !details.is_empty() {
        query.append_pair("details", details);
    }
    let query = query.finish();

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_error_kind() {
        assert_eq!(
            GateError::StateMismatch.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(GateError::MissingCode.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GateError::AuthDenied("denied".to_string()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            GateError::TokenExchangeFailed("invalid_grant".to_string()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            GateError::VerificationAfterActionFailed.status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn error_response_skips_absent_details() {
        let body = serde_json::to_value(ErrorResponse::new("No access token provided")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"error": "No access token provided"})
        );
    }

    #[test]
    fn tagged_url_appends_query() {
        let url = tagged_url("/", "state_mismatch", "please retry");
        assert_eq!(url, "/?error=state_mismatch&details=please+retry");
    }

    #[test]
    fn tagged_url_extends_existing_query() {
        let url = tagged_url("https://example.com/sorry?campaign=x", "access_denied", "");
        assert_eq!(url, "https://example.com/sorry?campaign=x&error=access_denied");
    }
}
