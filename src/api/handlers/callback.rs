//! HandleCallback: state verification, token exchange, gate decision.
//!
//! Each branch is terminal for the request. The anti-forgery cookie is
//! consumed on the provider-denial and proceed paths; a mismatched or
//! missing state invalidates the callback without touching the cookie so
//! the user can retry the same attempt.

use crate::api::error::tagged_url;
use crate::api::handlers::{session, GateState};
use crate::api::pages;
use crate::gate::{self, FailureMode, GateError};
use crate::spotify::{self, user::ArtistProfile};
use axum::{
    extract::{Extension, Query},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackParams {
    /// Authorization code issued after user consent.
    code: Option<String>,
    /// Echo of the anti-forgery token from `/login`.
    state: Option<String>,
    /// Error tag when the remote service denied the authorization.
    error: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CallbackDecision {
    Denied(String),
    MissingCode,
    StateMismatch,
    Proceed { code: String },
}

/// Pure callback classification, in precedence order: provider denial,
/// missing code, then the state check. Both the echoed and stored state
/// must be present and non-empty before their equality means anything.
pub(crate) fn classify(params: &CallbackParams, stored_state: Option<&str>) -> CallbackDecision {
    if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
        return CallbackDecision::Denied(error.to_string());
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return CallbackDecision::MissingCode;
    };

    let echoed = params.state.as_deref().filter(|s| !s.is_empty());
    let stored = stored_state.filter(|s| !s.is_empty());

    match (echoed, stored) {
        (Some(echoed), Some(stored)) if echoed == stored => CallbackDecision::Proceed {
            code: code.to_string(),
        },
        _ => CallbackDecision::StateMismatch,
    }
}

#[utoipa::path(
    get,
    path = "/callback",
    params(CallbackParams),
    responses(
        (status = 200, description = "Interaction surface (please-follow or inline success)", content_type = "text/html"),
        (status = 303, description = "Redirect to the success or failure destination")
    ),
    tag = "gate"
)]
pub async fn callback(
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
    state: Extension<Arc<GateState>>,
) -> Response {
    let stored_state = session::extract_state_token(&headers);
    let clear_cookie = session::clear_state_cookie(state.cookie_secure()).ok();

    match classify(&params, stored_state.as_deref()) {
        CallbackDecision::Denied(reason) => {
            warn!("authorization denied by the remote service: {reason}");
            failure_response(&state, &GateError::AuthDenied(reason), clear_cookie)
        }
        CallbackDecision::MissingCode => {
            warn!("callback arrived without an authorization code");
            failure_response(&state, &GateError::MissingCode, None)
        }
        CallbackDecision::StateMismatch => {
            warn!("callback state mismatch, rejecting");
            failure_response(&state, &GateError::StateMismatch, None)
        }
        CallbackDecision::Proceed { code } => proceed(&state, &code, clear_cookie).await,
    }
}

async fn proceed(state: &GateState, code: &str, clear_cookie: Option<HeaderValue>) -> Response {
    let token = match spotify::token::exchange_code(state.globals(), code).await {
        Ok(token) => token,
        Err(err) => {
            error!("token exchange failed: {err}");
            return failure_response(
                state,
                &GateError::TokenExchangeFailed(err.user_detail()),
                clear_cookie,
            );
        }
    };

    match gate::check_and_gate(state.globals(), &token, state.config()).await {
        Ok(true) => success_response(state, clear_cookie),
        Ok(false) => unsatisfied_response(state, &token, clear_cookie).await,
        Err(err) => failure_response(state, &err, clear_cookie),
    }
}

fn with_cookie(clear_cookie: Option<HeaderValue>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Some(cookie) = clear_cookie {
        headers.insert(SET_COOKIE, cookie);
    }
    headers
}

fn failure_response(
    state: &GateState,
    err: &GateError,
    clear_cookie: Option<HeaderValue>,
) -> Response {
    let base = match state.config().failure_mode() {
        FailureMode::Redirect => state.config().failure_url().unwrap_or("/"),
        FailureMode::Render => "/",
    };

    let target = tagged_url(base, err.tag(), &err.details());

    (with_cookie(clear_cookie), Redirect::to(&target)).into_response()
}

fn success_response(state: &GateState, clear_cookie: Option<HeaderValue>) -> Response {
    let headers = with_cookie(clear_cookie);
    match state.config().success_url() {
        Some(url) => (headers, Redirect::to(url)).into_response(),
        None => (headers, Html(pages::success())).into_response(),
    }
}

async fn unsatisfied_response(
    state: &GateState,
    token: &str,
    clear_cookie: Option<HeaderValue>,
) -> Response {
    let headers = with_cookie(clear_cookie);

    match state.config().failure_mode() {
        FailureMode::Redirect => {
            let base = state.config().failure_url().unwrap_or("/");
            let target = tagged_url(base, "not_following", "follow the artist to continue");
            (headers, Redirect::to(&target)).into_response()
        }
        FailureMode::Render => {
            // Metadata is cosmetic; fall back to the raw identifier rather
            // than failing the whole page.
            let profile =
                match spotify::user::artist(state.globals(), token, state.config().artist_id())
                    .await
                {
                    Ok(profile) => profile,
                    Err(err) => {
                        warn!("artist metadata fetch failed: {err}");
                        ArtistProfile {
                            name: state.config().artist_id().to_string(),
                            image_url: None,
                        }
                    }
                };

            let page = pages::follow(
                &profile.name,
                profile.image_url.as_deref(),
                token,
                state.config().success_url(),
            );

            (headers, Html(page)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> CallbackParams {
        CallbackParams {
            code: code.map(ToString::to_string),
            state: state.map(ToString::to_string),
            error: error.map(ToString::to_string),
        }
    }

    #[test]
    fn matching_state_proceeds_to_exchange() {
        let decision = classify(&params(Some("abc"), Some("xyz"), None), Some("xyz"));
        assert_eq!(
            decision,
            CallbackDecision::Proceed {
                code: "abc".to_string()
            }
        );
    }

    #[test]
    fn mismatched_state_is_rejected() {
        let decision = classify(&params(Some("abc"), Some("xyz"), None), Some("other"));
        assert_eq!(decision, CallbackDecision::StateMismatch);
    }

    #[test]
    fn absent_cookie_is_a_state_mismatch() {
        // GET /callback?code=abc&state=xyz with no stored cookie
        let decision = classify(&params(Some("abc"), Some("xyz"), None), None);
        assert_eq!(decision, CallbackDecision::StateMismatch);
    }

    #[test]
    fn empty_states_never_proceed() {
        assert_eq!(
            classify(&params(Some("abc"), Some(""), None), Some("")),
            CallbackDecision::StateMismatch
        );
        assert_eq!(
            classify(&params(Some("abc"), None, None), Some("xyz")),
            CallbackDecision::StateMismatch
        );
        assert_eq!(
            classify(&params(Some("abc"), Some("xyz"), None), Some("")),
            CallbackDecision::StateMismatch
        );
    }

    #[test]
    fn provider_error_takes_precedence() {
        let decision = classify(
            &params(Some("abc"), Some("xyz"), Some("access_denied")),
            Some("xyz"),
        );
        assert_eq!(
            decision,
            CallbackDecision::Denied("access_denied".to_string())
        );
    }

    #[test]
    fn missing_code_is_reported_before_state_checks() {
        let decision = classify(&params(None, Some("xyz"), None), None);
        assert_eq!(decision, CallbackDecision::MissingCode);

        let decision = classify(&params(Some(""), Some("xyz"), None), Some("xyz"));
        assert_eq!(decision, CallbackDecision::MissingCode);
    }
}
