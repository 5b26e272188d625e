//! BeginLogin: mint the anti-forgery token and redirect to the authorize
//! endpoint.

use crate::api::handlers::{session, GateState};
use crate::cli::globals::GlobalArgs;
use crate::gate::GateConfig;
use crate::spotify::{self, SpotifyError};
use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
};
use std::sync::Arc;
use tracing::{debug, error};
use url::Url;

/// Build the remote authorize URL for one login attempt.
pub(crate) fn authorize_url(
    globals: &GlobalArgs,
    config: &GateConfig,
    state_token: &str,
) -> Result<String, SpotifyError> {
    let base = spotify::endpoint_url(&globals.accounts_url, "/authorize")?;

    let mut url = Url::parse(&base).map_err(|e| SpotifyError::InvalidUrl(e.to_string()))?;

    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &globals.client_id)
        .append_pair("scope", &config.scopes())
        .append_pair("redirect_uri", &globals.redirect_uri)
        .append_pair("state", state_token);

    if config.show_dialog() {
        url.query_pairs_mut().append_pair("show_dialog", "true");
    }

    Ok(url.into())
}

#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 303, description = "Redirect to the remote authorize endpoint; sets the anti-forgery cookie")
    ),
    tag = "gate"
)]
pub async fn login(state: Extension<Arc<GateState>>) -> impl IntoResponse {
    let token = session::generate_state_token();

    let authorize = match authorize_url(state.globals(), state.config(), &token) {
        Ok(url) => url,
        Err(err) => {
            error!("failed to build authorize URL: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    debug!("redirecting to the authorize endpoint");

    let mut headers = HeaderMap::new();
    match session::state_cookie(&token, state.cookie_secure()) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("failed to build state cookie: {err}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    (headers, Redirect::to(&authorize)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn globals() -> GlobalArgs {
        GlobalArgs::new(
            "client-id".to_string(),
            SecretString::from("client-secret".to_string()),
            "https://gate.tld/callback".to_string(),
        )
    }

    #[test]
    fn authorize_url_carries_the_flow_parameters() {
        let config = GateConfig::new("artist".to_string());
        let url = authorize_url(&globals(), &config, "state-token").unwrap();

        assert!(url.starts_with("https://accounts.spotify.com:443/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client-id"));
        assert!(url.contains("scope=user-follow-read+user-follow-modify"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fgate.tld%2Fcallback"));
        assert!(url.contains("state=state-token"));
        assert!(!url.contains("show_dialog"));
    }

    #[test]
    fn authorize_url_never_contains_the_client_secret() {
        let config = GateConfig::new("artist".to_string());
        let url = authorize_url(&globals(), &config, "state-token").unwrap();
        assert!(!url.contains("client-secret"));
    }

    #[test]
    fn authorize_url_forces_dialog_when_configured() {
        let config = GateConfig::new("artist".to_string()).with_show_dialog(true);
        let url = authorize_url(&globals(), &config, "state-token").unwrap();
        assert!(url.contains("show_dialog=true"));
    }
}
