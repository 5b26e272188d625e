//! Thin client for the Spotify accounts service and Web API.
//!
//! Every function issues one bounded HTTP call and classifies the outcome
//! into [`SpotifyError`]. Nothing here retries or caches; callers own the
//! pipeline semantics.

pub mod follow;
pub mod token;
pub mod user;

use crate::{cli::globals::GlobalArgs, APP_USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("{endpoint} - {status}, {detail}")]
    Api {
        endpoint: String,
        status: StatusCode,
        detail: String,
    },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl SpotifyError {
    /// Short human-readable detail safe to surface to the end user.
    ///
    /// Full errors (endpoint, status, transport detail) are for operator
    /// logs only; this never includes URLs or credentials.
    #[must_use]
    pub fn user_detail(&self) -> String {
        match self {
            Self::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Api { status, .. } => format!("remote service returned {status}"),
            Self::Network(err) if err.is_timeout() => "remote service timed out".to_string(),
            Self::Network(err) if err.is_decode() => {
                "unexpected response from remote service".to_string()
            }
            Self::Network(_) => "remote service unreachable".to_string(),
            Self::InvalidUrl(_) | Self::InvalidResponse(_) => {
                "unexpected response from remote service".to_string()
            }
        }
    }
}

/// Build the outbound HTTP client with the crate user agent and the
/// configured per-call timeout.
pub(crate) fn client(globals: &GlobalArgs) -> Result<Client, SpotifyError> {
    Ok(Client::builder()
        .user_agent(APP_USER_AGENT)
        .timeout(globals.http_timeout)
        .build()?)
}

pub fn endpoint_url(base: &str, endpoint: &str) -> Result<String, SpotifyError> {
    let url = Url::parse(base).map_err(|e| SpotifyError::InvalidUrl(e.to_string()))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| SpotifyError::InvalidUrl("no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => {
                return Err(SpotifyError::InvalidUrl(format!(
                    "unsupported scheme {scheme}"
                )))
            }
        },
    };

    Ok(format!("{scheme}://{host}:{port}{endpoint}"))
}

/// Drain a non-2xx response into an [`SpotifyError::Api`].
///
/// The accounts service reports `error`/`error_description` pairs; the Web
/// API nests `{"error": {"status", "message"}}`. Both shapes are handled.
pub(crate) async fn api_error(endpoint: &str, response: Response) -> SpotifyError {
    let status = response.status();
    let detail = match response.json::<Value>().await {
        Ok(body) => body["error"]["message"]
            .as_str()
            .or_else(|| body["error_description"].as_str())
            .or_else(|| body["error"].as_str())
            .unwrap_or("")
            .to_string(),
        Err(_) => String::new(),
    };

    SpotifyError::Api {
        endpoint: endpoint.to_string(),
        status,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_keeps_explicit_port() {
        let url = endpoint_url("http://localhost:4381", "/api/token").unwrap();
        assert_eq!(url, "http://localhost:4381/api/token");
    }

    #[test]
    fn endpoint_url_defaults_https_port() {
        let url = endpoint_url("https://accounts.spotify.com", "/authorize").unwrap();
        assert_eq!(url, "https://accounts.spotify.com:443/authorize");
    }

    #[test]
    fn endpoint_url_defaults_http_port() {
        let url = endpoint_url("http://api.test", "/v1/me").unwrap();
        assert_eq!(url, "http://api.test:80/v1/me");
    }

    #[test]
    fn endpoint_url_rejects_unsupported_scheme() {
        let err = endpoint_url("ftp://accounts.spotify.com", "/authorize").unwrap_err();
        assert!(matches!(err, SpotifyError::InvalidUrl(_)));
    }

    #[test]
    fn endpoint_url_rejects_missing_host() {
        let err = endpoint_url("unix:/run/spotify.sock", "/authorize").unwrap_err();
        assert!(matches!(err, SpotifyError::InvalidUrl(_)));
    }

    #[test]
    fn user_detail_prefers_remote_message() {
        let err = SpotifyError::Api {
            endpoint: "https://api.test:443/v1/me".to_string(),
            status: StatusCode::UNAUTHORIZED,
            detail: "The access token expired".to_string(),
        };
        assert_eq!(err.user_detail(), "The access token expired");
    }

    #[test]
    fn user_detail_never_leaks_endpoint() {
        let err = SpotifyError::Api {
            endpoint: "https://api.test:443/v1/me".to_string(),
            status: StatusCode::BAD_GATEWAY,
            detail: String::new(),
        };
        assert!(!err.user_detail().contains("api.test"));
    }
}
