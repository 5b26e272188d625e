//! Authorization-code exchange against the accounts service.

use crate::cli::globals::GlobalArgs;
use crate::spotify::{api_error, client, endpoint_url, SpotifyError};
use base64ct::{Base64, Encoding};
use reqwest::header::AUTHORIZATION;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, instrument};

/// Exchange an authorization code for a bearer access token.
///
/// Authenticates with HTTP Basic `base64(client_id:client_secret)` as the
/// token endpoint requires. The token is used once by the caller and never
/// stored.
#[instrument(skip(globals, code))]
pub async fn exchange_code(globals: &GlobalArgs, code: &str) -> Result<String, SpotifyError> {
    let client = client(globals)?;

    let token_url = endpoint_url(&globals.accounts_url, "/api/token")?;

    let credentials = format!(
        "{}:{}",
        globals.client_id,
        globals.client_secret.expose_secret()
    );
    let basic = Base64::encode_string(credentials.as_bytes());

    let response = client
        .post(&token_url)
        .header(AUTHORIZATION, format!("Basic {basic}"))
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", globals.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(&token_url, response).await);
    }

    let json_response: Value = response.json().await?;

    let token = json_response["access_token"].as_str().ok_or_else(|| {
        SpotifyError::InvalidResponse("no access_token in token response".to_string())
    })?;

    debug!("token endpoint accepted the authorization code");

    Ok(token.to_string())
}
