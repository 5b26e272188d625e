//! Current-user and artist profile queries.

use crate::cli::globals::GlobalArgs;
use crate::spotify::{api_error, client, endpoint_url, SpotifyError};
use serde_json::Value;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ArtistProfile {
    pub name: String,
    pub image_url: Option<String>,
}

/// Lightweight identity probe: resolves the profile behind an access token.
///
/// A failure here means the token is unusable, before any mutation runs.
#[instrument(skip(globals, token))]
pub async fn current_user(globals: &GlobalArgs, token: &str) -> Result<UserProfile, SpotifyError> {
    let client = client(globals)?;

    let me_url = endpoint_url(&globals.api_url, "/v1/me")?;

    let response = client.get(&me_url).bearer_auth(token).send().await?;

    if !response.status().is_success() {
        return Err(api_error(&me_url, response).await);
    }

    let json_response: Value = response.json().await?;

    let id = json_response["id"]
        .as_str()
        .ok_or_else(|| SpotifyError::InvalidResponse("no id in profile response".to_string()))?;

    Ok(UserProfile {
        id: id.to_string(),
        display_name: json_response["display_name"]
            .as_str()
            .map(ToString::to_string),
    })
}

/// Fetch artist display metadata for the "please follow" page.
#[instrument(skip(globals, token))]
pub async fn artist(
    globals: &GlobalArgs,
    token: &str,
    artist_id: &str,
) -> Result<ArtistProfile, SpotifyError> {
    let client = client(globals)?;

    let artist_url = endpoint_url(&globals.api_url, &format!("/v1/artists/{artist_id}"))?;

    let response = client.get(&artist_url).bearer_auth(token).send().await?;

    if !response.status().is_success() {
        return Err(api_error(&artist_url, response).await);
    }

    let json_response: Value = response.json().await?;

    let name = json_response["name"]
        .as_str()
        .ok_or_else(|| SpotifyError::InvalidResponse("no name in artist response".to_string()))?;

    // First image is the largest per the Web API contract.
    let image_url = json_response["images"][0]["url"]
        .as_str()
        .map(ToString::to_string);

    Ok(ArtistProfile {
        name: name.to_string(),
        image_url,
    })
}
