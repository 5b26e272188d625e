//! Follow-status queries and idempotent follow mutations.

use crate::cli::globals::GlobalArgs;
use crate::spotify::{api_error, client, endpoint_url, SpotifyError};
use serde_json::Value;
use tracing::{debug, instrument};

/// Does the current user follow the given artist?
#[instrument(skip(globals, token))]
pub async fn follows_artist(
    globals: &GlobalArgs,
    token: &str,
    artist_id: &str,
) -> Result<bool, SpotifyError> {
    let client = client(globals)?;

    let contains_url = endpoint_url(&globals.api_url, "/v1/me/following/contains")?;

    let response = client
        .get(&contains_url)
        .query(&[("type", "artist"), ("ids", artist_id)])
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(&contains_url, response).await);
    }

    let flags: Vec<bool> = response.json().await?;

    flags.first().copied().ok_or_else(|| {
        SpotifyError::InvalidResponse("empty following/contains response".to_string())
    })
}

/// Weak playlist-follow signal: does the playlist have any followers at all?
///
/// The Web API offers no "does the current user follow playlist X" query in
/// this flow, so the gate falls back to the aggregate follower count. A
/// `true` here is weaker evidence than the artist check: it confirms the
/// playlist is followed by someone, not necessarily by this user. Callers
/// must not treat it as strict verification.
#[instrument(skip(globals, token))]
pub async fn playlist_has_followers(
    globals: &GlobalArgs,
    token: &str,
    playlist_id: &str,
) -> Result<bool, SpotifyError> {
    let client = client(globals)?;

    let playlist_url = endpoint_url(&globals.api_url, &format!("/v1/playlists/{playlist_id}"))?;

    let response = client
        .get(&playlist_url)
        .query(&[("fields", "followers.total")])
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(&playlist_url, response).await);
    }

    let json_response: Value = response.json().await?;

    let total = json_response["followers"]["total"].as_u64().ok_or_else(|| {
        SpotifyError::InvalidResponse("no followers.total in playlist response".to_string())
    })?;

    debug!("playlist has {} followers", total);

    Ok(total > 0)
}

/// Follow the given artist on behalf of the current user.
///
/// Following an already-followed artist is a no-op success on the remote
/// side, so the call is idempotent.
#[instrument(skip(globals, token))]
pub async fn follow_artist(
    globals: &GlobalArgs,
    token: &str,
    artist_id: &str,
) -> Result<(), SpotifyError> {
    let client = client(globals)?;

    let follow_url = endpoint_url(&globals.api_url, "/v1/me/following")?;

    let response = client
        .put(&follow_url)
        .query(&[("type", "artist"), ("ids", artist_id)])
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(&follow_url, response).await);
    }

    Ok(())
}

/// Follow the given playlist on behalf of the current user. Idempotent.
#[instrument(skip(globals, token))]
pub async fn follow_playlist(
    globals: &GlobalArgs,
    token: &str,
    playlist_id: &str,
) -> Result<(), SpotifyError> {
    let client = client(globals)?;

    let followers_url = endpoint_url(
        &globals.api_url,
        &format!("/v1/playlists/{playlist_id}/followers"),
    )?;

    let response = client
        .put(&followers_url)
        .json(&serde_json::json!({ "public": true }))
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(api_error(&followers_url, response).await);
    }

    Ok(())
}
