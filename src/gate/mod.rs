//! Follow Verifier: gate policy plus the check/subscribe/verify pipeline.
//!
//! The gate is configured once at startup ([`GateConfig`]) and is read-only
//! afterwards. All operations are remote-API calls against the configured
//! resource set; no local state is mutated.

pub mod error;

pub use error::GateError;

use crate::cli::globals::GlobalArgs;
use crate::spotify::{self, SpotifyError};
use tracing::{debug, error, info, instrument};

/// How unsatisfied and failed callbacks are routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureMode {
    /// Serve the "please follow" page (and home-page error banners) inline.
    Render,
    /// Redirect to the configured failure URL.
    Redirect,
}

/// Immutable gate policy, built once in the CLI layer.
#[derive(Clone, Debug)]
pub struct GateConfig {
    artist_id: String,
    playlist_id: Option<String>,
    success_url: Option<String>,
    failure_mode: FailureMode,
    failure_url: Option<String>,
    show_dialog: bool,
}

impl GateConfig {
    #[must_use]
    pub fn new(artist_id: String) -> Self {
        Self {
            artist_id,
            playlist_id: None,
            success_url: None,
            failure_mode: FailureMode::Render,
            failure_url: None,
            show_dialog: false,
        }
    }

    #[must_use]
    pub fn with_playlist_id(mut self, playlist_id: String) -> Self {
        self.playlist_id = Some(playlist_id);
        self
    }

    #[must_use]
    pub fn with_success_url(mut self, success_url: String) -> Self {
        self.success_url = Some(success_url);
        self
    }

    #[must_use]
    pub fn with_failure_mode(mut self, failure_mode: FailureMode) -> Self {
        self.failure_mode = failure_mode;
        self
    }

    #[must_use]
    pub fn with_failure_url(mut self, failure_url: String) -> Self {
        self.failure_url = Some(failure_url);
        self
    }

    #[must_use]
    pub fn with_show_dialog(mut self, show_dialog: bool) -> Self {
        self.show_dialog = show_dialog;
        self
    }

    #[must_use]
    pub fn artist_id(&self) -> &str {
        &self.artist_id
    }

    #[must_use]
    pub fn playlist_id(&self) -> Option<&str> {
        self.playlist_id.as_deref()
    }

    #[must_use]
    pub fn success_url(&self) -> Option<&str> {
        self.success_url.as_deref()
    }

    #[must_use]
    pub fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    #[must_use]
    pub fn failure_url(&self) -> Option<&str> {
        self.failure_url.as_deref()
    }

    #[must_use]
    pub fn show_dialog(&self) -> bool {
        self.show_dialog
    }

    /// Space-delimited OAuth scopes for the gated resource set.
    ///
    /// Following a playlist is a playlist-modify operation, so those scopes
    /// are only requested when a playlist is actually gated.
    #[must_use]
    pub fn scopes(&self) -> String {
        let mut scopes = "user-follow-read user-follow-modify".to_string();
        if self.playlist_id.is_some() {
            scopes.push_str(" playlist-modify-public playlist-modify-private");
        }
        scopes
    }
}

/// Per-resource follow booleans from one verification pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FollowStatus {
    pub artist: bool,
    /// `None` when no playlist is gated.
    pub playlist: Option<bool>,
}

impl FollowStatus {
    /// AND-reduction over the configured resources.
    #[must_use]
    pub fn satisfied(&self) -> bool {
        self.artist && self.playlist.unwrap_or(true)
    }
}

fn verification_failed(stage: &str, err: &SpotifyError) -> GateError {
    error!("{stage} failed: {err}");
    GateError::VerificationFailed(err.user_detail())
}

/// Query the current follow status of every gated resource.
///
/// The artist and playlist queries have no ordering dependency, so the
/// two-resource case fans out and joins.
#[instrument(skip(globals, token))]
pub async fn check_follow_status(
    globals: &GlobalArgs,
    token: &str,
    config: &GateConfig,
) -> Result<FollowStatus, GateError> {
    let status = match config.playlist_id() {
        Some(playlist_id) => {
            let (artist, playlist) = tokio::join!(
                spotify::follow::follows_artist(globals, token, config.artist_id()),
                spotify::follow::playlist_has_followers(globals, token, playlist_id),
            );

            FollowStatus {
                artist: artist.map_err(|e| verification_failed("artist follow check", &e))?,
                playlist: Some(
                    playlist.map_err(|e| verification_failed("playlist follow check", &e))?,
                ),
            }
        }
        None => FollowStatus {
            artist: spotify::follow::follows_artist(globals, token, config.artist_id())
                .await
                .map_err(|e| verification_failed("artist follow check", &e))?,
            playlist: None,
        },
    };

    debug!("follow status: {:?}", status);

    Ok(status)
}

/// Follow every gated resource on behalf of the user.
///
/// All configured resources are attempted even when an earlier one fails;
/// successful mutations are not rolled back. Any failure surfaces as
/// [`GateError::FollowActionFailed`] naming the failed resource(s).
#[instrument(skip(globals, token))]
pub async fn subscribe(
    globals: &GlobalArgs,
    token: &str,
    config: &GateConfig,
) -> Result<(), GateError> {
    let mut failures: Vec<(&str, String)> = Vec::new();

    if let Err(err) = spotify::follow::follow_artist(globals, token, config.artist_id()).await {
        error!("artist follow action failed: {err}");
        failures.push(("artist", err.user_detail()));
    }

    if let Some(playlist_id) = config.playlist_id() {
        if let Err(err) = spotify::follow::follow_playlist(globals, token, playlist_id).await {
            error!("playlist follow action failed: {err}");
            failures.push(("playlist", err.user_detail()));
        }
    }

    if failures.is_empty() {
        return Ok(());
    }

    let resource = failures
        .iter()
        .map(|(resource, _)| *resource)
        .collect::<Vec<_>>()
        .join(", ");
    let detail = failures
        .into_iter()
        .map(|(_, detail)| detail)
        .collect::<Vec<_>>()
        .join("; ");

    Err(GateError::FollowActionFailed { resource, detail })
}

/// Read-only gate decision used by the callback path.
#[instrument(skip(globals, token))]
pub async fn check_and_gate(
    globals: &GlobalArgs,
    token: &str,
    config: &GateConfig,
) -> Result<bool, GateError> {
    Ok(check_follow_status(globals, token, config).await?.satisfied())
}

/// Interactive "Follow Now" pipeline: probe, subscribe, re-verify.
///
/// Success requires the post-mutation status to show every resource
/// followed. A clean subscribe with an unsatisfied re-check yields
/// [`GateError::VerificationAfterActionFailed`]: the provider accepted the
/// write but a read race or eventual consistency hides it, and the caller
/// should offer a retry.
#[instrument(skip(globals, token))]
pub async fn verify_follow(
    globals: &GlobalArgs,
    token: &str,
    config: &GateConfig,
) -> Result<(), GateError> {
    let profile = spotify::user::current_user(globals, token)
        .await
        .map_err(|e| verification_failed("identity probe", &e))?;

    debug!("verified token for user {}", profile.id);

    subscribe(globals, token, config).await?;

    let status = check_follow_status(globals, token, config).await?;

    if status.satisfied() {
        info!("follow verified for all gated resources");
        Ok(())
    } else {
        Err(GateError::VerificationAfterActionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_config_defaults_and_overrides() {
        let config = GateConfig::new("4gzpq5DPGxSnKTe4SA8HAU".to_string());

        assert_eq!(config.artist_id(), "4gzpq5DPGxSnKTe4SA8HAU");
        assert_eq!(config.playlist_id(), None);
        assert_eq!(config.success_url(), None);
        assert_eq!(config.failure_mode(), FailureMode::Render);
        assert!(!config.show_dialog());

        let config = config
            .with_playlist_id("37i9dQZF1DXcBWIGoYBM5M".to_string())
            .with_success_url("https://example.com/thanks".to_string())
            .with_failure_mode(FailureMode::Redirect)
            .with_failure_url("https://example.com/sorry".to_string())
            .with_show_dialog(true);

        assert_eq!(config.playlist_id(), Some("37i9dQZF1DXcBWIGoYBM5M"));
        assert_eq!(config.success_url(), Some("https://example.com/thanks"));
        assert_eq!(config.failure_mode(), FailureMode::Redirect);
        assert_eq!(config.failure_url(), Some("https://example.com/sorry"));
        assert!(config.show_dialog());
    }

    #[test]
    fn scopes_without_playlist() {
        let config = GateConfig::new("artist".to_string());
        assert_eq!(config.scopes(), "user-follow-read user-follow-modify");
    }

    #[test]
    fn scopes_with_playlist() {
        let config = GateConfig::new("artist".to_string()).with_playlist_id("pl".to_string());
        assert_eq!(
            config.scopes(),
            "user-follow-read user-follow-modify playlist-modify-public playlist-modify-private"
        );
    }

    #[test]
    fn satisfied_requires_every_resource() {
        assert!(FollowStatus {
            artist: true,
            playlist: None
        }
        .satisfied());
        assert!(FollowStatus {
            artist: true,
            playlist: Some(true)
        }
        .satisfied());
        assert!(!FollowStatus {
            artist: true,
            playlist: Some(false)
        }
        .satisfied());
        assert!(!FollowStatus {
            artist: false,
            playlist: None
        }
        .satisfied());
        assert!(!FollowStatus {
            artist: false,
            playlist: Some(true)
        }
        .satisfied());
    }
}
