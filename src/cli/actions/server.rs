use crate::api;
use crate::cli::globals::GlobalArgs;
use crate::gate::{FailureMode, GateConfig};
use anyhow::Result;
use secrecy::SecretString;
use std::time::Duration;
use tracing::debug;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub artist_id: String,
    pub playlist_id: Option<String>,
    pub success_url: Option<String>,
    pub failure_mode: FailureMode,
    pub failure_url: Option<String>,
    pub show_dialog: bool,
    pub accounts_url: String,
    pub api_url: String,
    pub http_timeout_seconds: u64,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let globals = GlobalArgs::new(
        args.client_id,
        SecretString::from(args.client_secret),
        args.redirect_uri,
    )
    .with_accounts_url(args.accounts_url)
    .with_api_url(args.api_url)
    .with_http_timeout(Duration::from_secs(args.http_timeout_seconds));

    let mut config = GateConfig::new(args.artist_id)
        .with_failure_mode(args.failure_mode)
        .with_show_dialog(args.show_dialog);

    if let Some(playlist_id) = args.playlist_id {
        config = config.with_playlist_id(playlist_id);
    }

    if let Some(success_url) = args.success_url {
        config = config.with_success_url(success_url);
    }

    if let Some(failure_url) = args.failure_url {
        config = config.with_failure_url(failure_url);
    }

    debug!("Global args: {:?}", globals);

    api::new(args.port, &globals, config).await
}
