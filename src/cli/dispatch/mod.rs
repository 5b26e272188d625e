//! Command-line argument dispatch and server initialization.
//!
//! This module parses validated CLI arguments and maps them to the
//! appropriate action, such as starting the gate server with its full
//! configuration state.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{self, gate, spotify};
use anyhow::{Context, Result};

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>("port").copied().unwrap_or(3000);

    // Cross-argument validation (failure routing mode)
    commands::validate(matches).map_err(|e| anyhow::anyhow!(e))?;

    let client_id = matches
        .get_one::<String>("client-id")
        .cloned()
        .context("missing required argument: --client-id")?;

    let client_secret = matches
        .get_one::<String>("client-secret")
        .cloned()
        .context("missing required argument: --client-secret")?;

    let redirect_uri = matches
        .get_one::<String>("redirect-uri")
        .cloned()
        .context("missing required argument: --redirect-uri")?;

    let gate_opts = gate::Options::parse(matches)?;
    let spotify_opts = spotify::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        client_id,
        client_secret,
        redirect_uri,
        artist_id: gate_opts.artist_id,
        playlist_id: gate_opts.playlist_id,
        success_url: gate_opts.success_url,
        failure_mode: gate_opts.failure_mode,
        failure_url: gate_opts.failure_url,
        show_dialog: gate_opts.show_dialog,
        accounts_url: spotify_opts.accounts_url,
        api_url: spotify_opts.api_url,
        http_timeout_seconds: spotify_opts.http_timeout_seconds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::FailureMode;

    #[test]
    fn server_action_from_env() {
        temp_env::with_vars(
            [
                ("SEGUIMI_CLIENT_ID", Some("client-id")),
                ("SEGUIMI_CLIENT_SECRET", Some("client-secret")),
                ("SEGUIMI_REDIRECT_URI", Some("https://gate.tld/callback")),
                ("SEGUIMI_ARTIST_ID", Some("artist")),
                ("SEGUIMI_PLAYLIST_ID", None::<&str>),
                ("SEGUIMI_FAILURE_MODE", None),
                ("SEGUIMI_FAILURE_URL", None),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["seguimi"]);
                let action = handler(&matches).expect("handler should succeed");
                let Action::Server(args) = action;
                assert_eq!(args.port, 3000);
                assert_eq!(args.client_id, "client-id");
                assert_eq!(args.artist_id, "artist");
                assert_eq!(args.playlist_id, None);
                assert_eq!(args.failure_mode, FailureMode::Render);
                assert_eq!(args.http_timeout_seconds, 10);
            },
        );
    }

    #[test]
    fn redirect_mode_without_failure_url_is_rejected() {
        temp_env::with_vars(
            [
                ("SEGUIMI_CLIENT_ID", Some("client-id")),
                ("SEGUIMI_CLIENT_SECRET", Some("client-secret")),
                ("SEGUIMI_REDIRECT_URI", Some("https://gate.tld/callback")),
                ("SEGUIMI_ARTIST_ID", Some("artist")),
                ("SEGUIMI_FAILURE_MODE", Some("redirect")),
                ("SEGUIMI_FAILURE_URL", None::<&str>),
            ],
            || {
                let command = crate::cli::commands::new();
                let matches = command.get_matches_from(vec!["seguimi"]);
                let result = handler(&matches);
                assert!(result.is_err());
                if let Err(err) = result {
                    assert!(err.to_string().contains("--failure-url"));
                }
            },
        );
    }
}
