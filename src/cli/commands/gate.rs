use anyhow::{Context, Result};
use clap::{builder::PossibleValuesParser, Arg, ArgAction, Command};

use crate::gate::FailureMode;

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("artist-id")
                .long("artist-id")
                .help("Identifier of the gated artist")
                .env("SEGUIMI_ARTIST_ID")
                .required(true),
        )
        .arg(
            Arg::new("playlist-id")
                .long("playlist-id")
                .help("Identifier of the gated playlist; the playlist is only gated when set")
                .env("SEGUIMI_PLAYLIST_ID"),
        )
        .arg(
            Arg::new("success-url")
                .long("success-url")
                .help("Destination for visitors who pass the gate; a success page is rendered inline when unset")
                .env("SEGUIMI_SUCCESS_URL"),
        )
        .arg(
            Arg::new("failure-mode")
                .long("failure-mode")
                .help("How unsatisfied and failed callbacks are routed")
                .env("SEGUIMI_FAILURE_MODE")
                .default_value("render")
                .value_parser(PossibleValuesParser::new(["render", "redirect"])),
        )
        .arg(
            Arg::new("failure-url")
                .long("failure-url")
                .help("Destination for failed callbacks, required with --failure-mode=redirect")
                .env("SEGUIMI_FAILURE_URL"),
        )
        .arg(
            Arg::new("show-dialog")
                .long("show-dialog")
                .help("Force the remote consent dialog even for previously-approved users")
                .env("SEGUIMI_SHOW_DIALOG")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Debug)]
pub struct Options {
    pub artist_id: String,
    pub playlist_id: Option<String>,
    pub success_url: Option<String>,
    pub failure_mode: FailureMode,
    pub failure_url: Option<String>,
    pub show_dialog: bool,
}

impl Options {
    /// # Errors
    /// Returns an error if required arguments are missing.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let failure_mode = match matches
            .get_one::<String>("failure-mode")
            .map(String::as_str)
        {
            Some("redirect") => FailureMode::Redirect,
            _ => FailureMode::Render,
        };

        Ok(Self {
            artist_id: matches
                .get_one::<String>("artist-id")
                .cloned()
                .context("missing required argument: --artist-id")?,
            playlist_id: matches.get_one::<String>("playlist-id").cloned(),
            success_url: matches.get_one::<String>("success-url").cloned(),
            failure_mode,
            failure_url: matches.get_one::<String>("failure-url").cloned(),
            show_dialog: matches.get_flag("show-dialog"),
        })
    }
}
