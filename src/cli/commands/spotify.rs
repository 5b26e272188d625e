use anyhow::Result;
use clap::{Arg, Command};

pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("accounts-url")
                .long("accounts-url")
                .help("Base URL of the remote accounts service (authorize and token endpoints)")
                .env("SEGUIMI_ACCOUNTS_URL")
                .default_value("https://accounts.spotify.com"),
        )
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Base URL of the remote Web API")
                .env("SEGUIMI_API_URL")
                .default_value("https://api.spotify.com"),
        )
        .arg(
            Arg::new("http-timeout-seconds")
                .long("http-timeout-seconds")
                .help("Timeout for each outbound call to the remote service")
                .env("SEGUIMI_HTTP_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub accounts_url: String,
    pub api_url: String,
    pub http_timeout_seconds: u64,
}

impl Options {
    /// # Errors
    /// Infallible in practice; defaults cover every argument.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        Ok(Self {
            accounts_url: matches
                .get_one::<String>("accounts-url")
                .cloned()
                .unwrap_or_else(|| "https://accounts.spotify.com".to_string()),
            api_url: matches
                .get_one::<String>("api-url")
                .cloned()
                .unwrap_or_else(|| "https://api.spotify.com".to_string()),
            http_timeout_seconds: matches
                .get_one::<u64>("http-timeout-seconds")
                .copied()
                .unwrap_or(10),
        })
    }
}
