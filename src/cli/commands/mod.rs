pub mod gate;
pub mod spotify;

use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

/// Cross-argument rules clap cannot express declaratively.
///
/// # Errors
/// Returns an error string when `--failure-mode redirect` is set without a
/// `--failure-url` to redirect to.
pub fn validate(matches: &clap::ArgMatches) -> Result<(), String> {
    if matches.get_one::<String>("failure-mode").map(String::as_str) == Some("redirect")
        && !matches.contains_id("failure-url")
    {
        return Err(
            "Missing required argument: --failure-url (required when --failure-mode=redirect)"
                .to_string(),
        );
    }
    Ok(())
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("seguimi")
        .about("OAuth2 follow gate for artist campaigns")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("3000")
                .env("SEGUIMI_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("client-id")
                .long("client-id")
                .help("OAuth2 client identifier issued by the remote service")
                .env("SEGUIMI_CLIENT_ID")
                .required(true),
        )
        .arg(
            Arg::new("client-secret")
                .long("client-secret")
                .help("OAuth2 client secret issued by the remote service")
                .env("SEGUIMI_CLIENT_SECRET")
                .required(true),
        )
        .arg(
            Arg::new("redirect-uri")
                .long("redirect-uri")
                .help("Callback URL registered with the remote service, example: https://gate.tld/callback")
                .env("SEGUIMI_REDIRECT_URI")
                .required(true),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("SEGUIMI_LOG_LEVEL")
                .global(true)
                .action(clap::ArgAction::Count)
                .value_parser(validator_log_level()),
        );

    let command = gate::with_args(command);
    spotify::with_args(command)
}
