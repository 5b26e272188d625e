//! # Seguimi (OAuth2 Follow Gate)
//!
//! `seguimi` gates access to a success destination behind a follow
//! relationship on a third-party music service. A visitor authenticates via
//! the service's OAuth2 authorization-code flow, the gate checks whether they
//! follow the configured artist (and optionally a playlist), and routes them
//! accordingly.
//!
//! ## Flow
//!
//! - `GET /login` issues an anti-forgery `state` token in a short-lived
//!   cookie and redirects to the remote authorize endpoint.
//! - `GET /callback` validates the echoed `state` against the cookie,
//!   exchanges the authorization code for a bearer token, and runs a
//!   read-only follow check. Followers are sent to the success destination;
//!   everyone else gets the "please follow" page.
//! - `GET /follow` performs the follow mutations on behalf of the user and
//!   re-verifies them before reporting success.
//!
//! ## State model
//!
//! The server keeps no session state. The only client-visible state is the
//! anti-forgery cookie, created at `/login` and consumed at `/callback`.
//! Bearer tokens are used within a single request and never persisted.

pub mod api;
pub mod cli;
pub mod gate;
pub mod spotify;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
