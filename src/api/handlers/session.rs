//! Anti-forgery state token: generation, cookie handling, extraction.
//!
//! One token per in-flight login attempt. It is minted at `/login`, carried
//! only in a client-side cookie, and consumed at `/callback`; the server
//! stores nothing.

use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use rand::{distributions::Alphanumeric, Rng};

pub(crate) const STATE_COOKIE_NAME: &str = "seguimi_state";

const STATE_TOKEN_LENGTH: usize = 16;

// One hour, matching the window a login attempt stays actionable.
const STATE_COOKIE_MAX_AGE_SECONDS: u64 = 3600;

/// Mint a random alphanumeric state token.
pub(crate) fn generate_state_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Build the `HttpOnly` anti-forgery cookie for the login redirect.
pub(crate) fn state_cookie(token: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!(
        "{STATE_COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={STATE_COOKIE_MAX_AGE_SECONDS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Expire the anti-forgery cookie once the callback has consumed it.
pub(crate) fn clear_state_cookie(secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie = format!("{STATE_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}

/// Read the stored state token from the request cookies, if present.
pub(crate) fn extract_state_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == STATE_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}
