pub mod callback;
pub mod follow;
pub mod health;
pub mod home;
pub mod login;

pub(crate) mod session;

use crate::{cli::globals::GlobalArgs, gate::GateConfig};

/// Shared, read-only request state: credentials/endpoints plus gate policy.
#[derive(Debug, Clone)]
pub struct GateState {
    globals: GlobalArgs,
    config: GateConfig,
}

impl GateState {
    #[must_use]
    pub fn new(globals: GlobalArgs, config: GateConfig) -> Self {
        Self { globals, config }
    }

    #[must_use]
    pub fn globals(&self) -> &GlobalArgs {
        &self.globals
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Only mark cookies secure when the gate itself is served over HTTPS.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.globals.redirect_uri.starts_with("https://")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn state(redirect_uri: &str) -> GateState {
        GateState::new(
            GlobalArgs::new(
                "client-id".to_string(),
                SecretString::from("client-secret".to_string()),
                redirect_uri.to_string(),
            ),
            GateConfig::new("artist".to_string()),
        )
    }

    #[test]
    fn cookie_secure_follows_redirect_uri_scheme() {
        assert!(state("https://gate.tld/callback").cookie_secure());
        assert!(!state("http://localhost:3000/callback").cookie_secure());
    }
}
