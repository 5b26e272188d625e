use secrecy::SecretString;
use std::time::Duration;

const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
const DEFAULT_API_URL: &str = "https://api.spotify.com";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Remote-service credentials and endpoints, immutable for the process
/// lifetime and passed explicitly into every component.
#[derive(Clone)]
pub struct GlobalArgs {
    pub client_id: String,
    pub client_secret: SecretString,
    pub redirect_uri: String,
    pub accounts_url: String,
    pub api_url: String,
    pub http_timeout: Duration,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(client_id: String, client_secret: SecretString, redirect_uri: String) -> Self {
        Self {
            client_id,
            client_secret,
            redirect_uri,
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_accounts_url(mut self, accounts_url: String) -> Self {
        self.accounts_url = accounts_url;
        self
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: String) -> Self {
        self.api_url = api_url;
        self
    }

    #[must_use]
    pub fn with_http_timeout(mut self, http_timeout: Duration) -> Self {
        self.http_timeout = http_timeout;
        self
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("redirect_uri", &self.redirect_uri)
            .field("accounts_url", &self.accounts_url)
            .field("api_url", &self.api_url)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            "client-id".to_string(),
            SecretString::from("client-secret".to_string()),
            "https://gate.test/callback".to_string(),
        );
        assert_eq!(args.client_id, "client-id");
        assert_eq!(args.client_secret.expose_secret(), "client-secret");
        assert_eq!(args.accounts_url, "https://accounts.spotify.com");
        assert_eq!(args.api_url, "https://api.spotify.com");
        assert_eq!(args.http_timeout, Duration::from_secs(10));
    }

    #[test]
    fn debug_redacts_the_client_secret() {
        let args = GlobalArgs::new(
            "client-id".to_string(),
            SecretString::from("super-secret".to_string()),
            "https://gate.test/callback".to_string(),
        );
        let rendered = format!("{args:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
