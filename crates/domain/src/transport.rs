//! Transport configuration.

use std::time::Duration;

use url::Url;

use crate::context::CredentialMode;
use crate::error::{DomainError, DomainResult};
use crate::request::{Header, Headers};

/// Immutable configuration for one transport instance.
///
/// Two instances exist per process, one per execution context; they differ
/// only in how credentials are sourced. Everything here is fixed once the
/// transport is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    base_url: Url,
    timeout: Duration,
    default_headers: Headers,
    credentials: CredentialMode,
}

impl TransportConfig {
    /// Creates a configuration from a base URL, timeout, and credential
    /// mode. The base URL is normalized to end with a slash so relative
    /// paths join below it rather than replacing its last segment.
    #[must_use]
    pub fn new(mut base_url: Url, timeout: Duration, credentials: CredentialMode) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            base_url,
            timeout,
            default_headers: Headers::new(),
            credentials,
        }
    }

    /// Adds a default header sent on every call through this transport.
    #[must_use]
    pub fn with_default_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.add(Header::new(name, value));
        self
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-call timeout applied when a request carries no
    /// override.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the default headers.
    #[must_use]
    pub const fn default_headers(&self) -> &Headers {
        &self.default_headers
    }

    /// Returns the credential sourcing mode.
    #[must_use]
    pub const fn credentials(&self) -> CredentialMode {
        self.credentials
    }

    /// Joins a relative path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be joined into a valid URL.
    pub fn endpoint(&self, path: &str) -> DomainResult<Url> {
        let relative = path.trim_start_matches('/');
        self.base_url
            .join(relative)
            .map_err(|e| DomainError::InvalidUrl(format!("{e}: {path}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config(base: &str) -> TransportConfig {
        let url = Url::parse(base).expect("valid base");
        TransportConfig::new(url, Duration::from_secs(15), CredentialMode::Ambient)
    }

    #[test]
    fn test_endpoint_join_plain_host() {
        let config = config("https://api.example.com");
        let url = config.endpoint("/backtests/42").expect("joinable");
        assert_eq!(url.as_str(), "https://api.example.com/backtests/42");
    }

    #[test]
    fn test_endpoint_join_preserves_base_path() {
        let config = config("https://platform.example.com/api/v2");
        let url = config.endpoint("factors").expect("joinable");
        assert_eq!(url.as_str(), "https://platform.example.com/api/v2/factors");

        let url = config.endpoint("/factors").expect("joinable");
        assert_eq!(url.as_str(), "https://platform.example.com/api/v2/factors");
    }

    #[test]
    fn test_endpoint_keeps_query() {
        let config = config("https://api.example.com");
        let url = config.endpoint("news?theme=rates&page=2").expect("joinable");
        assert_eq!(url.query(), Some("theme=rates&page=2"));
    }

    #[test]
    fn test_default_headers() {
        let config = config("https://api.example.com").with_default_header("Accept", "application/json");
        assert_eq!(config.default_headers().get("accept"), Some("application/json"));
    }
}
