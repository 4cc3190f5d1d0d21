//! Environment-sourced gateway settings.
//!
//! The base URL and timeout come from the process environment; everything
//! downstream consumes the typed `TransportConfig` built from them.

use std::time::Duration;

use alphadesk_domain::{CredentialMode, TransportConfig};
use thiserror::Error;
use url::Url;

/// Environment variable naming the platform base URL.
pub const BASE_URL_VAR: &str = "ALPHADESK_API_BASE_URL";
/// Environment variable naming the per-call timeout in milliseconds.
pub const TIMEOUT_MS_VAR: &str = "ALPHADESK_API_TIMEOUT_MS";

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Settings resolved from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySettings {
    /// Base URL every relative request path is joined against.
    pub base_url: Url,
    /// Per-call timeout applied when a request carries no override.
    pub timeout: Duration,
}

/// Errors raised while reading settings from the environment.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The base URL variable is missing.
    #[error("{BASE_URL_VAR} is not set")]
    MissingBaseUrl,

    /// The base URL variable does not parse as a URL.
    #[error("invalid base URL in {BASE_URL_VAR}: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    /// The timeout variable does not parse as milliseconds.
    #[error("invalid timeout in {TIMEOUT_MS_VAR}: {0}")]
    InvalidTimeout(#[from] std::num::ParseIntError),
}

impl GatewaySettings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or malformed, or the
    /// timeout is not a number of milliseconds.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::resolve(
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(TIMEOUT_MS_VAR).ok(),
        )
    }

    /// Builds the transport configuration for one credential mode.
    #[must_use]
    pub fn transport_config(&self, credentials: CredentialMode) -> TransportConfig {
        TransportConfig::new(self.base_url.clone(), self.timeout, credentials)
    }

    fn resolve(
        base_url: Option<String>,
        timeout_ms: Option<String>,
    ) -> Result<Self, SettingsError> {
        let base_url = base_url.ok_or(SettingsError::MissingBaseUrl)?;
        let base_url = Url::parse(&base_url)?;
        let timeout_ms = match timeout_ms {
            Some(raw) => raw.parse::<u64>()?,
            None => DEFAULT_TIMEOUT_MS,
        };
        Ok(Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_resolve_with_defaults() {
        let settings =
            GatewaySettings::resolve(Some("https://api.example.com".to_owned()), None)
                .expect("valid settings");
        assert_eq!(settings.base_url.as_str(), "https://api.example.com/");
        assert_eq!(settings.timeout, Duration::from_millis(DEFAULT_TIMEOUT_MS));
    }

    #[test]
    fn test_resolve_with_timeout() {
        let settings = GatewaySettings::resolve(
            Some("https://api.example.com".to_owned()),
            Some("2500".to_owned()),
        )
        .expect("valid settings");
        assert_eq!(settings.timeout, Duration::from_millis(2500));
    }

    #[test]
    fn test_missing_base_url() {
        let error = GatewaySettings::resolve(None, None).expect_err("missing");
        assert!(matches!(error, SettingsError::MissingBaseUrl));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            GatewaySettings::resolve(Some("not a url".to_owned()), None),
            Err(SettingsError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            GatewaySettings::resolve(
                Some("https://api.example.com".to_owned()),
                Some("soon".to_owned())
            ),
            Err(SettingsError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn test_transport_config_carries_mode() {
        let settings =
            GatewaySettings::resolve(Some("https://api.example.com".to_owned()), None)
                .expect("valid settings");
        let config = settings.transport_config(CredentialMode::Forwarded);
        assert_eq!(config.credentials(), CredentialMode::Forwarded);
        assert_eq!(config.timeout(), settings.timeout);
    }
}
