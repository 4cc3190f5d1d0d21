//! HTTP transport port

use std::future::Future;
use std::pin::Pin;

use alphadesk_domain::{ApiRequest, ApiResponse, FailureClass};
use thiserror::Error;

/// Port for issuing HTTP calls.
///
/// One implementation exists per execution context; both share this
/// contract. A `send` performs exactly one network call with no hidden
/// queuing. Retries, if a caller ever wants them, live above this
/// boundary: retrying an unauthenticated call without re-authenticating
/// is never safe.
pub trait HttpTransport: Send + Sync {
    /// Issues the request and resolves with the raw response.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` when no HTTP response was produced
    /// (timeout, connection failure, invalid request construction).
    fn send(
        &self,
        request: &ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>>;
}

/// Failures raised below the HTTP response layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request URL could not be constructed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// No response arrived within the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The host could not be resolved.
    #[error("DNS resolution failed for {host}: {message}")]
    Dns {
        /// The host that failed to resolve.
        host: String,
        /// The resolver's message.
        message: String,
    },

    /// The host refused the connection.
    #[error("connection refused by {host}")]
    ConnectionRefused {
        /// The refusing host.
        host: String,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A transport failure with no dedicated variant.
    #[error("transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Maps the failure into the gateway taxonomy.
    ///
    /// Request-construction failures never reached the wire and classify
    /// as validation; everything else is a network fault. A timeout is
    /// always a network fault, never an authentication one.
    #[must_use]
    pub const fn failure_class(&self) -> FailureClass {
        match self {
            Self::InvalidUrl(_) | Self::InvalidBody(_) => FailureClass::Validation,
            _ => FailureClass::Network,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failures_classify_as_network() {
        assert_eq!(
            TransportError::Timeout { timeout_ms: 5000 }.failure_class(),
            FailureClass::Network
        );
        assert_eq!(
            TransportError::ConnectionRefused {
                host: "api.example.com".to_owned()
            }
            .failure_class(),
            FailureClass::Network
        );
    }

    #[test]
    fn test_construction_failures_classify_as_validation() {
        assert_eq!(
            TransportError::InvalidUrl("::bad::".to_owned()).failure_class(),
            FailureClass::Validation
        );
        assert_eq!(
            TransportError::InvalidBody("not serializable".to_owned()).failure_class(),
            FailureClass::Validation
        );
    }
}
