//! Failure taxonomy and gateway error types.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::response::StatusCode;

/// Classification assigned to every failed call.
///
/// The classification alone decides whether session state is mutated:
/// only `Authentication` failures touch the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// The platform no longer accepts the session (401/403-class).
    Authentication,
    /// The request itself was rejected (any other 4xx).
    Validation,
    /// The platform failed to process the request (5xx).
    ServerFault,
    /// No HTTP response was produced (timeout, DNS, refused connection).
    Network,
}

impl FailureClass {
    /// Classifies an HTTP error status.
    ///
    /// Only meaningful for statuses of 400 and above; successful statuses
    /// never reach classification.
    #[must_use]
    pub const fn of_status(status: StatusCode) -> Self {
        if status.is_auth_failure() {
            Self::Authentication
        } else if status.is_client_error() {
            Self::Validation
        } else {
            Self::ServerFault
        }
    }

    /// Returns true if this classification mutates the session store.
    #[must_use]
    pub const fn mutates_session(self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Returns the classification as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::Validation => "validation",
            Self::ServerFault => "server_fault",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error surfaced to endpoint wrappers for every failed call.
///
/// Constructed per failure and never persisted. `status` is absent when
/// the request never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{class} failure ({}): {}",
    .status.map_or_else(|| "no response".to_owned(), |s| s.to_string()),
    .message.as_deref().unwrap_or("request failed")
)]
pub struct ApiError {
    /// HTTP status of the failed response, if one arrived.
    pub status: Option<StatusCode>,
    /// Server-supplied message, when the response body carried one.
    pub message: Option<String>,
    /// Taxonomy tag driving how callers and the session layer react.
    pub class: FailureClass,
}

impl ApiError {
    /// Builds an error from an HTTP error status and optional message.
    #[must_use]
    pub const fn from_status(status: StatusCode, message: Option<String>) -> Self {
        Self {
            status: Some(status),
            message,
            class: FailureClass::of_status(status),
        }
    }

    /// Builds an error for a failure that produced no HTTP response.
    #[must_use]
    pub fn no_response(class: FailureClass, message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
            class,
        }
    }

    /// Builds a local validation error for a request that was never sent.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::no_response(FailureClass::Validation, message)
    }

    /// Returns true if the failure was an authentication rejection.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        self.class.mutates_session()
    }
}

/// Result type alias for gateway calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Domain-level errors raised while constructing requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The path could not be joined against the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request body could not be serialized.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classification_table() {
        assert_eq!(
            FailureClass::of_status(StatusCode::new(401)),
            FailureClass::Authentication
        );
        assert_eq!(
            FailureClass::of_status(StatusCode::new(403)),
            FailureClass::Authentication
        );
        assert_eq!(
            FailureClass::of_status(StatusCode::new(404)),
            FailureClass::Validation
        );
        assert_eq!(
            FailureClass::of_status(StatusCode::new(422)),
            FailureClass::Validation
        );
        assert_eq!(
            FailureClass::of_status(StatusCode::new(500)),
            FailureClass::ServerFault
        );
        assert_eq!(
            FailureClass::of_status(StatusCode::new(503)),
            FailureClass::ServerFault
        );
    }

    #[test]
    fn test_only_authentication_mutates_session() {
        assert!(FailureClass::Authentication.mutates_session());
        assert!(!FailureClass::Validation.mutates_session());
        assert!(!FailureClass::ServerFault.mutates_session());
        assert!(!FailureClass::Network.mutates_session());
    }

    #[test]
    fn test_from_status_carries_message() {
        let error = ApiError::from_status(StatusCode::new(401), Some("token expired".to_owned()));
        assert_eq!(error.class, FailureClass::Authentication);
        assert_eq!(error.status, Some(StatusCode::new(401)));
        assert_eq!(error.message.as_deref(), Some("token expired"));
        assert!(error.is_authentication());
    }

    #[test]
    fn test_no_response_has_no_status() {
        let error = ApiError::no_response(FailureClass::Network, "connection refused");
        assert_eq!(error.status, None);
        assert!(!error.is_authentication());
    }

    #[test]
    fn test_error_display() {
        let error = ApiError::from_status(StatusCode::new(401), Some("token expired".to_owned()));
        assert_eq!(
            error.to_string(),
            "authentication failure (401 Unauthorized): token expired"
        );

        let error = ApiError::no_response(FailureClass::Network, "timed out");
        assert_eq!(error.to_string(), "network failure (no response): timed out");
    }
}
