//! Response types produced by the transport port.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns true if this is any error status (4xx or 5xx).
    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 >= 400 && self.0 < 600
    }

    /// Returns true for the unauthenticated/unauthorized statuses.
    #[must_use]
    pub const fn is_auth_failure(self) -> bool {
        matches!(self.0, 401 | 403)
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// Raw HTTP response handed back by a transport instance.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HashMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
    /// Wall-clock duration of the call.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new response.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers,
            body,
            duration,
        }
    }

    /// Decodes the body as JSON into the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> DomainResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| DomainError::InvalidBody(e.to_string()))
    }

    /// Returns the body as lossy UTF-8 text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Extracts the server-supplied message from an error body of the
    /// shape `{ "message": "..." }`, if present.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn response_with_body(status: u16, body: &[u8]) -> ApiResponse {
        ApiResponse::new(
            status,
            HashMap::new(),
            body.to_vec(),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn test_status_ranges() {
        assert!(StatusCode::new(200).is_success());
        assert!(StatusCode::new(404).is_client_error());
        assert!(StatusCode::new(502).is_server_error());
        assert!(StatusCode::new(404).is_error());
        assert!(!StatusCode::new(204).is_error());
    }

    #[test]
    fn test_auth_failure_statuses() {
        assert!(StatusCode::new(401).is_auth_failure());
        assert!(StatusCode::new(403).is_auth_failure());
        assert!(!StatusCode::new(400).is_auth_failure());
        assert!(!StatusCode::new(500).is_auth_failure());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StatusCode::new(401).to_string(), "401 Unauthorized");
        assert_eq!(StatusCode::new(418).to_string(), "418 Unknown");
    }

    #[test]
    fn test_json_decode() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Quote {
            symbol: String,
            last: f64,
        }

        let response = response_with_body(200, br#"{"symbol": "KOSPI", "last": 2650.5}"#);
        let quote: Quote = response.json().expect("valid body");
        assert_eq!(quote.symbol, "KOSPI");
    }

    #[test]
    fn test_server_message_extraction() {
        let response = response_with_body(401, br#"{"message": "token expired"}"#);
        assert_eq!(response.server_message().as_deref(), Some("token expired"));

        let response = response_with_body(401, b"not json");
        assert_eq!(response.server_message(), None);

        let response = response_with_body(401, br#"{"detail": "other shape"}"#);
        assert_eq!(response.server_message(), None);
    }
}
