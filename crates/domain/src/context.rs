//! Execution context and credential sourcing tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The environment a call originates from.
///
/// The tag is always supplied explicitly by the caller; transports never
/// try to detect the environment they run in. Exactly one transport
/// instance serves each context, and the two are never mixed within a
/// single logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// An interactive user session where ambient credential storage
    /// (the cookie jar) attaches credentials automatically.
    #[default]
    Interactive,
    /// A server-side render, where no ambient storage exists and
    /// credentials must be handed over explicitly.
    ServerRender,
}

impl ExecutionContext {
    /// Returns true for the server-render context.
    #[must_use]
    pub const fn is_server_render(self) -> bool {
        matches!(self, Self::ServerRender)
    }

    /// Returns the context as a static string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::ServerRender => "server_render",
        }
    }

    /// The credential sourcing mode a transport for this context uses.
    #[must_use]
    pub const fn credential_mode(self) -> CredentialMode {
        match self {
            Self::Interactive => CredentialMode::Ambient,
            Self::ServerRender => CredentialMode::Forwarded,
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a transport instance sources credentials for outbound calls.
///
/// Fixed at construction; per-call options can override headers and
/// timeouts but never the credential policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialMode {
    /// Credentials ride along automatically from ambient storage.
    Ambient,
    /// Credentials are handed over explicitly at construction time.
    Forwarded,
}

impl fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ambient => "ambient",
            Self::Forwarded => "forwarded",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_credential_mode() {
        assert_eq!(
            ExecutionContext::Interactive.credential_mode(),
            CredentialMode::Ambient
        );
        assert_eq!(
            ExecutionContext::ServerRender.credential_mode(),
            CredentialMode::Forwarded
        );
    }

    #[test]
    fn test_context_display() {
        assert_eq!(ExecutionContext::Interactive.to_string(), "interactive");
        assert_eq!(ExecutionContext::ServerRender.to_string(), "server_render");
    }
}
