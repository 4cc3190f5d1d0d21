//! Session state value type.
//!
//! The process-wide description of whether the user session is known to be
//! invalid. The containing store lives in the application layer; this type
//! only captures the observable value and its two lawful transitions.

use serde::{Deserialize, Serialize};

/// Observable session state shared by all UI subscribers.
///
/// Initialized to the valid state at process start, never persisted, and
/// rebuilt fresh on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// True once the platform has rejected a call as unauthenticated.
    pub expired: bool,
    /// Server-supplied explanation for the rejection, when one was given.
    pub auth_message: Option<String>,
}

impl SessionState {
    /// The valid state every process starts in.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            expired: false,
            auth_message: None,
        }
    }

    /// The expired state with an optional explanation.
    #[must_use]
    pub const fn expired_with(auth_message: Option<String>) -> Self {
        Self {
            expired: true,
            auth_message,
        }
    }

    /// Returns true if the state equals the initial state.
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        !self.expired && self.auth_message.is_none()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_is_initial() {
        assert_eq!(SessionState::default(), SessionState::initial());
        assert!(SessionState::initial().is_initial());
    }

    #[test]
    fn test_expired_state() {
        let state = SessionState::expired_with(Some("token expired".to_owned()));
        assert!(state.expired);
        assert!(!state.is_initial());

        let state = SessionState::expired_with(None);
        assert!(state.expired);
        assert!(!state.is_initial());
    }
}
