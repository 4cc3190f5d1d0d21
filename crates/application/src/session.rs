//! Process-wide session state store.
//!
//! A thread-safe observable container over `tokio::sync::watch`, so any UI
//! subtree can react to session expiry without knowing which call produced
//! it. The store is a pure state container: classification lives in the
//! dispatcher, navigation lives above this crate.

use std::sync::Arc;

use alphadesk_domain::SessionState;
use tokio::sync::watch;

use crate::ports::AuthFailureSink;

/// Shared session state container.
///
/// Cloning is cheap; every clone observes and mutates the same state.
/// Writes are last-write-wins with no queuing or debouncing: a second
/// authentication failure while the expiry modal is already shown simply
/// re-asserts the flag and may replace the message.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
}

impl SessionStore {
    /// Creates a store in the initial (valid) state.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionState::initial());
        Self { tx: Arc::new(tx) }
    }

    /// Sets or clears the expired flag.
    pub fn set_session_expired(&self, expired: bool) {
        self.tx.send_modify(|state| state.expired = expired);
    }

    /// Replaces the human-readable expiry explanation.
    pub fn set_auth_error_message(&self, message: Option<String>) {
        self.tx.send_modify(|state| state.auth_message = message);
    }

    /// UI acknowledgement: returns the store to its initial state.
    ///
    /// Any subscriber may call this (the "OK" button on the expiry
    /// modal); setting the flag back to true is reserved to the dispatch
    /// path via [`SessionStore::expiry_sink`].
    pub fn acknowledge(&self) {
        self.tx.send_modify(|state| *state = SessionState::initial());
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Subscribes for change notifications.
    #[must_use]
    pub fn subscribe(&self) -> SessionWatcher {
        SessionWatcher {
            rx: self.tx.subscribe(),
        }
    }

    /// Returns the write handle handed to dispatchers.
    ///
    /// Composition roots pass this sink to the client pair and keep the
    /// store itself for UI code, which keeps the expired-flag write path
    /// confined to dispatch.
    #[must_use]
    pub fn expiry_sink(&self) -> SessionExpirySink {
        SessionExpirySink {
            store: self.clone(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscription handle for UI re-render on session changes.
#[derive(Debug)]
pub struct SessionWatcher {
    rx: watch::Receiver<SessionState>,
}

impl SessionWatcher {
    /// Waits until the state changes, then returns the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store has been dropped.
    pub async fn changed(&mut self) -> Result<SessionState, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Returns the latest value without waiting, marking it seen.
    #[must_use]
    pub fn current(&mut self) -> SessionState {
        self.rx.borrow_and_update().clone()
    }
}

/// Dispatcher-side write handle implementing the auth-failure port.
#[derive(Debug, Clone)]
pub struct SessionExpirySink {
    store: SessionStore,
}

impl AuthFailureSink for SessionExpirySink {
    fn auth_failure(&self, message: Option<&str>) {
        // Single write so subscribers never observe the flag without its message.
        self.store.tx.send_modify(|state| {
            state.expired = true;
            if let Some(message) = message {
                state.auth_message = Some(message.to_owned());
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_starts_in_initial_state() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot(), SessionState::initial());
    }

    #[test]
    fn test_set_session_expired_is_idempotent() {
        let store = SessionStore::new();
        store.set_session_expired(true);
        let once = store.snapshot();
        store.set_session_expired(true);
        assert_eq!(store.snapshot(), once);
        assert!(once.expired);
    }

    #[test]
    fn test_reset_law() {
        let store = SessionStore::new();
        store.set_session_expired(true);
        store.set_auth_error_message(Some("token expired".to_owned()));

        store.set_session_expired(false);
        store.set_auth_error_message(None);
        assert_eq!(store.snapshot(), SessionState::initial());
    }

    #[test]
    fn test_acknowledge_resets() {
        let store = SessionStore::new();
        store.expiry_sink().auth_failure(Some("token expired"));
        assert!(store.snapshot().expired);

        store.acknowledge();
        assert!(store.snapshot().is_initial());
    }

    #[test]
    fn test_sink_sets_flag_and_message() {
        let store = SessionStore::new();
        store.expiry_sink().auth_failure(Some("token expired"));
        assert_eq!(
            store.snapshot(),
            SessionState::expired_with(Some("token expired".to_owned()))
        );
    }

    #[test]
    fn test_sink_without_message_keeps_previous() {
        let store = SessionStore::new();
        store.expiry_sink().auth_failure(Some("token expired"));
        store.expiry_sink().auth_failure(None);
        assert_eq!(
            store.snapshot(),
            SessionState::expired_with(Some("token expired".to_owned()))
        );
    }

    #[test]
    fn test_last_message_wins() {
        let store = SessionStore::new();
        let sink = store.expiry_sink();
        sink.auth_failure(Some("token expired"));
        sink.auth_failure(Some("session revoked"));
        assert_eq!(
            store.snapshot().auth_message.as_deref(),
            Some("session revoked")
        );
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let store = SessionStore::new();
        let mut watcher = store.subscribe();
        assert!(watcher.current().is_initial());

        store.expiry_sink().auth_failure(Some("token expired"));
        let state = watcher.changed().await.expect("store alive");
        assert!(state.expired);
        assert_eq!(state.auth_message.as_deref(), Some("token expired"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = SessionStore::new();
        let clone = store.clone();
        clone.set_session_expired(true);
        assert!(store.snapshot().expired);
    }
}
