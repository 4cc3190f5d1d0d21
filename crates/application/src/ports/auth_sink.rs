//! Authentication failure sink port

/// Receiver for authentication-failure signals raised during dispatch.
///
/// The dispatcher reports through this port instead of importing a
/// concrete store, so classification logic stays testable against a
/// recording fake. The production implementation is the session store's
/// expiry handle.
pub trait AuthFailureSink: Send + Sync {
    /// Called once per call the platform rejected as unauthenticated.
    ///
    /// `message` carries the server-supplied explanation when the response
    /// body included one.
    fn auth_failure(&self, message: Option<&str>);
}
