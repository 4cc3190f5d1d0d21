//! Alphadesk Application - Gateway orchestration
//!
//! Ports, the session store, and the dispatch logic that turns transport
//! outcomes into typed failures and session updates.

pub mod dispatch;
pub mod ports;
pub mod selector;
pub mod session;

pub use dispatch::ApiClient;
pub use ports::{AuthFailureSink, HttpTransport, TransportError};
pub use selector::ClientPair;
pub use session::{SessionExpirySink, SessionStore, SessionWatcher};
