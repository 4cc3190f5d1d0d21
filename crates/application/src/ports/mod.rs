//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the gateway core and external
//! systems. Each port is a trait implemented by adapters in the
//! infrastructure layer, or by UI-facing handles in this crate.

mod auth_sink;
mod transport;

pub use auth_sink::AuthFailureSink;
pub use transport::{HttpTransport, TransportError};
