//! Alphadesk Domain - Core gateway types
//!
//! This crate defines the domain model for the Alphadesk desk client
//! gateway. All types here are pure Rust with no I/O dependencies.

pub mod context;
pub mod error;
pub mod request;
pub mod response;
pub mod session;
pub mod transport;

pub use context::{CredentialMode, ExecutionContext};
pub use error::{ApiError, ApiResult, DomainError, DomainResult, FailureClass};
pub use request::{ApiRequest, Header, Headers, HttpMethod};
pub use response::{ApiResponse, StatusCode};
pub use session::SessionState;
pub use transport::TransportConfig;
