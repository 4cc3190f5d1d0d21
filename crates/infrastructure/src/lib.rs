//! Alphadesk Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod settings;

pub use adapters::ReqwestTransport;
pub use settings::{GatewaySettings, SettingsError};
