//! Alphadesk desk client - Main Entry Point
//!
//! Initializes tracing, reads gateway settings from the environment,
//! composes the dual-context client pair, and issues a smoke request
//! against the platform.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use alphadesk_application::{ClientPair, SessionStore};
use alphadesk_domain::{CredentialMode, ExecutionContext, Headers};
use alphadesk_infrastructure::{GatewaySettings, ReqwestTransport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = GatewaySettings::from_env()?;
    tracing::info!(
        base_url = %settings.base_url,
        "starting Alphadesk v{}",
        env!("CARGO_PKG_VERSION")
    );

    // One store, one sink, two transports: UI keeps the store, the
    // dispatchers only ever see the sink.
    let store = SessionStore::new();
    let interactive =
        ReqwestTransport::interactive(settings.transport_config(CredentialMode::Ambient))?;
    let server_render = ReqwestTransport::server_render(
        settings.transport_config(CredentialMode::Forwarded),
        Headers::new(),
    )?;
    let clients = ClientPair::new(
        Arc::new(interactive),
        Arc::new(server_render),
        Arc::new(store.expiry_sink()),
    );

    match clients.select(ExecutionContext::Interactive).get("/health").await {
        Ok(response) => {
            tracing::info!(status = response.status.as_u16(), "platform reachable");
        }
        Err(error) => {
            tracing::warn!(%error, "smoke request failed");
        }
    }

    let session = store.snapshot();
    if session.expired {
        tracing::warn!(
            message = session.auth_message.as_deref().unwrap_or("session expired"),
            "re-authentication required"
        );
    }

    Ok(())
}
