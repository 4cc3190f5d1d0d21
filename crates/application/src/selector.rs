//! Context selector over the two pre-built dispatchers.

use std::sync::Arc;

use alphadesk_domain::ExecutionContext;

use crate::dispatch::ApiClient;
use crate::ports::{AuthFailureSink, HttpTransport};

/// The pair of dispatchers, one per execution context.
///
/// Selection is driven by the caller's explicit context flag; nothing here
/// inspects the environment or performs I/O. Picking the wrong instance
/// for the calling context is a caller error, not a transport error; that
/// responsibility sits with the endpoint wrappers.
pub struct ClientPair<T: HttpTransport> {
    interactive: ApiClient<T>,
    server_render: ApiClient<T>,
}

impl<T: HttpTransport> ClientPair<T> {
    /// Builds both dispatchers over the given transports.
    ///
    /// Both share the same sink, so an authentication failure lands in the
    /// same session store regardless of which context produced it.
    pub fn new(
        interactive: Arc<T>,
        server_render: Arc<T>,
        sink: Arc<dyn AuthFailureSink>,
    ) -> Self {
        Self {
            interactive: ApiClient::new(
                interactive,
                Arc::clone(&sink),
                ExecutionContext::Interactive,
            ),
            server_render: ApiClient::new(server_render, sink, ExecutionContext::ServerRender),
        }
    }

    /// Returns the dispatcher bound to `context`.
    #[must_use]
    pub const fn select(&self, context: ExecutionContext) -> &ApiClient<T> {
        match context {
            ExecutionContext::Interactive => &self.interactive,
            ExecutionContext::ServerRender => &self.server_render,
        }
    }

    /// Returns the interactive-context dispatcher.
    #[must_use]
    pub const fn interactive(&self) -> &ApiClient<T> {
        &self.interactive
    }

    /// Returns the server-render-context dispatcher.
    #[must_use]
    pub const fn server_render(&self) -> &ApiClient<T> {
        &self.server_render
    }
}
