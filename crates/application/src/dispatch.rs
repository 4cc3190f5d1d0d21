//! Request dispatch and outcome classification.
//!
//! `ApiClient` is the single choke point every endpoint wrapper calls
//! through: it issues the transport call, classifies the outcome, and
//! reports authentication failures to the injected sink before the typed
//! error reaches the caller.

use std::sync::Arc;

use alphadesk_domain::{
    ApiError, ApiRequest, ApiResponse, ApiResult, ExecutionContext, FailureClass,
};
use serde::Serialize;

use crate::ports::{AuthFailureSink, HttpTransport, TransportError};

/// Dispatcher bound to one transport instance and one execution context.
///
/// Generic over the transport port so tests can inject a scripted fake.
/// The sink is invoked before an authentication failure is surfaced, so a
/// caller that abandons interest in the rejection still leaves the session
/// flag set.
pub struct ApiClient<T: HttpTransport> {
    transport: Arc<T>,
    sink: Arc<dyn AuthFailureSink>,
    context: ExecutionContext,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Creates a dispatcher over the given transport and sink.
    pub fn new(
        transport: Arc<T>,
        sink: Arc<dyn AuthFailureSink>,
        context: ExecutionContext,
    ) -> Self {
        Self {
            transport,
            sink,
            context,
        }
    }

    /// Returns the execution context this dispatcher serves.
    #[must_use]
    pub const fn context(&self) -> ExecutionContext {
        self.context
    }

    /// Sends the request and classifies the outcome.
    ///
    /// Exactly one network call is made. A request issued while the
    /// session is already flagged expired is still attempted: the flag is
    /// informational for UI, never a client-side circuit breaker, because
    /// only the platform can say whether a session is valid at call time.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] carrying the failure classification. An
    /// `Authentication` failure has already been reported to the sink by
    /// the time the error is returned.
    pub async fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        tracing::debug!(
            id = %request.id,
            method = %request.method,
            path = %request.path,
            context = %self.context,
            "dispatching request"
        );

        match self.transport.send(request).await {
            Ok(response) if !response.status.is_error() => Ok(response),
            Ok(response) => Err(self.reject_response(request, &response)),
            Err(error) => Err(Self::reject_transport(request, &error)),
        }
    }

    /// GET convenience wrapper.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get(&self, path: &str) -> ApiResult<ApiResponse> {
        self.send(&ApiRequest::get(path)).await
    }

    /// POST convenience wrapper with a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns a `Validation` failure if the payload cannot be
    /// serialized; otherwise see [`ApiClient::send`].
    pub async fn post_json<P: Serialize>(&self, path: &str, payload: &P) -> ApiResult<ApiResponse> {
        let request = ApiRequest::post(path)
            .with_json(payload)
            .map_err(|e| ApiError::invalid_request(e.to_string()))?;
        self.send(&request).await
    }

    fn reject_response(&self, request: &ApiRequest, response: &ApiResponse) -> ApiError {
        let error = ApiError::from_status(response.status, response.server_message());
        if error.class == FailureClass::Authentication {
            tracing::warn!(
                id = %request.id,
                status = response.status.as_u16(),
                context = %self.context,
                "authentication failure, flagging session as expired"
            );
            self.sink.auth_failure(error.message.as_deref());
        } else {
            tracing::debug!(
                id = %request.id,
                status = response.status.as_u16(),
                class = %error.class,
                "request rejected"
            );
        }
        error
    }

    fn reject_transport(request: &ApiRequest, error: &TransportError) -> ApiError {
        let class = error.failure_class();
        tracing::debug!(id = %request.id, %class, %error, "transport failure");
        ApiError::no_response(class, error.to_string())
    }
}
