//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpTransport` port with one constructor
//! per execution context. The interactive flavor keeps an ambient cookie
//! jar so platform session cookies ride along automatically; the
//! server-render flavor has no jar and attaches explicitly forwarded
//! credential headers instead.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use alphadesk_application::ports::{HttpTransport, TransportError};
use alphadesk_domain::{
    ApiRequest, ApiResponse, CredentialMode, Headers, HttpMethod, TransportConfig,
};
use reqwest::{Client, Method};

const USER_AGENT: &str = concat!("Alphadesk/", env!("CARGO_PKG_VERSION"));

/// Transport implementation backed by `reqwest::Client`.
///
/// Each instance is bound to one execution context at construction; the
/// credential policy cannot change afterwards and per-call options never
/// override it.
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
    /// Credential headers handed over at construction. Applied after all
    /// other headers so per-call overrides cannot displace them. Empty
    /// for the interactive context.
    forwarded: Headers,
}

impl ReqwestTransport {
    /// Builds the interactive-context transport.
    ///
    /// The underlying client keeps a cookie jar, so session credentials
    /// set by the platform are replayed on every subsequent call without
    /// the caller doing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not ambient-credential or
    /// the client cannot be constructed.
    pub fn interactive(config: TransportConfig) -> Result<Self, TransportError> {
        if config.credentials() != CredentialMode::Ambient {
            return Err(TransportError::Other(
                "interactive transport requires ambient credentials".to_owned(),
            ));
        }
        let client = Self::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self {
            client,
            config,
            forwarded: Headers::new(),
        })
    }

    /// Builds the server-render-context transport.
    ///
    /// No ambient storage exists in this context; `forwarded` carries the
    /// credential headers handed over by the render entry point (e.g. the
    /// inbound request's cookie header) and they are attached to every
    /// call made through this instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is not forwarded-credential
    /// or the client cannot be constructed.
    pub fn server_render(
        config: TransportConfig,
        forwarded: Headers,
    ) -> Result<Self, TransportError> {
        if config.credentials() != CredentialMode::Forwarded {
            return Err(TransportError::Other(
                "server-render transport requires forwarded credentials".to_owned(),
            ));
        }
        let client = Self::builder()
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;
        Ok(Self {
            client,
            config,
            forwarded,
        })
    }

    /// Returns the immutable configuration this transport was built with.
    #[must_use]
    pub const fn config(&self) -> &TransportConfig {
        &self.config
    }

    fn builder() -> reqwest::ClientBuilder {
        Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// Maps reqwest errors to the port's `TransportError`.
    fn map_error(error: &reqwest::Error, timeout: Duration) -> TransportError {
        let host = |error: &reqwest::Error| {
            error
                .url()
                .and_then(|u| u.host_str())
                .unwrap_or("unknown")
                .to_owned()
        };

        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }

        if error.is_connect() {
            let message = error.to_string();
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return TransportError::Dns {
                    host: host(error),
                    message,
                };
            }
            if lowered.contains("refused") {
                return TransportError::ConnectionRefused { host: host(error) };
            }
            return TransportError::ConnectionFailed(message);
        }

        TransportError::Other(error.to_string())
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(
        &self,
        request: &ApiRequest,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse, TransportError>> + Send + '_>> {
        // Resolve everything request-shaped before entering the async block.
        let endpoint = self.config.endpoint(&request.path);
        let method = Self::to_reqwest_method(request.method);
        let timeout = request.timeout_override.unwrap_or(self.config.timeout());
        // Per-call headers win over defaults; forwarded credentials win over both.
        let headers = self
            .forwarded
            .merged_over(&request.headers.merged_over(self.config.default_headers()));
        let body = request.body.clone();

        Box::pin(async move {
            let url = endpoint.map_err(|e| TransportError::InvalidUrl(e.to_string()))?;

            let start = Instant::now();
            let mut builder = self.client.request(method, url).timeout(timeout);
            for header in &headers {
                builder = builder.header(&header.name, &header.value);
            }
            if let Some(json) = body {
                builder = builder.json(&json);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| Self::map_error(&e, timeout))?;

            let status = response.status().as_u16();
            let response_headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_owned()))
                .collect();
            let body_bytes = response
                .bytes()
                .await
                .map_err(|e| TransportError::Other(format!("failed to read body: {e}")))?
                .to_vec();

            Ok(ApiResponse::new(
                status,
                response_headers,
                body_bytes,
                start.elapsed(),
            ))
        })
    }
}
