//! reqwest-backed provider transport.

use super::Transport;
use crate::config::NotifierConfig;
use crate::error::{NotifyError, Result};
use crate::payload::NotificationRequest;
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// HTTP transport posting notification requests to the provider endpoint.
///
/// Sends `POST <endpoint>` with `Content-Type: application/json; charset=utf-8`
/// and the configured API key verbatim as the `Authorization` header. The
/// response body is returned as raw text regardless of status code: detecting
/// provider-side rejection is explicitly not this transport's job.
///
/// No request timeout is applied unless one is set on the builder; a hung
/// outbound call is bounded only by whatever limits the hosting runtime
/// imposes.
///
/// # Examples
///
/// ```rust,no_run
/// use pushbridge::transport::HttpTransport;
/// use std::time::Duration;
///
/// # fn example() -> pushbridge::error::Result<()> {
/// let transport = HttpTransport::builder()
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with default settings (no timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a new builder for constructing an HTTP transport.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(
        &self,
        config: &NotifierConfig,
        request: &NotificationRequest,
    ) -> Result<String> {
        let body = serde_json::to_vec(request).map_err(|e| NotifyError::Encode(e.to_string()))?;

        let response = self
            .client
            .post(&config.endpoint)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(AUTHORIZATION, config.api_key.as_str())
            .body(body)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        // No status check: a provider rejection is only visible as whatever
        // text it sent back.
        response
            .text()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))
    }

    fn name(&self) -> String {
        "http".to_string()
    }
}

/// Builder for constructing an [`HttpTransport`].
pub struct HttpTransportBuilder {
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self { timeout: None }
    }

    /// Set a request timeout.
    ///
    /// There is no timeout by default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<HttpTransport> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| NotifyError::Transport(format!("failed to create HTTP client: {}", e)))?;

        Ok(HttpTransport { client })
    }
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}
