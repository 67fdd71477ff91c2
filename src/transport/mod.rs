//! The transport seam between the dispatcher and the provider.

use crate::config::NotifierConfig;
use crate::error::Result;
use crate::payload::NotificationRequest;
use async_trait::async_trait;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder};

/// Trait for submitting one notification request to the provider.
///
/// Implement this to swap the real HTTP transport for something else (a test
/// double, a process-local provider, a recording proxy). The contract is the
/// raw one the dispatcher relies on:
///
/// - `submit` resolves only once the request/response cycle has settled.
/// - On any response the provider manages to return, the raw body text comes
///   back as `Ok`; transports must NOT inspect status codes or parse bodies.
/// - Only failures to complete the cycle at all (connection, DNS, TLS) are
///   errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit one request to the endpoint the configuration names.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`](crate::error::NotifyError::Transport)
    /// when the provider could not be reached.
    async fn submit(&self, config: &NotifierConfig, request: &NotificationRequest)
    -> Result<String>;

    /// Human-readable name for logging.
    fn name(&self) -> String {
        "transport".to_string()
    }
}
