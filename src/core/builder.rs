//! Builder for constructing ChangeNotifier instances.

use crate::config::NotifierConfig;
use crate::core::ChangeNotifier;
use crate::error::Result;
use crate::sink::{LogSink, TracingSink};
use crate::transport::Transport;
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for constructing a [`ChangeNotifier`].
///
/// Configuration can come from an explicit [`NotifierConfig`], from a file,
/// from environment variables, or from file + environment combined (the
/// environment wins). An explicit config takes precedence over both.
///
/// # Examples
///
/// ```rust,no_run
/// use pushbridge::prelude::*;
///
/// # fn example() -> pushbridge::error::Result<()> {
/// let notifier = ChangeNotifier::builder()
///     .with_config_file("pushbridge.yaml")
///     .with_env_overrides("PUSHBRIDGE")
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ChangeNotifierBuilder {
    config: Option<NotifierConfig>,
    config_file: Option<PathBuf>,
    env_prefix: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    sink: Option<Arc<dyn LogSink>>,
}

impl ChangeNotifierBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: None,
            config_file: None,
            env_prefix: None,
            transport: None,
            sink: None,
        }
    }

    /// Use an explicit configuration object.
    ///
    /// Takes precedence over [`with_config_file`](Self::with_config_file) and
    /// [`with_env_overrides`](Self::with_env_overrides).
    pub fn with_config(mut self, config: NotifierConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from a file (YAML, TOML or JSON by extension).
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override configuration values from environment variables with the
    /// given prefix, e.g. `PUSHBRIDGE_API_KEY` for prefix `PUSHBRIDGE`.
    pub fn with_env_overrides(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Use a custom transport instead of the default HTTP one.
    pub fn with_transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a custom log sink instead of the default tracing-backed one.
    pub fn with_sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Build the notifier.
    ///
    /// Loads and validates the configuration, then wires up the transport
    /// (default: [`HttpTransport`](crate::transport::HttpTransport)) and sink
    /// (default: [`TracingSink`]).
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration source was given, loading or
    /// validation fails, or no transport is available.
    pub fn build(self) -> Result<ChangeNotifier> {
        let config = match self.config {
            Some(config) => config,
            None => NotifierConfig::load(self.config_file, self.env_prefix.as_deref())?,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => Self::default_transport()?,
        };

        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));

        // from_parts validates the config and parses its pattern once.
        ChangeNotifier::from_parts(config, transport, sink)
    }

    #[cfg(feature = "http")]
    fn default_transport() -> Result<Arc<dyn Transport>> {
        Ok(Arc::new(crate::transport::HttpTransport::new()?))
    }

    #[cfg(not(feature = "http"))]
    fn default_transport() -> Result<Arc<dyn Transport>> {
        Err(crate::error::NotifyError::Transport(
            "no transport configured and the 'http' feature is disabled".to_string(),
        ))
    }
}

impl Default for ChangeNotifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
