//! Notifier configuration: the injected object that replaces every constant
//! the dispatch path needs.

use crate::error::{NotifyError, Result};
use crate::event::WatchedPath;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(feature = "config-watch")]
pub mod reload;

#[cfg(feature = "config-watch")]
pub use reload::ConfigReloader;

fn default_endpoint() -> String {
    "https://onesignal.com/api/v1/notifications".to_string()
}

fn default_title() -> String {
    "Database Updated".to_string()
}

fn default_body() -> String {
    "There's new content in your app!".to_string()
}

fn default_audience() -> Vec<String> {
    vec!["All".to_string()]
}

/// Configuration for a [`ChangeNotifier`](crate::core::ChangeNotifier).
///
/// `app_id`, `api_key` and `watched_path` must be provided; everything else
/// has a working default. Loadable from a file (YAML, TOML or JSON) with
/// environment-variable overrides, or constructed directly.
///
/// # Examples
///
/// ```rust,no_run
/// use pushbridge::config::NotifierConfig;
///
/// # fn example() -> pushbridge::error::Result<()> {
/// // PUSHBRIDGE_API_KEY overrides the file value
/// let config = NotifierConfig::load(Some("pushbridge.yaml"), Some("PUSHBRIDGE"))?;
/// config.validate()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotifierConfig {
    /// Provider-side application identifier.
    pub app_id: String,
    /// Static API key, sent verbatim as the `Authorization` header value.
    pub api_key: String,
    /// Watched path pattern with one `{wildcard}` segment, e.g. `/messages/{id}`.
    pub watched_path: String,
    /// Provider notification-submission endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Notification title text.
    #[serde(default = "default_title")]
    pub title: String,
    /// Notification body text.
    #[serde(default = "default_body")]
    pub body: String,
    /// Audience selector; `["All"]` targets every subscriber.
    #[serde(default = "default_audience")]
    pub audience: Vec<String>,
}

impl NotifierConfig {
    /// Load configuration from an optional file and optional environment
    /// overrides.
    ///
    /// File values load first; environment variables with the given prefix
    /// override them (`<PREFIX>_API_KEY` overrides `api_key`, using `__` as
    /// the nesting separator). At least one of the two sources must be given.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Config`] if no source is given, the file cannot
    /// be read or parsed, or a required field is missing after merging.
    pub fn load(file: Option<impl AsRef<Path>>, env_prefix: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();
        let mut have_source = false;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path.as_ref()));
            have_source = true;
        }

        if let Some(prefix) = env_prefix {
            // `separator` alone would also change the prefix separator to
            // "__"; the documented form is <PREFIX>_FIELD with a single
            // underscore, so pin it explicitly.
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__"),
            );
            have_source = true;
        }

        if !have_source {
            return Err(NotifyError::Config(
                "no configuration sources specified".to_string(),
            ));
        }

        let merged = builder
            .build()
            .map_err(|e| NotifyError::Config(e.to_string()))?;

        merged
            .try_deserialize()
            .map_err(|e| NotifyError::Config(e.to_string()))
    }

    /// Load configuration from a single file, no environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::load(Some(path), None)
    }

    /// Check the configuration for values the dispatch path cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Validation`] for empty credentials or audience,
    /// or a [`NotifyError::Pattern`] if the watched path does not parse.
    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(NotifyError::Validation("app_id must not be empty".to_string()));
        }
        if self.api_key.trim().is_empty() {
            return Err(NotifyError::Validation("api_key must not be empty".to_string()));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(NotifyError::Validation(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.audience.is_empty() {
            return Err(NotifyError::Validation(
                "audience must name at least one segment".to_string(),
            ));
        }
        self.watched()?;
        Ok(())
    }

    /// Parse the watched-path pattern.
    pub fn watched(&self) -> Result<WatchedPath> {
        WatchedPath::parse(&self.watched_path)
    }
}
