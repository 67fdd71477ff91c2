//! Error types for pushbridge.

/// Result type alias for pushbridge operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors that can occur while building or running a notifier.
///
/// A non-success response from the provider is deliberately NOT an error: the
/// provider's answer is only ever observed as raw response text on the log
/// sink. Only transport-level failures (connection, DNS, TLS) surface as
/// [`NotifyError::Transport`], and the dispatch path swallows even those after
/// logging them.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Failed to load configuration from a file or the environment.
    #[error("Failed to load configuration: {0}")]
    Config(String),

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    Validation(String),

    /// The watched-path pattern could not be parsed.
    #[error("Invalid watch pattern '{pattern}': {reason}")]
    Pattern {
        /// The offending pattern string
        pattern: String,
        /// Why it was rejected
        reason: String,
    },

    /// Failed to reach the provider (connection, DNS, or TLS failure).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Failed to serialize the notification payload.
    #[error("Failed to encode notification payload: {0}")]
    Encode(String),

    /// Config-file watching failed to initialize or lost its target.
    #[error("Watch error: {0}")]
    Watch(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotifyError {
    /// Create a pattern error.
    pub(crate) fn pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
