//! The log sink receiving one plain-text line per dispatch outcome.

/// Destination for the plain-text lines the dispatcher emits.
///
/// One line is written per dispatch: the raw provider response body on
/// success, or the transport error on failure. Implementations must be cheap
/// and non-blocking; the dispatch future does not resolve until the line has
/// been handed to the sink.
pub trait LogSink: Send + Sync {
    /// Record one line.
    fn line(&self, line: &str);
}

/// Default sink: forwards lines through [`tracing`] at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn line(&self, line: &str) {
        tracing::info!(target: "pushbridge::dispatch", "{}", line);
    }
}

impl<F> LogSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn line(&self, line: &str) {
        self(line)
    }
}
