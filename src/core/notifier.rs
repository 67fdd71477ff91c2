//! The change notifier: one mutation event in, one provider POST out.

use crate::config::NotifierConfig;
use crate::error::Result;
use crate::event::{MutationEvent, WatchedPath};
use crate::payload::NotificationRequest;
use crate::sink::LogSink;
use crate::transport::Transport;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

#[cfg(feature = "config-watch")]
use crate::config::ConfigReloader;
#[cfg(feature = "config-watch")]
use std::path::Path;
#[cfg(feature = "config-watch")]
use std::time::Duration;

/// Bridges one data-store change-event source to one push-notification
/// provider.
///
/// Every matching mutation event produces exactly one outbound request with a
/// payload built purely from the configuration. The event's contents are
/// never inspected, so an update and a deletion send identical notifications.
/// Delivery is best effort: transport failures are logged and swallowed, and
/// nothing is retried.
///
/// The notifier holds no mutable state besides the hot-swappable
/// configuration, so concurrent dispatches never interfere.
///
/// # Examples
///
/// ```rust,no_run
/// use pushbridge::prelude::*;
/// use serde_json::json;
/// use std::sync::Arc;
/// use tokio::sync::mpsc;
///
/// # async fn example() -> pushbridge::error::Result<()> {
/// let notifier = Arc::new(
///     ChangeNotifier::builder()
///         .with_config_file("pushbridge.yaml")
///         .with_env_overrides("PUSHBRIDGE")
///         .build()?,
/// );
///
/// let (tx, rx) = mpsc::channel(64);
/// let dispatcher = tokio::spawn(Arc::clone(&notifier).run(rx));
///
/// tx.send(MutationEvent::created("/messages/abc", json!({"text": "hi"})))
///     .await
///     .ok();
///
/// // Closing the channel drains in-flight sends, then the loop returns.
/// drop(tx);
/// dispatcher.await.ok();
/// # Ok(())
/// # }
/// ```
pub struct ChangeNotifier {
    state: Arc<ArcSwap<ConfigState>>,
    transport: Arc<dyn Transport>,
    sink: Arc<dyn LogSink>,
}

/// A validated configuration plus its pattern, parsed once at install time so
/// the per-event read is a lock-free load with no parsing.
struct ConfigState {
    config: Arc<NotifierConfig>,
    watched: WatchedPath,
}

impl ConfigState {
    fn install(config: NotifierConfig) -> Result<Self> {
        config.validate()?;
        let watched = config.watched()?;
        Ok(Self {
            config: Arc::new(config),
            watched,
        })
    }
}

impl ChangeNotifier {
    /// Create a new builder for constructing a notifier.
    pub fn builder() -> super::ChangeNotifierBuilder {
        super::ChangeNotifierBuilder::new()
    }

    pub(crate) fn from_parts(
        config: NotifierConfig,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self> {
        Ok(Self {
            state: Arc::new(ArcSwap::new(Arc::new(ConfigState::install(config)?))),
            transport,
            sink,
        })
    }

    /// Snapshot of the current configuration.
    pub fn config(&self) -> Arc<NotifierConfig> {
        Arc::clone(&self.state.load().config)
    }

    /// Validate and atomically install a new configuration.
    ///
    /// Dispatches already in flight keep the snapshot they loaded; subsequent
    /// events see the new one.
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves the current configuration in
    /// place.
    pub fn update_config(&self, config: NotifierConfig) -> Result<()> {
        let state = ConfigState::install(config)?;
        self.state.store(Arc::new(state));
        Ok(())
    }

    /// Start reloading the configuration from `path` whenever it changes.
    ///
    /// The returned reloader stops watching when dropped.
    #[cfg(feature = "config-watch")]
    pub fn reload_on_change(
        &self,
        path: impl AsRef<Path>,
        debounce: Duration,
    ) -> Result<ConfigReloader> {
        let state = Arc::clone(&self.state);
        ConfigReloader::spawn(
            path,
            move |config| {
                // The reloader validated already, so this cannot fail.
                if let Ok(next) = ConfigState::install(config) {
                    state.store(Arc::new(next));
                }
            },
            debounce,
        )
    }

    /// Match a concrete path against the configured watched-path pattern,
    /// returning the captured wildcard segment.
    pub fn watches(&self, path: &str) -> Option<String> {
        self.state.load().watched.capture(path)
    }

    /// Handle one mutation event.
    ///
    /// Builds one [`NotificationRequest`] from the current configuration,
    /// submits it, and writes one line to the log sink: the raw response body
    /// on success, the transport error otherwise. The returned future
    /// resolves only after the request/response cycle has settled and the
    /// line has been written, so a hosting adapter awaiting it can safely
    /// release the invocation afterwards.
    ///
    /// The event itself is never inspected; it is the trigger, not an input
    /// to the payload. This method never fails from the caller's perspective.
    pub async fn on_mutation(&self, event: &MutationEvent) {
        let state = self.state.load();
        let request = NotificationRequest::from_config(&state.config);

        tracing::debug!(
            path = %event.path,
            kind = ?event.kind(),
            transport = %self.transport.name(),
            "dispatching notification"
        );

        match self.transport.submit(&state.config, &request).await {
            Ok(body) => self.sink.line(&format!("provider response: {}", body)),
            Err(e) => self.sink.line(&format!("provider error: {}", e)),
        }
    }

    /// Consume mutation events and dispatch one notification per matching
    /// event.
    ///
    /// Events outside the watched path are dropped. Each matching event is
    /// dispatched on its own task, so slow responses do not delay later
    /// events. When the sender side of the channel closes, the loop waits for
    /// every in-flight dispatch to settle before returning.
    pub async fn run(self: Arc<Self>, mut events: mpsc::Receiver<MutationEvent>) {
        let mut inflight = JoinSet::new();

        loop {
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => {
                        if self.watches(&event.path).is_none() {
                            tracing::debug!(path = %event.path, "event outside watched path, ignored");
                            continue;
                        }
                        let notifier = Arc::clone(&self);
                        inflight.spawn(async move {
                            notifier.on_mutation(&event).await;
                        });
                    }
                    None => break,
                },
                Some(_) = inflight.join_next(), if !inflight.is_empty() => {}
            }
        }

        // Channel closed: settle everything that was accepted.
        while inflight.join_next().await.is_some() {}
    }
}
