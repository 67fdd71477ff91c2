//! # pushbridge
//!
//! Best-effort bridge from data-store mutation events to a push-notification
//! provider.
//!
//! ## Overview
//!
//! `pushbridge` does one thing: every time a watched path in your data store
//! changes, it POSTs one fixed notification payload to the provider, logs the
//! raw response (or the transport error), and moves on. There is no retry, no
//! queue, no delivery guarantee. Failure is invisible to whoever wrote the
//! data, and that is the point.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pushbridge::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> pushbridge::error::Result<()> {
//! // Startup sequence: load config, build the notifier, spawn the dispatcher.
//! let notifier = Arc::new(
//!     ChangeNotifier::builder()
//!         .with_config_file("pushbridge.yaml")
//!         .with_env_overrides("PUSHBRIDGE")
//!         .build()?,
//! );
//!
//! let (events, rx) = mpsc::channel(64);
//! tokio::spawn(Arc::clone(&notifier).run(rx));
//!
//! // Feed it mutation events from your data-store adapter.
//! events
//!     .send(MutationEvent::created("/messages/abc", json!({"text": "hi"})))
//!     .await
//!     .ok();
//! # Ok(())
//! # }
//! ```
//!
//! ## Behavior
//!
//! - **One event, one POST**: no batching, no deduplication.
//! - **Payload is fixed**: title, body, audience and app id come from the
//!   configuration, never from the event. An update and a deletion send the
//!   same notification.
//! - **Settled before complete**: `on_mutation` resolves only after the HTTP
//!   cycle finishes and the outcome line hits the log sink, so hosting
//!   runtimes can safely release the invocation when it returns.
//! - **Errors are swallowed**: transport failures become log lines, never
//!   propagated errors. Provider-side rejections are not even detected; only
//!   the raw response text is logged.
//! - **Hot config**: the configuration can be swapped at runtime without
//!   touching in-flight dispatches.
//!
//! ## Feature Flags
//!
//! - `http` (default): reqwest-backed [`transport::HttpTransport`].
//! - `config-watch`: reload the configuration file on change.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod event;
pub mod payload;
pub mod sink;
pub mod transport;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::NotifierConfig;
    pub use crate::core::{ChangeNotifier, ChangeNotifierBuilder};
    pub use crate::error::{NotifyError, Result};
    pub use crate::event::{MutationEvent, MutationKind, WatchedPath};
    pub use crate::payload::NotificationRequest;
    pub use crate::sink::LogSink;
    pub use crate::transport::Transport;
}
