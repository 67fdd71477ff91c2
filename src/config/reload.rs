//! Hot reload of the notifier configuration file.
//!
//! Watches the config file and hands a freshly parsed [`NotifierConfig`] to an
//! installer callback when it changes. A file that fails to parse or validate
//! is ignored and the previous configuration stays live.

use crate::config::NotifierConfig;
use crate::error::{NotifyError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// Watches one configuration file and reloads it on change.
///
/// Each successful reload is validated and then passed to the installer
/// callback, which owns where the new configuration lands (typically
/// [`ChangeNotifier::reload_on_change`](crate::core::ChangeNotifier::reload_on_change)
/// wires this to the notifier's own config handle). Dropping the reloader
/// stops watching; the last installed configuration remains in effect.
///
/// # Examples
///
/// ```rust,no_run
/// use pushbridge::config::{ConfigReloader, NotifierConfig};
/// use arc_swap::ArcSwap;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # fn example() -> pushbridge::error::Result<()> {
/// let config = NotifierConfig::from_file("pushbridge.yaml")?;
/// let shared = Arc::new(ArcSwap::new(Arc::new(config)));
///
/// let target = Arc::clone(&shared);
/// let _reloader = ConfigReloader::spawn(
///     "pushbridge.yaml",
///     move |config| target.store(Arc::new(config)),
///     Duration::from_millis(500),
/// )?;
/// # Ok(())
/// # }
/// ```
pub struct ConfigReloader {
    // Held so the OS watch stays registered for the reloader's lifetime.
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl ConfigReloader {
    /// Start watching `path`, calling `install` with each valid reload.
    ///
    /// Rapid successive writes are coalesced: after the first change the
    /// reloader waits `debounce`, drains any further signals, then reloads
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Watch`] if the path cannot be resolved or the
    /// file watcher cannot be registered. Must be called from within a tokio
    /// runtime.
    pub fn spawn<F>(path: impl AsRef<Path>, install: F, debounce: Duration) -> Result<Self>
    where
        F: Fn(NotifierConfig) + Send + Sync + 'static,
    {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| NotifyError::Watch(format!("failed to resolve config path: {}", e)))?;

        let (change_tx, mut change_rx) = mpsc::unbounded_channel::<()>();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    let _ = change_tx.send(());
                }
            }
        })
        .map_err(|e| NotifyError::Watch(format!("failed to create file watcher: {}", e)))?;

        watcher
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| NotifyError::Watch(format!("failed to watch config file: {}", e)))?;

        let reload_path = path.clone();
        tokio::spawn(async move {
            while change_rx.recv().await.is_some() {
                sleep(debounce).await;
                while change_rx.try_recv().is_ok() {}

                match Self::reload(&reload_path) {
                    Ok(config) => {
                        install(config);
                        tracing::info!(
                            path = %reload_path.display(),
                            "notifier configuration reloaded"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %reload_path.display(),
                            error = %e,
                            "config reload failed, keeping previous configuration"
                        );
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            path,
        })
    }

    fn reload(path: &Path) -> Result<NotifierConfig> {
        let config = NotifierConfig::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// The canonicalized path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ChangeNotifier;
    use crate::payload::NotificationRequest;
    use crate::transport::Transport;
    use arc_swap::ArcSwap;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::time::Instant;

    fn write_config(path: &Path, api_key: &str) {
        fs::write(
            path,
            format!(
                "app_id: app-123\napi_key: {}\nwatched_path: /messages/{{id}}\n",
                api_key
            ),
        )
        .unwrap();
    }

    fn shared(path: &Path) -> Arc<ArcSwap<NotifierConfig>> {
        let config = NotifierConfig::from_file(path).unwrap();
        Arc::new(ArcSwap::new(Arc::new(config)))
    }

    fn spawn_into(
        path: &Path,
        target: Arc<ArcSwap<NotifierConfig>>,
    ) -> Result<ConfigReloader> {
        ConfigReloader::spawn(
            path,
            move |config| target.store(Arc::new(config)),
            Duration::from_millis(50),
        )
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reload_on_change() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pushbridge.yaml");
        write_config(&config_path, "first-key");

        let target = shared(&config_path);
        let _reloader = spawn_into(&config_path, Arc::clone(&target)).unwrap();

        write_config(&config_path, "second-key");

        let deadline = Instant::now() + Duration::from_secs(5);
        while target.load().api_key != "second-key" {
            assert!(Instant::now() < deadline, "reload never happened");
            sleep(Duration::from_millis(50)).await;
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_invalid_file_keeps_previous_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pushbridge.yaml");
        write_config(&config_path, "first-key");

        let target = shared(&config_path);
        let _reloader = spawn_into(&config_path, Arc::clone(&target)).unwrap();

        // Missing required fields: reload must be rejected.
        fs::write(&config_path, "title: broken\n").unwrap();

        sleep(Duration::from_millis(500)).await;
        assert_eq!(target.load().api_key, "first-key");
    }

    #[tokio::test]
    async fn test_spawn_nonexistent_path() {
        let result = ConfigReloader::spawn(
            "/nonexistent/pushbridge.yaml",
            |_config| {},
            Duration::from_millis(50),
        );
        assert!(matches!(result, Err(NotifyError::Watch(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_watched_path_is_canonical() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pushbridge.yaml");
        write_config(&config_path, "first-key");

        let reloader = spawn_into(&config_path, shared(&config_path)).unwrap();
        assert!(reloader.path().is_absolute());
    }

    struct NullTransport;

    #[async_trait]
    impl Transport for NullTransport {
        async fn submit(
            &self,
            _config: &NotifierConfig,
            _request: &NotificationRequest,
        ) -> Result<String> {
            Ok(String::new())
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_reload_updates_notifier_pattern() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("pushbridge.yaml");
        write_config(&config_path, "first-key");

        let notifier = ChangeNotifier::builder()
            .with_config_file(&config_path)
            .with_transport(NullTransport)
            .build()
            .unwrap();
        assert_eq!(notifier.watches("/messages/abc"), Some("abc".to_string()));

        let _reloader = notifier
            .reload_on_change(&config_path, Duration::from_millis(50))
            .unwrap();

        fs::write(
            &config_path,
            "app_id: app-123\napi_key: first-key\nwatched_path: /rooms/{room}\n",
        )
        .unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while notifier.watches("/rooms/r1").is_none() {
            assert!(Instant::now() < deadline, "pattern swap never happened");
            sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(notifier.watches("/messages/abc"), None);
    }
}
