//! The outbound notification payload.

use crate::config::NotifierConfig;
use serde::{Deserialize, Serialize};

/// Localized text block as the provider expects it.
///
/// Only English is populated; the payload shape leaves room for more locales
/// on the provider side but this crate sends a single fixed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// English text.
    pub en: String,
}

impl LocalizedText {
    /// Wrap a string as English-only localized text.
    pub fn en(text: impl Into<String>) -> Self {
        Self { en: text.into() }
    }
}

/// The fixed-shape request body POSTed to the provider.
///
/// Serializes to the provider's notification-submission contract:
///
/// ```json
/// {
///   "app_id": "...",
///   "included_segments": ["All"],
///   "headings": {"en": "..."},
///   "contents": {"en": "..."}
/// }
/// ```
///
/// Constructed fresh for every event, never stored. Every field comes from the
/// configuration; none comes from the event that triggered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Provider-side application identifier.
    pub app_id: String,
    /// Audience selector, e.g. `["All"]` for all subscribers.
    pub included_segments: Vec<String>,
    /// Notification title.
    pub headings: LocalizedText,
    /// Notification body.
    pub contents: LocalizedText,
}

impl NotificationRequest {
    /// Build the request from the current configuration.
    pub fn from_config(config: &NotifierConfig) -> Self {
        Self {
            app_id: config.app_id.clone(),
            included_segments: config.audience.clone(),
            headings: LocalizedText::en(&config.title),
            contents: LocalizedText::en(&config.body),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> NotifierConfig {
        NotifierConfig {
            app_id: "app-123".to_string(),
            api_key: "key-456".to_string(),
            watched_path: "/messages/{id}".to_string(),
            endpoint: "https://onesignal.com/api/v1/notifications".to_string(),
            title: "Database Updated".to_string(),
            body: "There's new content in your app!".to_string(),
            audience: vec!["All".to_string()],
        }
    }

    #[test]
    fn test_wire_shape() {
        let request = NotificationRequest::from_config(&sample_config());
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "app_id": "app-123",
                "included_segments": ["All"],
                "headings": {"en": "Database Updated"},
                "contents": {"en": "There's new content in your app!"}
            })
        );
    }

    #[test]
    fn test_payload_ignores_credentials() {
        let request = NotificationRequest::from_config(&sample_config());
        let text = serde_json::to_string(&request).unwrap();
        assert!(!text.contains("key-456"));
    }
}
