//! Mutation events and the watched-path pattern they are matched against.

use crate::error::{NotifyError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// The kind of write that produced a [`MutationEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationKind {
    /// A value appeared where none existed.
    Create,
    /// An existing value changed.
    Update,
    /// A value was removed.
    Delete,
}

/// One change event emitted by the data store for a watched path.
///
/// Events are transient: consumed once, never persisted. The dispatcher never
/// inspects `before` or `after`; they are carried only so the event mirrors
/// what the data store actually emits, and so hosts can route on them if they
/// wish before handing the event over.
///
/// # Examples
///
/// ```rust
/// use pushbridge::event::{MutationEvent, MutationKind};
/// use serde_json::json;
///
/// let event = MutationEvent::created("/messages/abc123", json!({"text": "hi"}));
/// assert_eq!(event.kind(), MutationKind::Create);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MutationEvent {
    /// Full path of the changed value, e.g. `/messages/abc123`.
    pub path: String,
    /// Value before the write. `None` for creates.
    pub before: Option<JsonValue>,
    /// Value after the write. `None` for deletes.
    pub after: Option<JsonValue>,
}

impl MutationEvent {
    /// Build a create event (no prior value).
    pub fn created(path: impl Into<String>, after: JsonValue) -> Self {
        Self {
            path: path.into(),
            before: None,
            after: Some(after),
        }
    }

    /// Build an update event.
    pub fn updated(path: impl Into<String>, before: JsonValue, after: JsonValue) -> Self {
        Self {
            path: path.into(),
            before: Some(before),
            after: Some(after),
        }
    }

    /// Build a delete event (no value afterwards).
    pub fn deleted(path: impl Into<String>, before: JsonValue) -> Self {
        Self {
            path: path.into(),
            before: Some(before),
            after: None,
        }
    }

    /// Classify the event from the presence of its before/after states,
    /// the way write-trigger frameworks do.
    pub fn kind(&self) -> MutationKind {
        match (&self.before, &self.after) {
            (None, _) => MutationKind::Create,
            (Some(_), None) => MutationKind::Delete,
            (Some(_), Some(_)) => MutationKind::Update,
        }
    }
}

/// A slash-separated path pattern with exactly one `{wildcard}` segment.
///
/// Mirrors the trigger registration of write-event frameworks: a pattern like
/// `/messages/{id}` matches any write at `/messages/<id>` or below it, and
/// captures the segment the wildcard bound to.
///
/// # Examples
///
/// ```rust
/// use pushbridge::event::WatchedPath;
///
/// let watched = WatchedPath::parse("/messages/{id}").unwrap();
/// assert_eq!(watched.capture("/messages/abc"), Some("abc".to_string()));
/// assert_eq!(watched.capture("/messages/abc/body"), Some("abc".to_string()));
/// assert_eq!(watched.capture("/rooms/abc"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchedPath {
    pattern: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Wildcard(String),
}

impl WatchedPath {
    /// Parse a pattern string.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not start with `/`, contains an
    /// empty segment, or does not have exactly one `{wildcard}` segment.
    pub fn parse(pattern: &str) -> Result<Self> {
        let Some(rest) = pattern.strip_prefix('/') else {
            return Err(NotifyError::pattern(pattern, "must start with '/'"));
        };

        let mut segments = Vec::new();
        let mut wildcards = 0usize;
        for raw in rest.split('/') {
            if raw.is_empty() {
                return Err(NotifyError::pattern(pattern, "empty path segment"));
            }
            if let Some(name) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                if name.is_empty() {
                    return Err(NotifyError::pattern(pattern, "empty wildcard name"));
                }
                wildcards += 1;
                segments.push(Segment::Wildcard(name.to_string()));
            } else {
                segments.push(Segment::Literal(raw.to_string()));
            }
        }

        if wildcards != 1 {
            return Err(NotifyError::pattern(
                pattern,
                format!("expected exactly one {{wildcard}} segment, found {}", wildcards),
            ));
        }

        Ok(Self {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// Match a concrete path against this pattern.
    ///
    /// Paths at the pattern depth or below it match; the captured wildcard
    /// segment is returned. Paths above the pattern or diverging from it do
    /// not match.
    pub fn capture(&self, path: &str) -> Option<String> {
        let rest = path.strip_prefix('/')?;
        let mut parts = rest.split('/');

        let mut captured = None;
        for segment in &self.segments {
            let part = parts.next()?;
            if part.is_empty() {
                return None;
            }
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Wildcard(_) => captured = Some(part.to_string()),
            }
        }

        // Deeper writes under the matched child still count as a mutation
        // of that child.
        captured
    }

    /// The original pattern string, e.g. `/messages/{id}`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Name of the wildcard segment, e.g. `id` for `/messages/{id}`.
    pub fn wildcard_name(&self) -> &str {
        self.segments
            .iter()
            .find_map(|s| match s {
                Segment::Wildcard(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .unwrap_or_default()
    }
}
