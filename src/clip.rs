//! Captured clip records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source label for clips typed in by hand
pub const MANUAL_ENTRY_SOURCE: &str = "Manual Entry";

/// Source label used when the foreground application is unknown
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// A single captured snippet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clip {
    /// Identity for the lifetime of this session
    pub id: Uuid,
    /// Captured text, never blank
    pub text: String,
    /// Capture time
    pub timestamp: DateTime<Utc>,
    /// Foreground application at capture time
    pub source_app: String,
    /// Page the text came from, when a browser reported one
    pub source_url: Option<String>,
}

impl Clip {
    /// Create a clip captured now
    pub fn new(text: impl Into<String>, source_app: impl Into<String>) -> Self {
        Self::with_timestamp(text, source_app, Utc::now())
    }

    /// Create a clip with an explicit capture time
    pub fn with_timestamp(
        text: impl Into<String>,
        source_app: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            timestamp,
            source_app: source_app.into(),
            source_url: None,
        }
    }

    /// Attach a source URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Copy of this clip carrying new text; identity and metadata are kept
    pub fn edited(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// Number of characters in the text
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        is_blank(&self.text)
    }
}

/// True when the text is empty after trimming whitespace
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Source label that survives a ledger header
///
/// Names made only of whitespace or `|` would be blanked on write and
/// dropped on read, so they become [`UNKNOWN_SOURCE`].
pub fn source_label(source_app: &str) -> String {
    let trimmed = source_app.trim();
    if trimmed.chars().all(|c| c.is_whitespace() || c == '|') {
        UNKNOWN_SOURCE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edited_keeps_identity() {
        let clip = Clip::new("before", "TextEdit").with_url("https://example.com");
        let edited = clip.edited("after");
        assert_eq!(edited.id, clip.id);
        assert_eq!(edited.timestamp, clip.timestamp);
        assert_eq!(edited.source_app, "TextEdit");
        assert_eq!(edited.source_url.as_deref(), Some("https://example.com"));
        assert_eq!(edited.text, "after");
    }

    #[test]
    fn test_blank() {
        assert!(is_blank(" \n\t"));
        assert!(!is_blank(" x "));
        assert_eq!(Clip::new("héllo", "a").len(), 5);
    }

    #[test]
    fn test_source_label() {
        assert_eq!(source_label("  Safari "), "Safari");
        assert_eq!(source_label(""), UNKNOWN_SOURCE);
        assert_eq!(source_label(" | |\n"), UNKNOWN_SOURCE);
        assert_eq!(source_label("A | B"), "A | B");
    }
}
