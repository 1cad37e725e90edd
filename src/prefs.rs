//! Persisted user preferences
//!
//! Small key/value settings that outlive a session: the active collection,
//! capture and sound toggles, custom collection labels and the first-launch
//! marker.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::collection::HighlighterColor;

/// Longest custom label a collection may carry
pub const MAX_LABEL_CHARS: usize = 12;

/// How long a recorded self-copy waits for a watcher to skip it
pub const SELF_COPY_WINDOW_SECS: i64 = 10;

/// Preference errors
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to access preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Stored preference values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Collection new captures are routed into
    #[serde(default)]
    pub active_color: HighlighterColor,

    /// Whether clipboard capture is running
    #[serde(default = "default_true")]
    pub monitoring_enabled: bool,

    /// Whether sound effects play
    #[serde(default = "default_true")]
    pub sound_enabled: bool,

    /// Custom labels keyed by full collection name
    #[serde(default)]
    pub color_labels: BTreeMap<String, String>,

    /// Set once the first launch has been seen
    #[serde(default)]
    pub has_launched_before: bool,

    /// Text NibNab itself just put on the clipboard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_copy: Option<SelfCopy>,
}

/// Digest of a clipboard write made by NibNab, shared across processes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfCopy {
    pub digest: String,
    pub at: DateTime<Utc>,
}

fn text_digest(text: &str) -> String {
    format!("{:x}", md5::compute(text))
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            active_color: HighlighterColor::default(),
            monitoring_enabled: default_true(),
            sound_enabled: default_true(),
            color_labels: BTreeMap::new(),
            has_launched_before: false,
            self_copy: None,
        }
    }
}

impl Preferences {
    /// Custom label for a collection, if one is set
    pub fn label(&self, color: HighlighterColor) -> Option<&str> {
        self.color_labels
            .get(color.name())
            .map(String::as_str)
            .filter(|label| !label.is_empty())
    }

    /// Set or clear a custom label
    ///
    /// The label is trimmed and cut to [`MAX_LABEL_CHARS`]; a blank label
    /// removes the entry. Returns the stored label.
    pub fn set_label(&mut self, color: HighlighterColor, label: &str) -> Option<String> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            self.color_labels.remove(color.name());
            return None;
        }

        let limited: String = trimmed.chars().take(MAX_LABEL_CHARS).collect();
        self.color_labels
            .insert(color.name().to_string(), limited.clone());
        Some(limited)
    }

    /// Record that `text` is about to be put on the clipboard by NibNab
    pub fn mark_self_copy(&mut self, text: &str, now: DateTime<Utc>) {
        self.self_copy = Some(SelfCopy {
            digest: text_digest(text),
            at: now,
        });
    }

    /// Consume a recorded self-copy matching `text`
    ///
    /// Returns true when `text` is the pending self-copy and it is younger
    /// than [`SELF_COPY_WINDOW_SECS`]. Any other text, or a stale record,
    /// clears the record and returns false.
    pub fn take_self_copy(&mut self, text: &str, now: DateTime<Utc>) -> bool {
        match self.self_copy.take() {
            Some(pending) => {
                pending.digest == text_digest(text)
                    && now - pending.at <= Duration::seconds(SELF_COPY_WINDOW_SECS)
            }
            None => false,
        }
    }
}

/// Backing store for preferences
pub trait PreferenceStore: Send + Sync {
    /// Read stored preferences, falling back to defaults when none exist
    fn load(&self) -> Result<Preferences, PreferenceError>;

    /// Persist preferences
    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError>;
}

/// Preferences kept in a TOML file
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
}

impl TomlPreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Preferences::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(prefs)?)?;
        Ok(())
    }
}

/// Preferences held in memory only
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    stored: Mutex<Option<Preferences>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing values
    pub fn with(prefs: Preferences) -> Self {
        Self {
            stored: Mutex::new(Some(prefs)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences, PreferenceError> {
        let stored = self.stored.lock().unwrap_or_else(|p| p.into_inner());
        Ok(stored.clone().unwrap_or_default())
    }

    fn save(&self, prefs: &Preferences) -> Result<(), PreferenceError> {
        let mut stored = self.stored.lock().unwrap_or_else(|p| p.into_inner());
        *stored = Some(prefs.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.active_color, HighlighterColor::Yellow);
        assert!(prefs.monitoring_enabled);
        assert!(prefs.sound_enabled);
        assert!(!prefs.has_launched_before);
    }

    #[test]
    fn test_label_rules() {
        let mut prefs = Preferences::default();
        assert_eq!(
            prefs.set_label(HighlighterColor::Pink, "  Research notes for thesis "),
            Some("Research not".to_string())
        );
        assert_eq!(prefs.label(HighlighterColor::Pink), Some("Research not"));

        assert_eq!(prefs.set_label(HighlighterColor::Pink, "   "), None);
        assert_eq!(prefs.label(HighlighterColor::Pink), None);
    }

    #[test]
    fn test_toml_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlPreferenceStore::new(temp_dir.path().join("nested/prefs.toml"));
        assert_eq!(store.load().unwrap(), Preferences::default());

        let mut prefs = Preferences::default();
        prefs.active_color = HighlighterColor::Green;
        prefs.sound_enabled = false;
        prefs.set_label(HighlighterColor::Green, "Quotes");
        store.save(&prefs).unwrap();

        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_self_copy_is_taken_once() {
        let now = Utc::now();
        let mut prefs = Preferences::default();
        assert!(!prefs.take_self_copy("copied", now));

        prefs.mark_self_copy("copied", now);
        assert!(prefs.take_self_copy("copied", now + Duration::seconds(1)));
        assert!(!prefs.take_self_copy("copied", now + Duration::seconds(1)));

        prefs.mark_self_copy("copied", now);
        assert!(!prefs.take_self_copy("something else", now));
        assert!(prefs.self_copy.is_none());

        prefs.mark_self_copy("copied", now);
        assert!(!prefs.take_self_copy(
            "copied",
            now + Duration::seconds(SELF_COPY_WINDOW_SECS + 1)
        ));
    }

    #[test]
    fn test_self_copy_round_trips_through_toml() {
        let temp_dir = TempDir::new().unwrap();
        let store = TomlPreferenceStore::new(temp_dir.path().join("prefs.toml"));

        let mut prefs = Preferences::default();
        prefs.set_label(HighlighterColor::Orange, "Code");
        prefs.mark_self_copy("copied", Utc::now());
        store.save(&prefs).unwrap();

        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let prefs: Preferences = toml::from_str("active_color = \"purple\"").unwrap();
        assert_eq!(prefs.active_color, HighlighterColor::Purple);
        assert!(prefs.monitoring_enabled);
    }
}
