//! Clipboard abstraction layer
//!
//! The capture monitor only needs two things from the platform: a snapshot
//! of the clipboard with a change counter, and the name of the application
//! in front. Both sit behind traits so tests can drive them directly.

use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

#[cfg(target_os = "macos")]
pub mod macos;

/// Clipboard state at one instant
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClipboardSnapshot {
    /// Increases every time the clipboard contents change
    pub change_count: u64,
    /// Current text, when the clipboard holds any
    pub text: Option<String>,
}

/// Clipboard errors
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// Platform-specific error
    #[error("Platform error: {0}")]
    Platform(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Source the capture monitor polls
#[async_trait]
pub trait ClipboardSource: Send + Sync {
    /// Read the current clipboard state
    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError>;

    /// Replace the clipboard text
    async fn set_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Get provider name
    fn name(&self) -> &str;
}

/// Names the application the user is working in
pub trait AppNameProvider: Send + Sync {
    fn frontmost_app_name(&self) -> Option<String>;
}

/// Asks the operating system for the frontmost application
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAppName;

impl AppNameProvider for SystemAppName {
    fn frontmost_app_name(&self) -> Option<String> {
        #[cfg(target_os = "macos")]
        {
            macos::frontmost_app_name()
        }

        #[cfg(not(target_os = "macos"))]
        {
            None
        }
    }
}

/// Always reports the same application
#[derive(Debug, Clone)]
pub struct FixedAppName(pub String);

impl AppNameProvider for FixedAppName {
    fn frontmost_app_name(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Default)]
struct ChangeTracker {
    last_digest: Option<[u8; 16]>,
    change_count: u64,
}

/// System clipboard through `arboard`
///
/// `arboard` exposes no change counter, so one is derived from an md5 digest
/// of the text: a different digest counts as a change. Every `set_text`
/// counts as a change even when the text is unchanged.
#[derive(Debug, Default)]
pub struct ArboardClipboard {
    tracker: Mutex<ChangeTracker>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn observe(&self, text: Option<&str>) -> u64 {
        let digest = md5::compute(text.unwrap_or_default()).0;
        let mut tracker = self.tracker.lock().unwrap_or_else(|p| p.into_inner());
        if tracker.last_digest != Some(digest) {
            tracker.last_digest = Some(digest);
            tracker.change_count += 1;
        }
        tracker.change_count
    }

    fn record_write(&self, text: &str) {
        let mut tracker = self.tracker.lock().unwrap_or_else(|p| p.into_inner());
        tracker.last_digest = Some(md5::compute(text).0);
        tracker.change_count += 1;
    }
}

#[async_trait]
impl ClipboardSource for ArboardClipboard {
    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        let text = tokio::task::spawn_blocking(|| {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Platform(e.to_string()))?;
            match clipboard.get_text() {
                Ok(text) => Ok(Some(text)),
                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                Err(e) => Err(ClipboardError::Platform(e.to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::Platform(e.to_string()))??;

        let change_count = self.observe(text.as_deref());
        Ok(ClipboardSnapshot { change_count, text })
    }

    async fn set_text(&self, text: &str) -> Result<(), ClipboardError> {
        let owned = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Platform(e.to_string()))?;
            clipboard
                .set_text(owned)
                .map_err(|e| ClipboardError::Platform(e.to_string()))
        })
        .await
        .map_err(|e| ClipboardError::Platform(e.to_string()))??;

        self.record_write(text);
        Ok(())
    }

    fn name(&self) -> &str {
        "arboard"
    }
}
