//! Audible and visual feedback hooks

use std::io;
use tracing::{debug, info};

use crate::collection::HighlighterColor;

/// Sound effects played on store changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// A clip was captured
    Purr,
    /// A clip was deleted
    Tink,
    /// A collection was cleared
    Basso,
    /// A clip was moved or edited, or the active color changed
    Pop,
}

impl Sound {
    /// System sound name
    pub fn name(self) -> &'static str {
        match self {
            Sound::Purr => "Purr",
            Sound::Tink => "Tink",
            Sound::Basso => "Basso",
            Sound::Pop => "Pop",
        }
    }
}

/// Receives feedback requests from the clip store
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Play a sound without waiting for it to finish
    fn play_sound(&self, sound: Sound);

    /// Show a short status message tinted with a collection color
    fn show_toast(&self, message: &str, color: HighlighterColor);
}

/// Notifier that ignores every request
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn play_sound(&self, _sound: Sound) {}

    fn show_toast(&self, _message: &str, _color: HighlighterColor) {}
}

/// Plays system sounds where available and logs toasts
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn play_sound(&self, sound: Sound) {
        #[cfg(target_os = "macos")]
        {
            let path = format!("/System/Library/Sounds/{}.aiff", sound.name());
            if let Err(e) = spawn_reaped("afplay", &[&path]) {
                debug!("Could not play {}: {}", sound.name(), e);
            }
        }

        #[cfg(not(target_os = "macos"))]
        {
            debug!("Sound: {}", sound.name());
        }
    }

    fn show_toast(&self, message: &str, color: HighlighterColor) {
        info!("[{}] {}", color.short_name(), message);
    }
}

/// Start a child process without blocking and wait for it in the background
///
/// Inside a tokio runtime the child is awaited on a task; otherwise a helper
/// thread waits for it.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn spawn_reaped(program: &str, args: &[&str]) -> io::Result<()> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            let _guard = handle.enter();
            let mut child = tokio::process::Command::new(program).args(args).spawn()?;
            let program = program.to_string();
            handle.spawn(async move {
                if let Err(e) = child.wait().await {
                    debug!("Waiting for {} failed: {}", program, e);
                }
            });
        }
        Err(_) => {
            let mut child = std::process::Command::new(program).args(args).spawn()?;
            std::thread::spawn(move || child.wait());
        }
    }
    Ok(())
}
