//! Clipboard capture monitor
//!
//! A cancellable periodic task polls a [`ClipboardSource`] and forwards new
//! text over a channel. The task never touches the clip store; whoever owns
//! the store drains the channel and calls `capture`.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::clip::{is_blank, UNKNOWN_SOURCE};
use crate::clipboard::{AppNameProvider, ClipboardError, ClipboardSource};

/// Default clipboard poll interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

const CHANNEL_CAPACITY: usize = 32;

/// Text picked up from the clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedText {
    pub text: String,
    pub source_app: String,
}

/// Whether the monitor is polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Active,
    Paused,
}

/// Receiving end of a monitor
pub struct CaptureWatcher {
    /// Channel receiver for captured text
    pub receiver: mpsc::Receiver<CapturedText>,
}

#[derive(Debug, Default)]
struct PollState {
    baseline: Option<u64>,
    last_captured: Option<String>,
    suppress_next: bool,
}

#[derive(Clone)]
struct Poller {
    source: Arc<dyn ClipboardSource>,
    apps: Arc<dyn AppNameProvider>,
    state: Arc<Mutex<PollState>>,
    sender: mpsc::Sender<CapturedText>,
}

impl Poller {
    fn lock(&self) -> std::sync::MutexGuard<'_, PollState> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Adopt the current clipboard as seen
    ///
    /// Any self-caused change is absorbed by the new baseline, so a pending
    /// suppression is dropped too.
    async fn rebaseline(&self) {
        match self.source.snapshot().await {
            Ok(snapshot) => {
                let mut state = self.lock();
                state.baseline = Some(snapshot.change_count);
                state.suppress_next = false;
            }
            Err(e) => warn!("Failed to read clipboard from {}: {}", self.source.name(), e),
        }
    }

    /// One poll; returns false once the receiver is gone
    async fn tick(&self) -> bool {
        let snapshot = match self.source.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Failed to read clipboard from {}: {}", self.source.name(), e);
                return true;
            }
        };

        let text = {
            let mut state = self.lock();
            if state.baseline == Some(snapshot.change_count) {
                return true;
            }
            state.baseline = Some(snapshot.change_count);

            if state.suppress_next {
                state.suppress_next = false;
                debug!("Skipping self-caused clipboard change");
                return true;
            }

            let Some(text) = snapshot.text else {
                return true;
            };
            if is_blank(&text) || state.last_captured.as_deref() == Some(text.as_str()) {
                return true;
            }

            state.last_captured = Some(text.clone());
            text
        };

        let source_app = self
            .apps
            .frontmost_app_name()
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string());

        debug!("Clipboard changed in {}", source_app);
        self.sender
            .send(CapturedText { text, source_app })
            .await
            .is_ok()
    }

    async fn run(self, period: Duration, mut stop: watch::Receiver<bool>) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the baseline was just taken.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if !self.tick().await {
                        debug!("Capture receiver dropped, stopping monitor");
                        break;
                    }
                }
                changed = stop.changed() => {
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
            }
        }
    }
}

/// Polls the clipboard while active
pub struct CaptureMonitor {
    poller: Poller,
    period: Duration,
    state: MonitorState,
    stop: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl CaptureMonitor {
    /// Create a paused monitor and the receiver for its captures
    pub fn new(
        source: Arc<dyn ClipboardSource>,
        apps: Arc<dyn AppNameProvider>,
        period: Duration,
    ) -> (Self, CaptureWatcher) {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let monitor = Self {
            poller: Poller {
                source,
                apps,
                state: Arc::new(Mutex::new(PollState::default())),
                sender,
            },
            period,
            state: MonitorState::Paused,
            stop: None,
            task: None,
        };
        (monitor, CaptureWatcher { receiver })
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Whether a poll task is currently alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start polling
    ///
    /// The current clipboard becomes the baseline, so only changes made after
    /// this call are captured. Resuming an active monitor does nothing.
    pub async fn resume(&mut self) {
        if self.state == MonitorState::Active {
            return;
        }

        self.poller.rebaseline().await;

        let (stop_tx, stop_rx) = watch::channel(false);
        let poller = self.poller.clone();
        let period = self.period;
        self.task = Some(tokio::spawn(poller.run(period, stop_rx)));
        self.stop = Some(stop_tx);
        self.state = MonitorState::Active;
        info!("Clipboard capture active ({:?} interval)", period);
    }

    /// Stop polling
    pub fn pause(&mut self) {
        if self.state == MonitorState::Paused {
            return;
        }

        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }
        self.task = None;
        self.state = MonitorState::Paused;
        info!("Clipboard capture paused");
    }

    /// Switch between active and paused
    pub async fn set_active(&mut self, active: bool) {
        if active {
            self.resume().await;
        } else {
            self.pause();
        }
    }

    /// Run one poll immediately, whatever the state
    pub async fn poll_now(&self) {
        self.poller.tick().await;
    }

    /// Treat the next clipboard change as our own and skip it
    pub fn suppress_next(&self) {
        self.poller.lock().suppress_next = true;
    }

    /// Put text on the clipboard without capturing it back
    pub async fn copy_to_clipboard(&self, text: &str) -> Result<(), ClipboardError> {
        {
            let mut state = self.poller.lock();
            state.suppress_next = true;
            state.last_captured = Some(text.to_string());
        }
        self.poller.source.set_text(text).await
    }
}

impl Drop for CaptureMonitor {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(true);
        }
    }
}
