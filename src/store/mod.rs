//! Clip store: the single owner of every collection
//!
//! All mutations go through [`ClipStore`], which mirrors them to the
//! [`MarkdownLedger`], publishes a [`StoreEvent`], and asks the injected
//! [`Notifier`] for feedback. Ledger and preference failures are logged and
//! never undo the in-memory change.

pub mod events;

use chrono::{DateTime, Local, TimeZone, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::clip::{is_blank, source_label, Clip, MANUAL_ENTRY_SOURCE};
use crate::collection::HighlighterColor;
use crate::export::{self, ExportFormat};
use crate::ledger::MarkdownLedger;
use crate::notify::{Notifier, Sound};
use crate::prefs::{PreferenceStore, Preferences};
use crate::query::{self, SortOrder};

pub use events::StoreEvent;

/// Most clips a collection keeps
pub const DEFAULT_MAX_CLIPS: usize = 100;

/// How long a deleted clip can be restored
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(5);

const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Store tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    pub max_clips: usize,
    pub undo_window: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            max_clips: DEFAULT_MAX_CLIPS,
            undo_window: DEFAULT_UNDO_WINDOW,
        }
    }
}

#[derive(Debug, Clone)]
struct PendingUndo {
    clip: Clip,
    color: HighlighterColor,
    expires_at: Instant,
}

/// In-memory collections backed by the ledger
pub struct ClipStore {
    ledger: MarkdownLedger,
    notifier: Arc<dyn Notifier>,
    preference_store: Arc<dyn PreferenceStore>,
    prefs: Preferences,
    collections: HashMap<HighlighterColor, Vec<Clip>>,
    viewed_color: HighlighterColor,
    pending_undo: Option<PendingUndo>,
    settings: StoreSettings,
    events: broadcast::Sender<StoreEvent>,
    first_launch: bool,
}

impl fmt::Debug for ClipStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipStore")
            .field("root", &self.ledger.root())
            .field("active_color", &self.prefs.active_color)
            .field("viewed_color", &self.viewed_color)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl ClipStore {
    /// Open the store, loading every collection from the ledger
    ///
    /// No sounds, toasts or events fire while opening.
    pub fn open(
        ledger: MarkdownLedger,
        notifier: Arc<dyn Notifier>,
        preference_store: Arc<dyn PreferenceStore>,
        settings: StoreSettings,
    ) -> Self {
        ledger.ensure_layout();

        let mut prefs = preference_store.load().unwrap_or_else(|e| {
            error!("Failed loading preferences, using defaults: {}", e);
            Preferences::default()
        });

        let first_launch = !prefs.has_launched_before;
        if first_launch {
            prefs.has_launched_before = true;
            if let Err(e) = preference_store.save(&prefs) {
                error!("Failed saving preferences: {}", e);
            }
        }

        let collections = HighlighterColor::ALL
            .into_iter()
            .map(|color| {
                let mut clips = ledger.load(color);
                clips.truncate(settings.max_clips);
                (color, clips)
            })
            .collect();

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let viewed_color = prefs.active_color;

        info!(
            "Opened clip store at {:?} (active: {})",
            ledger.root(),
            prefs.active_color
        );

        Self {
            ledger,
            notifier,
            preference_store,
            prefs,
            collections,
            viewed_color,
            pending_undo: None,
            settings,
            events,
            first_launch,
        }
    }

    /// Receive every future change
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn ledger(&self) -> &MarkdownLedger {
        &self.ledger
    }

    pub fn settings(&self) -> StoreSettings {
        self.settings
    }

    /// True only for the first open against fresh preferences
    pub fn is_first_launch(&self) -> bool {
        self.first_launch
    }

    /// Clips of one collection in display order
    pub fn clips(&self, color: HighlighterColor) -> &[Clip] {
        self.collections
            .get(&color)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Find a clip by id
    pub fn clip(&self, color: HighlighterColor, id: Uuid) -> Option<&Clip> {
        self.clips(color).iter().find(|clip| clip.id == id)
    }

    /// Filtered and sorted copy of a collection
    pub fn view(&self, color: HighlighterColor, search: &str, order: SortOrder) -> Vec<Clip> {
        query::view(self.clips(color), search, order)
    }

    /// Capture text into a collection
    ///
    /// Blank text is ignored. The new clip goes to the front and the oldest
    /// clips past the cap are dropped.
    pub fn capture(
        &mut self,
        text: &str,
        color: HighlighterColor,
        source_app: &str,
    ) -> Option<Clip> {
        if is_blank(text) {
            debug!("Ignoring blank capture for {}", color);
            return None;
        }

        let clip = Clip::new(text, source_label(source_app));
        let max_clips = self.settings.max_clips;
        let clips = self.collection_mut(color);
        clips.insert(0, clip.clone());
        clips.truncate(max_clips);

        self.ledger.append(&clip, color);
        debug!(
            "Captured {} chars from {} into {}",
            clip.len(),
            clip.source_app,
            color
        );

        self.play(Sound::Purr);
        self.publish(StoreEvent::Captured {
            color,
            clip: clip.clone(),
        });
        Some(clip)
    }

    /// Capture text into the active collection
    pub fn capture_active(&mut self, text: &str, source_app: &str) -> Option<Clip> {
        self.capture(text, self.prefs.active_color, source_app)
    }

    /// Add a hand-typed clip to the active collection
    pub fn add_manual(&mut self, text: &str) -> Option<Clip> {
        self.capture_active(text, MANUAL_ENTRY_SOURCE)
    }

    /// Delete a clip, keeping it available to [`ClipStore::undo`]
    pub fn delete(&mut self, id: Uuid, color: HighlighterColor) -> Option<Clip> {
        let clips = self.collection_mut(color);
        let index = clips.iter().position(|clip| clip.id == id)?;
        let clip = clips.remove(index);

        self.ledger.delete_clip(self.clips(color), color);

        self.pending_undo = Some(PendingUndo {
            clip: clip.clone(),
            color,
            expires_at: Instant::now() + self.settings.undo_window,
        });

        self.play(Sound::Tink);
        self.publish(StoreEvent::Deleted {
            color,
            clip: clip.clone(),
        });
        Some(clip)
    }

    /// Whether a deleted clip can still be restored
    pub fn can_undo(&self) -> bool {
        self.pending_undo
            .as_ref()
            .is_some_and(|pending| Instant::now() < pending.expires_at)
    }

    /// Restore the most recently deleted clip to the front of its collection
    pub fn undo(&mut self) -> Option<Clip> {
        let pending = self.pending_undo.take()?;
        if Instant::now() >= pending.expires_at {
            debug!("Undo window for clip {} has passed", pending.clip.id);
            return None;
        }

        let PendingUndo { clip, color, .. } = pending;
        let max_clips = self.settings.max_clips;
        let clips = self.collection_mut(color);
        clips.insert(0, clip.clone());
        clips.truncate(max_clips);

        self.ledger.append(&clip, color);
        self.publish(StoreEvent::Restored {
            color,
            clip: clip.clone(),
        });
        Some(clip)
    }

    /// Remove every clip from a collection
    pub fn clear_all(&mut self, color: HighlighterColor) {
        self.collection_mut(color).clear();
        self.ledger.delete_all(color);

        self.play(Sound::Basso);
        self.publish(StoreEvent::Cleared { color });
    }

    /// Move a clip to another collection
    ///
    /// The clip lands at `index` when it is inside the target list and is
    /// appended otherwise. Moving within one collection is a reorder.
    pub fn move_clip(
        &mut self,
        id: Uuid,
        from: HighlighterColor,
        to: HighlighterColor,
        index: Option<usize>,
    ) -> bool {
        if from == to {
            return self.reorder(id, from, index.unwrap_or(usize::MAX));
        }

        let source = self.collection_mut(from);
        let Some(position) = source.iter().position(|clip| clip.id == id) else {
            return false;
        };
        let clip = source.remove(position);

        let max_clips = self.settings.max_clips;
        let target = self.collection_mut(to);
        match index {
            Some(index) if index < target.len() => target.insert(index, clip.clone()),
            _ => target.push(clip.clone()),
        }
        // A full target gives up its last clip, never the one moved in.
        while target.len() > max_clips {
            let Some(evicted) = target.iter().rposition(|c| c.id != id) else {
                break;
            };
            let evicted = target.remove(evicted);
            debug!("Evicted clip {} from full {}", evicted.id, to);
        }

        self.ledger.delete_clip(self.clips(from), from);
        self.ledger.rewrite(self.clips(to), to);

        self.play(Sound::Pop);
        self.publish(StoreEvent::Moved { from, to, clip });
        true
    }

    /// Move a clip to a new position within its collection
    ///
    /// `to_index` is clamped to the end of the list.
    pub fn reorder(&mut self, id: Uuid, color: HighlighterColor, to_index: usize) -> bool {
        let clips = self.collection_mut(color);
        let Some(position) = clips.iter().position(|clip| clip.id == id) else {
            return false;
        };
        let clip = clips.remove(position);
        let index = to_index.min(clips.len());
        clips.insert(index, clip);

        self.ledger.rewrite(self.clips(color), color);
        self.publish(StoreEvent::Reordered {
            color,
            clip_id: id,
            index,
        });
        true
    }

    /// Replace a clip's text, keeping its id, timestamp and source
    pub fn edit_text(&mut self, id: Uuid, new_text: &str, color: HighlighterColor) -> Option<Clip> {
        if is_blank(new_text) {
            debug!("Ignoring blank edit for clip {}", id);
            return None;
        }

        let clips = self.collection_mut(color);
        let slot = clips.iter_mut().find(|clip| clip.id == id)?;
        *slot = slot.edited(new_text);
        let edited = slot.clone();

        self.ledger.rewrite(self.clips(color), color);

        self.play(Sound::Pop);
        self.publish(StoreEvent::Edited {
            color,
            clip: edited.clone(),
        });
        Some(edited)
    }

    /// Render a collection as a document; `None` when it is empty
    pub fn export(&self, color: HighlighterColor, format: ExportFormat) -> Option<String> {
        self.export_at(color, format, &Local::now())
    }

    /// Render a collection with a fixed export time
    pub fn export_at<Tz>(
        &self,
        color: HighlighterColor,
        format: ExportFormat,
        exported_at: &DateTime<Tz>,
    ) -> Option<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let clips = self.clips(color);
        if clips.is_empty() {
            return None;
        }
        Some(export::render(color, clips, format, exported_at))
    }

    pub fn active_color(&self) -> HighlighterColor {
        self.prefs.active_color
    }

    pub fn viewed_color(&self) -> HighlighterColor {
        self.viewed_color
    }

    /// Route captures to `color` and show it
    ///
    /// Nothing happens when `color` is already both active and viewed.
    pub fn switch_to_color(&mut self, color: HighlighterColor, announce: bool) {
        if self.prefs.active_color == color && self.viewed_color == color {
            return;
        }

        self.viewed_color = color;
        self.prefs.active_color = color;
        self.persist_preferences();

        self.play(Sound::Pop);
        if announce {
            self.notifier.show_toast(color.short_name(), color);
        }
        self.publish(StoreEvent::ActiveColorChanged { color });
    }

    /// Show a collection without changing where captures go
    pub fn set_viewed_color(&mut self, color: HighlighterColor) {
        if self.viewed_color == color {
            return;
        }
        self.viewed_color = color;
        self.publish(StoreEvent::ViewedColorChanged { color });
    }

    /// Custom label, or the short color name
    pub fn label_for(&self, color: HighlighterColor) -> String {
        self.prefs
            .label(color)
            .unwrap_or(color.short_name())
            .to_string()
    }

    /// Set or clear a custom label; returns the stored label
    pub fn set_label(&mut self, color: HighlighterColor, label: &str) -> Option<String> {
        let stored = self.prefs.set_label(color, label);
        self.persist_preferences();
        self.publish(StoreEvent::LabelChanged {
            color,
            label: stored.clone(),
        });
        stored
    }

    pub fn sounds_enabled(&self) -> bool {
        self.prefs.sound_enabled
    }

    pub fn set_sounds_enabled(&mut self, enabled: bool) {
        self.prefs.sound_enabled = enabled;
        self.persist_preferences();
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.prefs.monitoring_enabled
    }

    /// Switch clipboard capture on or off
    pub fn set_monitoring(&mut self, enabled: bool) {
        if self.prefs.monitoring_enabled == enabled {
            return;
        }

        self.prefs.monitoring_enabled = enabled;
        self.persist_preferences();

        if enabled {
            self.notifier
                .show_toast("Capturing ON", HighlighterColor::Green);
        } else {
            self.notifier
                .show_toast("Capturing OFF", HighlighterColor::Orange);
        }
        self.publish(StoreEvent::MonitoringChanged { enabled });
    }

    /// Pick up preference changes written by another process
    pub fn reload_preferences(&mut self) {
        let latest = match self.preference_store.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                error!("Failed reloading preferences: {}", e);
                return;
            }
        };

        let previous = std::mem::replace(&mut self.prefs, latest);
        if previous.active_color != self.prefs.active_color {
            self.viewed_color = self.prefs.active_color;
            self.publish(StoreEvent::ActiveColorChanged {
                color: self.prefs.active_color,
            });
        }
        if previous.monitoring_enabled != self.prefs.monitoring_enabled {
            self.publish(StoreEvent::MonitoringChanged {
                enabled: self.prefs.monitoring_enabled,
            });
        }
    }

    /// Note that NibNab is about to put `text` on the clipboard
    ///
    /// The mark is persisted so a `watch` running in another process can
    /// skip the change instead of capturing it again.
    pub fn mark_self_copy(&mut self, text: &str) {
        self.prefs.mark_self_copy(text, Utc::now());
        self.persist_preferences();
    }

    /// Whether a freshly seen clipboard `text` is NibNab's own copy
    ///
    /// Re-reads the preference store first, and clears the mark it finds.
    pub fn take_self_copy(&mut self, text: &str) -> bool {
        self.reload_preferences();
        if self.prefs.self_copy.is_none() {
            return false;
        }
        let own = self.prefs.take_self_copy(text, Utc::now());
        self.persist_preferences();
        own
    }

    fn collection_mut(&mut self, color: HighlighterColor) -> &mut Vec<Clip> {
        self.collections.entry(color).or_default()
    }

    fn play(&self, sound: Sound) {
        if self.prefs.sound_enabled {
            self.notifier.play_sound(sound);
        }
    }

    fn publish(&self, event: StoreEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }

    fn persist_preferences(&self) {
        if let Err(e) = self.preference_store.save(&self.prefs) {
            error!("Failed saving preferences: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MockNotifier, SilentNotifier};
    use crate::prefs::MemoryPreferenceStore;
    use mockall::predicate::eq;
    use tempfile::TempDir;

    fn open_with(temp_dir: &TempDir, notifier: Arc<dyn Notifier>, settings: StoreSettings) -> ClipStore {
        ClipStore::open(
            MarkdownLedger::new(temp_dir.path()),
            notifier,
            Arc::new(MemoryPreferenceStore::new()),
            settings,
        )
    }

    fn open(temp_dir: &TempDir) -> ClipStore {
        open_with(temp_dir, Arc::new(SilentNotifier), StoreSettings::default())
    }

    #[test]
    fn test_capture_plays_purr() {
        let temp_dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_play_sound()
            .with(eq(Sound::Purr))
            .times(1)
            .return_const(());
        let mut store = open_with(&temp_dir, Arc::new(notifier), StoreSettings::default());

        store.capture("Hello", HighlighterColor::Yellow, "TextEdit").unwrap();
    }

    #[test]
    fn test_open_is_silent() {
        let temp_dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier.expect_play_sound().never();
        notifier.expect_show_toast().never();
        let store = open_with(&temp_dir, Arc::new(notifier), StoreSettings::default());
        assert!(store.is_first_launch());
    }

    #[test]
    fn test_blank_capture_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        assert!(store.capture("  \n\t ", HighlighterColor::Yellow, "App").is_none());
        assert!(store.clips(HighlighterColor::Yellow).is_empty());
        assert!(!store.ledger().collection_file(HighlighterColor::Yellow).exists());
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StoreSettings {
            max_clips: 3,
            ..StoreSettings::default()
        };
        let mut store = open_with(&temp_dir, Arc::new(SilentNotifier), settings);
        for i in 0..5 {
            store.capture(&format!("clip {}", i), HighlighterColor::Pink, "App");
        }
        let texts: Vec<&str> = store
            .clips(HighlighterColor::Pink)
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["clip 4", "clip 3", "clip 2"]);
    }

    #[test]
    fn test_move_into_full_collection_keeps_moved_clip() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StoreSettings {
            max_clips: 3,
            ..StoreSettings::default()
        };
        let mut store = open_with(&temp_dir, Arc::new(SilentNotifier), settings);
        for i in 0..3 {
            store.capture(&format!("pink {}", i), HighlighterColor::Pink, "App");
        }
        let kept = store
            .capture("kept", HighlighterColor::Yellow, "App")
            .unwrap();

        assert!(store.move_clip(kept.id, HighlighterColor::Yellow, HighlighterColor::Pink, None));
        let texts: Vec<&str> = store
            .clips(HighlighterColor::Pink)
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["pink 2", "pink 1", "kept"]);

        let on_disk: Vec<String> = store
            .ledger()
            .load(HighlighterColor::Pink)
            .into_iter()
            .map(|c| c.text)
            .collect();
        assert_eq!(on_disk, ["pink 2", "pink 1", "kept"]);
    }

    #[test]
    fn test_move_to_front_of_full_collection() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StoreSettings {
            max_clips: 2,
            ..StoreSettings::default()
        };
        let mut store = open_with(&temp_dir, Arc::new(SilentNotifier), settings);
        store.capture("old", HighlighterColor::Green, "App");
        store.capture("new", HighlighterColor::Green, "App");
        let moved = store
            .capture("moved", HighlighterColor::Orange, "App")
            .unwrap();

        assert!(store.move_clip(
            moved.id,
            HighlighterColor::Orange,
            HighlighterColor::Green,
            Some(0)
        ));
        let texts: Vec<&str> = store
            .clips(HighlighterColor::Green)
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        assert_eq!(texts, ["moved", "new"]);
    }

    #[test]
    fn test_blank_source_survives_reload() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open_with(&temp_dir, Arc::new(SilentNotifier), StoreSettings::default());
        let clip = store
            .capture("keep me", HighlighterColor::Yellow, "")
            .unwrap();
        assert_eq!(clip.source_app, crate::clip::UNKNOWN_SOURCE);
        store.capture("and me", HighlighterColor::Yellow, "||");

        let reloaded = store.ledger().load(HighlighterColor::Yellow);
        assert_eq!(reloaded.len(), 2);
        assert!(reloaded
            .iter()
            .all(|c| c.source_app == crate::clip::UNKNOWN_SOURCE));
    }

    #[test]
    fn test_undo_expires() {
        let temp_dir = TempDir::new().unwrap();
        let settings = StoreSettings {
            undo_window: Duration::ZERO,
            ..StoreSettings::default()
        };
        let mut store = open_with(&temp_dir, Arc::new(SilentNotifier), settings);
        let clip = store.capture("gone", HighlighterColor::Green, "App").unwrap();

        store.delete(clip.id, HighlighterColor::Green).unwrap();
        assert!(!store.can_undo());
        assert!(store.undo().is_none());
        assert!(store.clips(HighlighterColor::Green).is_empty());
    }

    #[test]
    fn test_last_delete_wins() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let a = store.capture("a", HighlighterColor::Yellow, "App").unwrap();
        let b = store.capture("b", HighlighterColor::Yellow, "App").unwrap();

        store.delete(a.id, HighlighterColor::Yellow);
        store.delete(b.id, HighlighterColor::Yellow);

        assert_eq!(store.undo().map(|c| c.id), Some(b.id));
        assert!(store.undo().is_none());
    }

    #[test]
    fn test_switch_color_announces() {
        let temp_dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier.expect_play_sound().with(eq(Sound::Pop)).times(2).return_const(());
        notifier
            .expect_show_toast()
            .withf(|message, color| message == "Pink" && *color == HighlighterColor::Pink)
            .times(1)
            .return_const(());
        let mut store = open_with(&temp_dir, Arc::new(notifier), StoreSettings::default());

        store.switch_to_color(HighlighterColor::Pink, true);
        store.switch_to_color(HighlighterColor::Pink, true);
        store.switch_to_color(HighlighterColor::Green, false);

        assert_eq!(store.active_color(), HighlighterColor::Green);
        assert_eq!(store.viewed_color(), HighlighterColor::Green);
    }

    #[test]
    fn test_sounds_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier.expect_play_sound().never();
        let mut store = open_with(&temp_dir, Arc::new(notifier), StoreSettings::default());

        store.set_sounds_enabled(false);
        store.capture("quiet", HighlighterColor::Yellow, "App");
    }

    #[test]
    fn test_monitoring_toasts() {
        let temp_dir = TempDir::new().unwrap();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_show_toast()
            .withf(|message, color| message == "Capturing OFF" && *color == HighlighterColor::Orange)
            .times(1)
            .return_const(());
        notifier
            .expect_show_toast()
            .withf(|message, color| message == "Capturing ON" && *color == HighlighterColor::Green)
            .times(1)
            .return_const(());
        let mut store = open_with(&temp_dir, Arc::new(notifier), StoreSettings::default());

        store.set_monitoring(true);
        store.set_monitoring(false);
        store.set_monitoring(true);
        assert!(store.monitoring_enabled());
    }

    #[test]
    fn test_events_published() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let mut events = store.subscribe();

        let clip = store.capture("watched", HighlighterColor::Purple, "App").unwrap();
        store.clear_all(HighlighterColor::Purple);

        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::Captured {
                color: HighlighterColor::Purple,
                clip
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::Cleared {
                color: HighlighterColor::Purple
            }
        );
    }

    #[test]
    fn test_edit_rejects_blank() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let clip = store.capture("keep", HighlighterColor::Yellow, "App").unwrap();

        assert!(store.edit_text(clip.id, "   ", HighlighterColor::Yellow).is_none());
        assert_eq!(store.clips(HighlighterColor::Yellow)[0].text, "keep");
    }

    #[test]
    fn test_labels() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        assert_eq!(store.label_for(HighlighterColor::Orange), "Orange");

        store.set_label(HighlighterColor::Orange, "Work");
        assert_eq!(store.label_for(HighlighterColor::Orange), "Work");

        store.set_label(HighlighterColor::Orange, "");
        assert_eq!(store.label_for(HighlighterColor::Orange), "Orange");
    }
}
