use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::clip::Clip;
use crate::clipboard::{ArboardClipboard, ClipboardSource, SystemAppName};
use crate::collection::HighlighterColor;
use crate::config::Config;
use crate::export::{export_file_name, ExportFormat};
use crate::ledger::{MarkdownLedger, MigrationReport};
use crate::monitor::{CaptureMonitor, MonitorState};
use crate::notify::SystemNotifier;
use crate::prefs::TomlPreferenceStore;
use crate::query::SortOrder;
use crate::store::ClipStore;

const PREVIEW_CHARS: usize = 60;
const PREFERENCE_REFRESH: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "nibnab")]
#[command(about = "Clipboard highlighter that files snippets into colored Markdown ledgers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Watch the clipboard and capture into the active color")]
    Watch {
        /// Switch the active color before watching
        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Add a clip by hand")]
    Add {
        text: String,

        #[arg(long)]
        color: Option<HighlighterColor>,

        /// Source application label
        #[arg(short, long)]
        app: Option<String>,
    },

    #[command(about = "List clips in a collection")]
    List {
        #[arg(long)]
        color: Option<HighlighterColor>,

        #[arg(short, long)]
        search: Option<String>,

        /// display, newest, oldest, app or length
        #[arg(long, default_value = "display")]
        sort: SortOrder,

        #[arg(short, long)]
        limit: Option<usize>,

        #[arg(long)]
        json: bool,
    },

    #[command(about = "Delete the clip at a position")]
    Delete {
        position: usize,

        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Delete every clip in a collection")]
    Clear {
        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Move a clip to another collection")]
    Move {
        position: usize,

        #[arg(long)]
        to: HighlighterColor,

        #[arg(long)]
        from: Option<HighlighterColor>,

        /// Position in the target collection
        #[arg(long)]
        at: Option<usize>,
    },

    #[command(about = "Move a clip within its collection")]
    Reorder {
        position: usize,

        /// New position
        #[arg(long)]
        to: usize,

        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Replace the text of a clip")]
    Edit {
        position: usize,
        text: String,

        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Export a collection as Markdown or plain text")]
    Export {
        #[arg(long)]
        color: Option<HighlighterColor>,

        /// markdown or text
        #[arg(short, long, default_value = "markdown")]
        format: ExportFormat,

        /// File or directory to write; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// A running `watch` skips this change instead of capturing it again
    #[command(about = "Copy a clip back to the clipboard")]
    Copy {
        position: usize,

        #[arg(long)]
        color: Option<HighlighterColor>,
    },

    #[command(about = "Set the active color")]
    Use { color: HighlighterColor },

    #[command(about = "Show, set or remove a color label")]
    Label {
        color: HighlighterColor,

        /// New label; an empty string removes it
        label: Option<String>,
    },

    #[command(about = "Pause clipboard capture")]
    Pause,

    #[command(about = "Resume clipboard capture")]
    Resume,

    #[command(about = "Turn sounds on or off")]
    Sound { state: Toggle },

    #[command(about = "Show NibNab status")]
    Status,

    #[command(about = "Move data from the legacy ~/.nibnab folder")]
    Migrate,

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show current configuration")]
    Show,

    #[command(about = "Generate example configuration")]
    Init {
        #[arg(long)]
        force: bool,
    },

    #[command(about = "Validate configuration")]
    Validate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> bool {
        toggle == Toggle::On
    }
}

pub struct CliHandler {
    config: Config,
    config_path: Option<PathBuf>,
    store: Option<ClipStore>,
}

impl CliHandler {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load_config(config_path.clone())?;
        Ok(Self::from_config(config, config_path))
    }

    /// Build a handler around an already loaded configuration
    pub fn from_config(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
            store: None,
        }
    }

    /// Build a handler around an already opened store
    pub fn with_store(config: Config, store: ClipStore) -> Self {
        Self {
            config,
            config_path: None,
            store: Some(store),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Lazily open the clip store when needed
    fn ensure_store(&mut self) -> &mut ClipStore {
        let config = &self.config;
        self.store.get_or_insert_with(|| {
            info!("Opening clip store at {}", config.storage.root.display());
            let ledger = MarkdownLedger::new(&config.storage.root)
                .with_load_order(config.storage.load_order);
            report_migration(&ledger.migrate_legacy(&config.storage.legacy_root));

            ClipStore::open(
                ledger,
                Arc::new(SystemNotifier),
                Arc::new(TomlPreferenceStore::new(&config.preferences_path)),
                config.store_settings(),
            )
        })
    }

    pub async fn handle_command(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Watch { color } => self.watch(color).await,
            Commands::Add { text, color, app } => self.add(&text, color, app),
            Commands::List {
                color,
                search,
                sort,
                limit,
                json,
            } => self.list(color, search.as_deref(), sort, limit, json),
            Commands::Delete { position, color } => self.delete(position, color),
            Commands::Clear { color } => self.clear(color),
            Commands::Move {
                position,
                to,
                from,
                at,
            } => self.move_clip(position, from, to, at),
            Commands::Reorder {
                position,
                to,
                color,
            } => self.reorder(position, to, color),
            Commands::Edit {
                position,
                text,
                color,
            } => self.edit(position, &text, color),
            Commands::Export {
                color,
                format,
                output,
            } => self.export(color, format, output),
            Commands::Copy { position, color } => self.copy(position, color).await,
            Commands::Use { color } => self.use_color(color),
            Commands::Label { color, label } => self.label(color, label),
            Commands::Pause => self.set_monitoring(false),
            Commands::Resume => self.set_monitoring(true),
            Commands::Sound { state } => self.set_sounds(state.into()),
            Commands::Status => self.show_status(),
            Commands::Migrate => self.migrate(),
            Commands::Config { action } => self.handle_config_action(action),
        }
    }

    async fn watch(&mut self, color: Option<HighlighterColor>) -> Result<()> {
        let poll_interval = self.config.poll_interval();
        let store = self.ensure_store();
        if let Some(color) = color {
            store.switch_to_color(color, false);
        }

        let (mut monitor, mut watcher) = CaptureMonitor::new(
            Arc::new(ArboardClipboard::new()),
            Arc::new(SystemAppName),
            poll_interval,
        );
        monitor.set_active(store.monitoring_enabled()).await;

        let active = store.active_color();
        println!(
            "Watching the clipboard, capturing into {} (Ctrl-C to stop)",
            store.label_for(active)
        );
        if monitor.state() == MonitorState::Paused {
            println!("Capture is paused; run `nibnab resume` to start capturing");
        }

        let mut refresh = tokio::time::interval(PREFERENCE_REFRESH);
        refresh.tick().await;

        loop {
            tokio::select! {
                captured = watcher.receiver.recv() => {
                    let Some(captured) = captured else {
                        warn!("Capture monitor stopped unexpectedly");
                        break;
                    };
                    if store.take_self_copy(&captured.text) {
                        debug!("Skipping clip copied by nibnab copy");
                        continue;
                    }
                    let color = store.active_color();
                    if let Some(clip) = store.capture_active(&captured.text, &captured.source_app) {
                        println!("+ {} [{}] {}", color.short_name(), clip.source_app, preview(&clip.text));
                    }
                }
                _ = refresh.tick() => {
                    store.reload_preferences();
                    monitor.set_active(store.monitoring_enabled()).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping clipboard watch");
                    break;
                }
            }
        }

        monitor.pause();
        Ok(())
    }

    fn add(
        &mut self,
        text: &str,
        color: Option<HighlighterColor>,
        app: Option<String>,
    ) -> Result<()> {
        let store = self.ensure_store();
        let clip = match (color, app) {
            (None, None) => store.add_manual(text),
            (color, app) => {
                let color = color.unwrap_or_else(|| store.active_color());
                let app = app.unwrap_or_else(|| crate::clip::MANUAL_ENTRY_SOURCE.to_string());
                store.capture(text, color, &app)
            }
        };

        match clip {
            Some(clip) => println!("Added: {}", preview(&clip.text)),
            None => bail!("Nothing to add: text is empty"),
        }
        Ok(())
    }

    fn list(
        &mut self,
        color: Option<HighlighterColor>,
        search: Option<&str>,
        sort: SortOrder,
        limit: Option<usize>,
        json: bool,
    ) -> Result<()> {
        let store: &ClipStore = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let listed = list_rows(store, color, search.unwrap_or_default(), sort, limit);

        if json {
            println!("{}", serde_json::to_string_pretty(&listed)?);
            return Ok(());
        }

        if listed.is_empty() {
            println!("No clips in {}", store.label_for(color));
            return Ok(());
        }

        println!("{} ({} clips):", store.label_for(color), listed.len());
        for ListedClip { position, clip } in &listed {
            println!(
                "{}. [{}] {}: {}",
                position,
                clip.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                clip.source_app,
                preview(&clip.text)
            );
        }

        Ok(())
    }

    fn delete(&mut self, position: usize, color: Option<HighlighterColor>) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let clip = clip_at(store, color, position)?;

        store
            .delete(clip.id, color)
            .ok_or_else(|| anyhow!("Clip {} vanished before it could be deleted", position))?;
        println!("Deleted: {}", preview(&clip.text));
        Ok(())
    }

    fn clear(&mut self, color: Option<HighlighterColor>) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let count = store.clips(color).len();
        store.clear_all(color);
        println!("Cleared {} clips from {}", count, store.label_for(color));
        Ok(())
    }

    fn move_clip(
        &mut self,
        position: usize,
        from: Option<HighlighterColor>,
        to: HighlighterColor,
        at: Option<usize>,
    ) -> Result<()> {
        let store = self.ensure_store();
        let from = from.unwrap_or_else(|| store.active_color());
        let clip = clip_at(store, from, position)?;
        let index = at.map(|at| at.saturating_sub(1));

        if !store.move_clip(clip.id, from, to, index) {
            bail!("Could not move clip {}", position);
        }
        println!(
            "Moved to {}: {}",
            store.label_for(to),
            preview(&clip.text)
        );
        Ok(())
    }

    fn reorder(
        &mut self,
        position: usize,
        to: usize,
        color: Option<HighlighterColor>,
    ) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let clip = clip_at(store, color, position)?;

        if !store.reorder(clip.id, color, to.saturating_sub(1)) {
            bail!("Could not reorder clip {}", position);
        }
        println!("Moved clip {} to position {}", position, to.max(1));
        Ok(())
    }

    fn edit(&mut self, position: usize, text: &str, color: Option<HighlighterColor>) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let clip = clip_at(store, color, position)?;

        match store.edit_text(clip.id, text, color) {
            Some(edited) => println!("Edited: {}", preview(&edited.text)),
            None => bail!("Clip text cannot be empty"),
        }
        Ok(())
    }

    fn export(
        &mut self,
        color: Option<HighlighterColor>,
        format: ExportFormat,
        output: Option<PathBuf>,
    ) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let Some(document) = store.export(color, format) else {
            println!("No clips in {} to export", store.label_for(color));
            return Ok(());
        };

        match output {
            Some(path) => {
                let path = export_target(&path, color, format);
                std::fs::write(&path, document)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Exported {} to {}", store.label_for(color), path.display());
            }
            None => print!("{}", document),
        }
        Ok(())
    }

    async fn copy(&mut self, position: usize, color: Option<HighlighterColor>) -> Result<()> {
        let store = self.ensure_store();
        let color = color.unwrap_or_else(|| store.active_color());
        let clip = clip_at(store, color, position)?;

        store.mark_self_copy(&clip.text);
        ArboardClipboard::new().set_text(&clip.text).await?;
        println!("Copied to clipboard: {}", preview(&clip.text));
        Ok(())
    }

    fn use_color(&mut self, color: HighlighterColor) -> Result<()> {
        let store = self.ensure_store();
        store.switch_to_color(color, true);
        println!("Active color: {}", store.label_for(color));
        Ok(())
    }

    fn label(&mut self, color: HighlighterColor, label: Option<String>) -> Result<()> {
        let store = self.ensure_store();
        match label {
            None => println!("{}", store.label_for(color)),
            Some(label) => match store.set_label(color, &label) {
                Some(label) => println!("{} is now labelled \"{}\"", color.name(), label),
                None => println!("Removed label from {}", color.name()),
            },
        }
        Ok(())
    }

    fn set_monitoring(&mut self, enabled: bool) -> Result<()> {
        let store = self.ensure_store();
        store.set_monitoring(enabled);
        println!("Capturing {}", if enabled { "ON" } else { "OFF" });
        Ok(())
    }

    fn set_sounds(&mut self, enabled: bool) -> Result<()> {
        let store = self.ensure_store();
        store.set_sounds_enabled(enabled);
        println!("Sounds {}", if enabled { "on" } else { "off" });
        Ok(())
    }

    fn show_status(&mut self) -> Result<()> {
        let storage_root = self.config.storage.root.clone();
        let store = self.ensure_store();

        println!("NibNab Status:");
        println!("  Version: {}", crate::VERSION);
        println!(
            "  Build: {} ({}, {})",
            env!("NIBNAB_TARGET"),
            env!("NIBNAB_PROFILE"),
            env!("NIBNAB_BUILD_DATE")
        );
        println!("  Compiler: {}", env!("NIBNAB_RUSTC_VERSION"));
        println!("  Storage: {}", storage_root.display());
        println!("  Active color: {}", store.label_for(store.active_color()));
        println!(
            "  Capturing: {}",
            if store.monitoring_enabled() { "on" } else { "paused" }
        );
        println!(
            "  Sounds: {}",
            if store.sounds_enabled() { "on" } else { "off" }
        );
        println!("  Collections:");
        for color in HighlighterColor::ALL {
            let marker = if color == store.active_color() { "*" } else { " " };
            println!(
                "   {} {:<12} {:>3} clips",
                marker,
                store.label_for(color),
                store.clips(color).len()
            );
        }

        Ok(())
    }

    fn migrate(&mut self) -> Result<()> {
        let ledger = MarkdownLedger::new(&self.config.storage.root);
        let report = ledger.migrate_legacy(&self.config.storage.legacy_root);

        if report.migrated.is_empty() && report.skipped.is_empty() && report.failed.is_empty() {
            println!(
                "Nothing to migrate from {}",
                self.config.storage.legacy_root.display()
            );
            return Ok(());
        }

        println!("Migrated: {}", report.migrated.len());
        println!("Skipped (already present): {}", report.skipped.len());
        if !report.failed.is_empty() {
            println!("Failed: {}", report.failed.join(", "));
        }
        if report.legacy_removed {
            println!(
                "Removed {}",
                self.config.storage.legacy_root.display()
            );
        }
        Ok(())
    }

    fn handle_config_action(&mut self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {
                println!("Current Configuration:");
                print!("{}", toml::to_string_pretty(&self.config)?);
            }
            ConfigAction::Init { force } => {
                let path = self
                    .config_path
                    .clone()
                    .or_else(Config::default_path)
                    .ok_or_else(|| anyhow!("Could not find config directory"))?;
                Config::generate_example_config(&path, force)?;
                println!("Example configuration written to {}", path.display());
            }
            ConfigAction::Validate => {
                // Loading in CliHandler::new already validated it
                println!("Configuration is valid");
            }
        }
        Ok(())
    }
}

fn report_migration(report: &MigrationReport) {
    if !report.migrated.is_empty() {
        info!("Migrated {} legacy items", report.migrated.len());
    }
    if !report.failed.is_empty() {
        warn!("Legacy migration failed for: {}", report.failed.join(", "));
    }
}

/// One `list` row: a clip and the position other commands address it by
#[derive(Debug, Serialize)]
struct ListedClip {
    position: usize,
    #[serde(flatten)]
    clip: Clip,
}

/// Rows for `list`, numbered by collection position so the numbers stay
/// valid for delete/move/edit/copy whatever the sort or filter
fn list_rows(
    store: &ClipStore,
    color: HighlighterColor,
    search: &str,
    sort: SortOrder,
    limit: Option<usize>,
) -> Vec<ListedClip> {
    let clips = store.clips(color);
    let mut rows: Vec<ListedClip> = store
        .view(color, search, sort)
        .into_iter()
        .filter_map(|clip| {
            let index = clips.iter().position(|c| c.id == clip.id)?;
            Some(ListedClip {
                position: index + 1,
                clip,
            })
        })
        .collect();
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}

/// Clip at a 1-based position in display order
fn clip_at(store: &ClipStore, color: HighlighterColor, position: usize) -> Result<Clip> {
    let clips = store.clips(color);
    position
        .checked_sub(1)
        .and_then(|index| clips.get(index))
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "No clip at position {} in {} ({} clips)",
                position,
                store.label_for(color),
                clips.len()
            )
        })
}

/// Resolve `--output`; a directory gets the suggested file name
fn export_target(path: &Path, color: HighlighterColor, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(export_file_name(color, format))
    } else {
        path.to_path_buf()
    }
}

/// Single-line preview of clip text
pub fn preview(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::SilentNotifier;
    use crate::prefs::MemoryPreferenceStore;
    use crate::store::StoreSettings;
    use tempfile::TempDir;

    fn handler(dir: &TempDir) -> CliHandler {
        let mut config = Config::default();
        config.storage.root = dir.path().join("data");
        config.storage.legacy_root = dir.path().join("legacy");
        let store = ClipStore::open(
            MarkdownLedger::new(&config.storage.root),
            Arc::new(SilentNotifier),
            Arc::new(MemoryPreferenceStore::new()),
            StoreSettings::default(),
        );
        CliHandler::with_store(config, store)
    }

    #[test]
    fn test_parse_list_arguments() {
        let cli = Cli::parse_from([
            "nibnab", "list", "--color", "pink", "--sort", "oldest", "-l", "3", "--json",
        ]);
        match cli.command {
            Commands::List {
                color,
                sort,
                limit,
                json,
                search,
            } => {
                assert_eq!(color, Some(HighlighterColor::Pink));
                assert_eq!(sort, SortOrder::OldestFirst);
                assert_eq!(limit, Some(3));
                assert!(json);
                assert!(search.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_parse_move_and_sound() {
        let cli = Cli::parse_from(["nibnab", "move", "2", "--to", "Highlighter Green"]);
        assert!(matches!(
            cli.command,
            Commands::Move {
                position: 2,
                to: HighlighterColor::Green,
                from: None,
                at: None
            }
        ));

        let cli = Cli::parse_from(["nibnab", "sound", "off"]);
        assert!(matches!(cli.command, Commands::Sound { state: Toggle::Off }));
    }

    #[test]
    fn test_rejects_unknown_color() {
        assert!(Cli::try_parse_from(["nibnab", "use", "blue"]).is_err());
    }

    #[test]
    fn test_preview_collapses_and_truncates() {
        assert_eq!(preview("a\n  b\tc"), "a b c");
        let long = "x".repeat(PREVIEW_CHARS + 5);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(PREVIEW_CHARS)));
    }

    #[tokio::test]
    async fn test_positions_are_one_based() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        handler
            .handle_command(Commands::Add {
                text: "first".into(),
                color: None,
                app: None,
            })
            .await
            .unwrap();
        handler
            .handle_command(Commands::Add {
                text: "second".into(),
                color: None,
                app: None,
            })
            .await
            .unwrap();

        let store = handler.ensure_store();
        assert_eq!(
            clip_at(store, HighlighterColor::Yellow, 1).unwrap().text,
            "second"
        );
        assert!(clip_at(store, HighlighterColor::Yellow, 0).is_err());
        assert!(clip_at(store, HighlighterColor::Yellow, 3).is_err());

        handler
            .handle_command(Commands::Delete {
                position: 1,
                color: None,
            })
            .await
            .unwrap();
        let texts: Vec<_> = handler
            .ensure_store()
            .clips(HighlighterColor::Yellow)
            .iter()
            .map(|c| c.text.clone())
            .collect();
        assert_eq!(texts, vec!["first"]);
    }

    #[tokio::test]
    async fn test_sorted_list_numbers_address_the_same_clip() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        for text in ["a", "a much longer clip", "mid length"] {
            handler
                .handle_command(Commands::Add {
                    text: text.into(),
                    color: None,
                    app: None,
                })
                .await
                .unwrap();
        }
        handler
            .handle_command(Commands::Reorder {
                position: 3,
                to: 1,
                color: None,
            })
            .await
            .unwrap();

        let store = handler.ensure_store();
        let rows = list_rows(store, HighlighterColor::Yellow, "", SortOrder::Display, None);
        let positions: Vec<_> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert_eq!(rows[0].clip.text, "a");

        let rows = list_rows(store, HighlighterColor::Yellow, "", SortOrder::ByLength, None);
        assert_eq!(rows[0].clip.text, "a much longer clip");
        for row in &rows {
            let addressed = clip_at(store, HighlighterColor::Yellow, row.position).unwrap();
            assert_eq!(addressed.id, row.clip.id);
        }

        let rows = list_rows(
            store,
            HighlighterColor::Yellow,
            "mid",
            SortOrder::NewestFirst,
            Some(1),
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].position, 2);
        assert_eq!(rows[0].clip.text, "mid length");
    }

    #[tokio::test]
    async fn test_export_into_directory() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        handler
            .handle_command(Commands::Add {
                text: "exported".into(),
                color: Some(HighlighterColor::Purple),
                app: Some("Safari".into()),
            })
            .await
            .unwrap();
        handler
            .handle_command(Commands::Export {
                color: Some(HighlighterColor::Purple),
                format: ExportFormat::PlainText,
                output: Some(dir.path().to_path_buf()),
            })
            .await
            .unwrap();

        let written = std::fs::read_to_string(dir.path().join("purple-clips.txt")).unwrap();
        assert!(written.contains("exported"));
    }

    #[tokio::test]
    async fn test_add_rejects_blank_text() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        let result = handler
            .handle_command(Commands::Add {
                text: "   ".into(),
                color: None,
                app: None,
            })
            .await;
        assert!(result.is_err());
    }
}
