//! Markdown ledger: per-collection, append-oriented clip storage
//!
//! Every collection owns one file at
//! `<root>/<color name lowercased>/<color name lowercased>_clips.md`.
//! New clips are appended to the end of the file, so the file reads
//! oldest-first and the display order is the file order reversed.
//! Whole-file rewrites write their list back-to-front to keep that rule.
//!
//! The infallible methods (`append`, `load`, `rewrite`, `delete_all`) log
//! and swallow I/O errors; the `try_*` variants return them.

pub mod format;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::clip::Clip;
use crate::collection::HighlighterColor;

pub use format::{parse_records, serialize_record, truncate_to_minute};

/// Ledger errors
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Creating a collection or root directory failed
    #[error("Failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    /// Reading a ledger file failed
    #[error("Failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Writing a ledger file failed
    #[error("Failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    /// Removing a file or directory failed
    #[error("Failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// How `load` orders the records it reads back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadOrder {
    /// Reverse file order, which is the order the clips were last written in
    #[default]
    File,
    /// Newest timestamp first
    Timestamp,
}

/// Outcome of copying a legacy storage directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Items copied into the storage root
    pub migrated: Vec<String>,
    /// Items left alone because the destination already existed
    pub skipped: Vec<String>,
    /// Items that failed to copy
    pub failed: Vec<String>,
    /// Whether the legacy directory was removed afterwards
    pub legacy_removed: bool,
}

/// File-backed store for every collection's clips
#[derive(Debug, Clone)]
pub struct MarkdownLedger {
    root: PathBuf,
    order: LoadOrder,
}

impl MarkdownLedger {
    /// Create a ledger rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            order: LoadOrder::default(),
        }
    }

    /// Choose how loaded clips are ordered
    pub fn with_load_order(mut self, order: LoadOrder) -> Self {
        self.order = order;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn load_order(&self) -> LoadOrder {
        self.order
    }

    /// Directory holding one collection
    pub fn collection_dir(&self, color: HighlighterColor) -> PathBuf {
        self.root.join(color.storage_key())
    }

    /// Ledger file for one collection
    pub fn collection_file(&self, color: HighlighterColor) -> PathBuf {
        self.collection_dir(color)
            .join(format!("{}_clips.md", color.storage_key()))
    }

    /// Create the root and every collection directory
    pub fn ensure_layout(&self) {
        if let Err(e) = create_dir(&self.root) {
            error!("{}", e);
        }
        for color in HighlighterColor::ALL {
            if let Err(e) = create_dir(&self.collection_dir(color)) {
                error!("{}", e);
            }
        }
    }

    /// Append one clip to its collection, logging failures
    pub fn append(&self, clip: &Clip, color: HighlighterColor) {
        if let Err(e) = self.try_append(clip, color) {
            error!("Failed appending clip to {}: {}", color, e);
        }
    }

    /// Append one clip to its collection
    pub fn try_append(&self, clip: &Clip, color: HighlighterColor) -> Result<(), LedgerError> {
        create_dir(&self.collection_dir(color))?;
        let path = self.collection_file(color);
        let record = serialize_record(clip);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LedgerError::Write {
                path: path.clone(),
                source,
            })?;
        file.write_all(record.as_bytes())
            .map_err(|source| LedgerError::Write {
                path: path.clone(),
                source,
            })?;

        debug!("Appended clip {} to {:?}", clip.id, path);
        Ok(())
    }

    /// Load a collection, logging failures and returning what could be read
    pub fn load(&self, color: HighlighterColor) -> Vec<Clip> {
        match self.try_load(color) {
            Ok(clips) => clips,
            Err(e) => {
                error!("Failed loading {}: {}", color, e);
                Vec::new()
            }
        }
    }

    /// Load a collection in display order
    pub fn try_load(&self, color: HighlighterColor) -> Result<Vec<Clip>, LedgerError> {
        let path = self.collection_file(color);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(LedgerError::Read { path, source }),
        };

        let mut clips = parse_records(&content, Utc::now());
        match self.order {
            LoadOrder::File => clips.reverse(),
            LoadOrder::Timestamp => clips.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        }

        debug!("Loaded {} clips for {}", clips.len(), color);
        Ok(clips)
    }

    /// Replace a collection's file with `clips`, logging failures
    pub fn rewrite(&self, clips: &[Clip], color: HighlighterColor) {
        if let Err(e) = self.try_rewrite(clips, color) {
            error!("Failed rewriting {}: {}", color, e);
        }
    }

    /// Replace a collection's file so that `load` yields `clips` in order
    ///
    /// An empty list leaves no file behind.
    pub fn try_rewrite(&self, clips: &[Clip], color: HighlighterColor) -> Result<(), LedgerError> {
        self.try_delete_all(color)?;
        if clips.is_empty() {
            return Ok(());
        }

        create_dir(&self.collection_dir(color))?;
        let path = self.collection_file(color);
        let content: String = clips.iter().rev().map(serialize_record).collect();
        fs::write(&path, content).map_err(|source| LedgerError::Write {
            path: path.clone(),
            source,
        })?;

        debug!("Rewrote {} clips to {:?}", clips.len(), path);
        Ok(())
    }

    /// Persist a deletion from the list left behind
    ///
    /// Clip ids are not stored on disk, so the file is re-derived from
    /// `remaining` rather than filtered. Nothing remaining removes the file.
    pub fn delete_clip(&self, remaining: &[Clip], color: HighlighterColor) {
        if remaining.is_empty() {
            self.delete_all(color);
        } else {
            self.rewrite(remaining, color);
        }
    }

    /// Remove a collection's file, logging failures
    pub fn delete_all(&self, color: HighlighterColor) {
        if let Err(e) = self.try_delete_all(color) {
            error!("Failed deleting clips for {}: {}", color, e);
        }
    }

    /// Remove a collection's file if present
    pub fn try_delete_all(&self, color: HighlighterColor) -> Result<(), LedgerError> {
        let path = self.collection_file(color);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(LedgerError::Remove { path, source }),
        }
    }

    /// Copy a legacy storage directory into the root
    ///
    /// Existing destinations are never overwritten. The legacy directory is
    /// removed only when every item copied cleanly.
    pub fn migrate_legacy(&self, legacy_root: &Path) -> MigrationReport {
        let mut report = MigrationReport::default();
        if !legacy_root.exists() {
            return report;
        }
        if let Err(e) = create_dir(&self.root) {
            error!("{}", e);
            return report;
        }

        let entries = match fs::read_dir(legacy_root) {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed reading legacy storage {:?}: {}", legacy_root, e);
                return report;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    error!("Failed reading legacy storage entry: {}", e);
                    report.failed.push(String::from("<unreadable entry>"));
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let destination = self.root.join(&name);
            if destination.exists() {
                report.skipped.push(name);
                continue;
            }

            match copy_recursively(&entry.path(), &destination) {
                Ok(()) => {
                    info!("Migrated legacy storage item {}", name);
                    report.migrated.push(name);
                }
                Err(e) => {
                    error!("Failed migrating {}: {}", name, e);
                    report.failed.push(name);
                }
            }
        }

        if report.failed.is_empty() {
            match fs::remove_dir_all(legacy_root) {
                Ok(()) => {
                    info!("Removed legacy storage directory at {:?}", legacy_root);
                    report.legacy_removed = true;
                }
                Err(e) => error!("Failed removing legacy storage directory: {}", e),
            }
        } else {
            warn!(
                "Keeping legacy storage at {:?}: {} items failed to migrate",
                legacy_root,
                report.failed.len()
            );
        }

        report
    }
}

fn create_dir(path: &Path) -> Result<(), LedgerError> {
    fs::create_dir_all(path).map_err(|source| LedgerError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn copy_recursively(from: &Path, to: &Path) -> io::Result<()> {
    if from.is_dir() {
        fs::create_dir_all(to)?;
        for entry in fs::read_dir(from)? {
            let entry = entry?;
            copy_recursively(&entry.path(), &to.join(entry.file_name()))?;
        }
        Ok(())
    } else {
        fs::copy(from, to).map(|_| ())
    }
}
