//! # NibNab
//!
//! Clipboard highlighter for macOS and Linux.
//!
//! NibNab watches the clipboard, files each captured snippet under one of
//! five highlighter colors, and keeps every color as a human-readable
//! Markdown ledger on disk.

pub mod cli;
pub mod clip;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod export;
pub mod ledger;
pub mod monitor;
pub mod notify;
pub mod prefs;
pub mod query;
pub mod store;

pub use clip::Clip;
pub use collection::HighlighterColor;
pub use config::Config;
pub use ledger::MarkdownLedger;
pub use store::{ClipStore, StoreEvent};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
