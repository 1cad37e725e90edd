//! Search and sort over a collection

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::clip::Clip;

/// Display sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Collection order, as captured, moved and reordered
    #[default]
    Display,
    NewestFirst,
    OldestFirst,
    ByAppName,
    ByLength,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "display" | "manual" => Ok(SortOrder::Display),
            "newest" | "newest-first" => Ok(SortOrder::NewestFirst),
            "oldest" | "oldest-first" => Ok(SortOrder::OldestFirst),
            "app" | "by-app-name" => Ok(SortOrder::ByAppName),
            "length" | "by-length" => Ok(SortOrder::ByLength),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// True when text or source app contains `query`, ignoring case
pub fn matches(clip: &Clip, query: &str) -> bool {
    let needle = query.to_lowercase();
    clip.text.to_lowercase().contains(&needle) || clip.source_app.to_lowercase().contains(&needle)
}

/// Filter by `query` (empty matches everything) and sort
///
/// Sorting is stable, so ties keep their collection order.
pub fn view(clips: &[Clip], query: &str, order: SortOrder) -> Vec<Clip> {
    let mut result: Vec<Clip> = if query.is_empty() {
        clips.to_vec()
    } else {
        clips.iter().filter(|c| matches(c, query)).cloned().collect()
    };

    match order {
        SortOrder::Display => {}
        SortOrder::NewestFirst => result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::OldestFirst => result.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        SortOrder::ByAppName => result.sort_by(|a, b| a.source_app.cmp(&b.source_app)),
        SortOrder::ByLength => result.sort_by(|a, b| b.len().cmp(&a.len())),
    }

    result
}
