//! Highlighter colors that name each clip collection

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const NAME_PREFIX: &str = "Highlighter ";

/// One of the fixed highlighter collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlighterColor {
    Yellow,
    Orange,
    Pink,
    Purple,
    Green,
}

impl HighlighterColor {
    /// All collections in menu order
    pub const ALL: [HighlighterColor; 5] = [
        HighlighterColor::Yellow,
        HighlighterColor::Orange,
        HighlighterColor::Pink,
        HighlighterColor::Purple,
        HighlighterColor::Green,
    ];

    /// Full display name, e.g. "Highlighter Yellow"
    pub fn name(self) -> &'static str {
        match self {
            HighlighterColor::Yellow => "Highlighter Yellow",
            HighlighterColor::Orange => "Highlighter Orange",
            HighlighterColor::Pink => "Highlighter Pink",
            HighlighterColor::Purple => "Highlighter Purple",
            HighlighterColor::Green => "Highlighter Green",
        }
    }

    /// Name without the "Highlighter " prefix
    pub fn short_name(self) -> &'static str {
        &self.name()[NAME_PREFIX.len()..]
    }

    /// Hex swatch used by front ends
    pub fn hex(self) -> &'static str {
        match self {
            HighlighterColor::Yellow => "#FFEB3B",
            HighlighterColor::Orange => "#f68717",
            HighlighterColor::Pink => "#f60474",
            HighlighterColor::Purple => "#8717f6",
            HighlighterColor::Green => "#39FF14",
        }
    }

    /// Directory and file stem used by the ledger
    pub fn storage_key(self) -> String {
        self.name().to_lowercase()
    }
}

impl Default for HighlighterColor {
    fn default() -> Self {
        HighlighterColor::Yellow
    }
}

impl fmt::Display for HighlighterColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HighlighterColor {
    type Err = String;

    /// Accepts the short name or the full name, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        HighlighterColor::ALL
            .into_iter()
            .find(|color| {
                color.short_name().eq_ignore_ascii_case(wanted)
                    || color.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown highlighter color: {}", s))
    }
}
