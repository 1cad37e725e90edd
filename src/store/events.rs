//! Change notifications published by the clip store

use uuid::Uuid;

use crate::clip::Clip;
use crate::collection::HighlighterColor;

/// A change applied to the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    /// A clip was captured or added by hand
    Captured { color: HighlighterColor, clip: Clip },
    /// A clip was deleted and parked for undo
    Deleted { color: HighlighterColor, clip: Clip },
    /// A deleted clip was brought back
    Restored { color: HighlighterColor, clip: Clip },
    /// Every clip in a collection was removed
    Cleared { color: HighlighterColor },
    /// A clip changed collection
    Moved {
        from: HighlighterColor,
        to: HighlighterColor,
        clip: Clip,
    },
    /// A clip changed position within its collection
    Reordered {
        color: HighlighterColor,
        clip_id: Uuid,
        index: usize,
    },
    /// A clip's text was replaced
    Edited { color: HighlighterColor, clip: Clip },
    /// Captures now go to a different collection
    ActiveColorChanged { color: HighlighterColor },
    /// A different collection is on display
    ViewedColorChanged { color: HighlighterColor },
    /// A collection's custom label was set or cleared
    LabelChanged {
        color: HighlighterColor,
        label: Option<String>,
    },
    /// Clipboard capture was switched on or off
    MonitoringChanged { enabled: bool },
}
