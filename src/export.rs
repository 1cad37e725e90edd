//! Read-only document projections of a collection

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clip::Clip;
use crate::collection::HighlighterColor;

/// Heading prefix of a Markdown export
pub const EXPORT_TITLE: &str = "NibNab Export";

/// Separator between clips in a plain-text export
pub const PLAIN_TEXT_SEPARATOR: &str = "\n\n---\n\n";

const EXPORT_DATE_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Export document flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Markdown,
    PlainText,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::PlainText => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Markdown => f.write_str("markdown"),
            ExportFormat::PlainText => f.write_str("text"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            "text" | "txt" | "plain" => Ok(ExportFormat::PlainText),
            other => Err(format!("unknown export format: {}", other)),
        }
    }
}

/// Suggested file name, e.g. `yellow-clips.md`
pub fn export_file_name(color: HighlighterColor, format: ExportFormat) -> String {
    format!(
        "{}-clips.{}",
        color.short_name().to_lowercase(),
        format.extension()
    )
}

/// Render clips in the requested format
///
/// Dates are shown in the time zone of `exported_at`.
pub fn render<Tz>(
    color: HighlighterColor,
    clips: &[Clip],
    format: ExportFormat,
    exported_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match format {
        ExportFormat::Markdown => render_markdown(color, clips, exported_at),
        ExportFormat::PlainText => render_plain_text(clips),
    }
}

fn render_markdown<Tz>(color: HighlighterColor, clips: &[Clip], exported_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let zone = exported_at.timezone();
    let mut markdown = format!("# {} - {}\n", EXPORT_TITLE, color.name());
    markdown.push_str(&format!(
        "Exported: {}\n\n",
        exported_at.format(EXPORT_DATE_FORMAT)
    ));

    for clip in clips {
        let captured = clip.timestamp.with_timezone(&zone);
        markdown.push_str("---\n");
        markdown.push_str(&format!("### {}\n", clip.source_app));
        markdown.push_str(&format!("*{}*\n\n", captured.format(EXPORT_DATE_FORMAT)));
        markdown.push_str(&clip.text);
        markdown.push_str("\n\n");
    }

    markdown
}

fn render_plain_text(clips: &[Clip]) -> String {
    clips
        .iter()
        .map(|clip| clip.text.as_str())
        .collect::<Vec<_>>()
        .join(PLAIN_TEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Clip> {
        let t = Utc.with_ymd_and_hms(2024, 1, 5, 15, 4, 0).unwrap();
        vec![
            Clip::with_timestamp("first", "Safari", t),
            Clip::with_timestamp("second", "Mail", t),
        ]
    }

    #[test]
    fn test_markdown() {
        let exported_at = Utc.with_ymd_and_hms(2024, 2, 10, 9, 30, 0).unwrap();
        let doc = render(
            HighlighterColor::Yellow,
            &sample(),
            ExportFormat::Markdown,
            &exported_at,
        );
        assert_eq!(
            doc,
            "# NibNab Export - Highlighter Yellow\n\
             Exported: Feb 10, 2024 9:30 AM\n\n\
             ---\n### Safari\n*Jan 5, 2024 3:04 PM*\n\nfirst\n\n\
             ---\n### Mail\n*Jan 5, 2024 3:04 PM*\n\nsecond\n\n"
        );
    }

    #[test]
    fn test_plain_text() {
        let doc = render(
            HighlighterColor::Pink,
            &sample(),
            ExportFormat::PlainText,
            &Utc::now(),
        );
        assert_eq!(doc, "first\n\n---\n\nsecond");
    }

    #[test]
    fn test_file_name_and_parse() {
        assert_eq!(
            export_file_name(HighlighterColor::Purple, ExportFormat::PlainText),
            "purple-clips.txt"
        );
        assert_eq!("md".parse(), Ok(ExportFormat::Markdown));
        assert_eq!("TEXT".parse(), Ok(ExportFormat::PlainText));
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}
