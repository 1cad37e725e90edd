//! Markdown record codec
//!
//! Each clip is written as:
//!
//! ```text
//! \n---\n
//! ### <source app>[ | [<url>](<url>)]
//! <yyyy-mm-dd HH:MM, UTC>
//!
//! <text>\n
//! ```
//!
//! Body lines made only of `---` (after any leading backslashes) are written
//! with one extra leading backslash so they can never match the delimiter.

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::clip::Clip;

/// Separator placed in front of every record
pub const RECORD_DELIMITER: &str = "\n---\n";

/// Timestamp pattern, always rendered in UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

const HEADER_PREFIX: &str = "###";

/// Zone suffix some early files carried after the timestamp
const LEGACY_ZONE_SUFFIX: &str = " Bangkok";

static LINK_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\]\(([^)]*)\)").expect("link pattern is valid"));

/// Serialize one clip as a ledger record
pub fn serialize_record(clip: &Clip) -> String {
    let mut record = String::with_capacity(clip.text.len() + 64);
    record.push_str(RECORD_DELIMITER);
    record.push_str(HEADER_PREFIX);
    record.push(' ');
    record.push_str(&header_safe(&clip.source_app));
    if let Some(url) = &clip.source_url {
        let url = header_safe(url);
        record.push_str(&format!(" | [{}]({})", url, url));
    }
    record.push('\n');
    record.push_str(&format_timestamp(&clip.timestamp));
    record.push_str("\n\n");
    record.push_str(&escape_body(&clip.text));
    record.push('\n');
    record
}

/// Parse every well-formed record in file order
///
/// Malformed records are skipped. A missing or unreadable timestamp falls
/// back to `now`.
pub fn parse_records(content: &str, now: DateTime<Utc>) -> Vec<Clip> {
    content
        .split(RECORD_DELIMITER)
        .filter(|fragment| !fragment.trim().is_empty())
        .filter_map(|fragment| parse_record(fragment, now))
        .collect()
}

fn parse_record(fragment: &str, now: DateTime<Utc>) -> Option<Clip> {
    let lines: Vec<&str> = fragment.split('\n').collect();
    if lines.len() < 3 {
        return None;
    }

    let header_index = lines
        .iter()
        .position(|line| line.starts_with(HEADER_PREFIX))?;
    let (source_app, source_url) = parse_header(lines[header_index]);

    let timestamp = lines
        .get(header_index + 1)
        .and_then(|line| parse_timestamp(line))
        .unwrap_or(now);

    let text = lines
        .get(header_index + 2..)
        .map(|body| {
            body.iter()
                .map(|line| unescape_line(line))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();
    let text = text.trim();

    if source_app.is_empty() || text.is_empty() {
        return None;
    }

    let mut clip = Clip::with_timestamp(text, source_app, timestamp);
    clip.source_url = source_url;
    Some(clip)
}

fn parse_header(line: &str) -> (String, Option<String>) {
    let content = line.trim_start_matches(HEADER_PREFIX).trim();

    match content.split_once('|') {
        Some((app, rest)) => {
            let url = rest
                .rsplit('|')
                .next()
                .and_then(|part| LINK_TARGET.captures(part))
                .map(|caps| caps[1].to_string());
            (app.trim().to_string(), url)
        }
        None => (content.to_string(), None),
    }
}

/// Render a timestamp the way the ledger stores it
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a ledger timestamp line
pub fn parse_timestamp(line: &str) -> Option<DateTime<Utc>> {
    let cleaned = line.trim();
    let cleaned = cleaned.strip_suffix(LEGACY_ZONE_SUFFIX).unwrap_or(cleaned);
    NaiveDateTime::parse_from_str(cleaned, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Drop seconds and sub-second precision, matching what a record keeps
pub fn truncate_to_minute(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(timestamp)
}

fn header_safe(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '|' => ' ',
            other => other,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_rule_line(line: &str) -> bool {
    line.trim_start_matches('\\') == "---"
}

fn escape_body(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if is_rule_line(line) {
                format!("\\{}", line)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn unescape_line(line: &str) -> &str {
    if is_rule_line(line) {
        line.strip_prefix('\\').unwrap_or(line)
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, h, m, 41).unwrap()
    }

    #[test]
    fn test_serialize_layout() {
        let clip = Clip::with_timestamp("Hello world", "TextEdit", at(14, 5));
        assert_eq!(
            serialize_record(&clip),
            "\n---\n### TextEdit\n2024-03-09 14:05\n\nHello world\n"
        );
    }

    #[test]
    fn test_serialize_with_url() {
        let clip = Clip::with_timestamp("quote", "Safari", at(9, 0)).with_url("https://a.b/c");
        let record = serialize_record(&clip);
        assert!(record.contains("### Safari | [https://a.b/c](https://a.b/c)\n"));
    }

    #[test]
    fn test_parse_single_record() {
        let content = "\n---\n### TextEdit\n2024-03-09 14:05\n\nHello world\n";
        let clips = parse_records(content, Utc::now());
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].text, "Hello world");
        assert_eq!(clips[0].source_app, "TextEdit");
        assert_eq!(clips[0].timestamp, truncate_to_minute(at(14, 5)));
        assert_eq!(clips[0].source_url, None);
    }

    #[test]
    fn test_parse_url_header() {
        let content = "\n---\n### Safari | [https://x.y](https://x.y)\n2024-03-09 14:05\n\nbody\n";
        let clips = parse_records(content, Utc::now());
        assert_eq!(clips[0].source_app, "Safari");
        assert_eq!(clips[0].source_url.as_deref(), Some("https://x.y"));
    }

    #[test]
    fn test_bad_timestamp_falls_back_to_now() {
        let now = at(23, 59);
        let content = "\n---\n### Notes\nyesterday-ish\n\nbody\n";
        let clips = parse_records(content, now);
        assert_eq!(clips[0].timestamp, now);
    }

    #[test]
    fn test_legacy_zone_suffix() {
        let parsed = parse_timestamp("2024-03-09 14:05 Bangkok");
        assert_eq!(parsed, Some(truncate_to_minute(at(14, 5))));
    }

    #[test]
    fn test_drops_malformed_records() {
        let content = concat!(
            "\n---\n### \n2024-03-09 14:05\n\nno app\n",
            "\n---\n### Mail\n2024-03-09 14:05\n\n   \n",
            "\n---\njust some text\nwithout a header\nat all\n",
            "\n---\n### Kept\n2024-03-09 14:05\n\nfine\n",
        );
        let clips = parse_records(content, Utc::now());
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].source_app, "Kept");
    }

    #[test]
    fn test_multiline_body_is_trimmed() {
        let content = "\n---\n### Code\n2024-03-09 14:05\n\n  fn main() {}\n\n  // done\n\n";
        let clips = parse_records(content, Utc::now());
        assert_eq!(clips[0].text, "fn main() {}\n\n  // done");
    }

    #[test]
    fn test_delimiter_inside_body_survives() {
        let text = "intro\n---\nmiddle\n\\---\nend";
        let clip = Clip::with_timestamp(text, "Obsidian", at(8, 30));
        let record = serialize_record(&clip);
        assert!(!record[RECORD_DELIMITER.len()..].contains(RECORD_DELIMITER));

        let clips = parse_records(&record, Utc::now());
        assert_eq!(clips.len(), 1);
        assert_eq!(clips[0].text, text);
    }

    #[test]
    fn test_header_sanitized() {
        let clip = Clip::with_timestamp("x", "Weird | App\nName", at(1, 2));
        let clips = parse_records(&serialize_record(&clip), Utc::now());
        assert_eq!(clips[0].source_app, "Weird   App Name");
    }
}
