//! Plain-text rendering helpers for notes.
//!
//! Pure string functions used by the CLI: share text, list previews, and
//! coarse relative timestamps. No I/O here.

use crate::models::Note;
use chrono::{Local, TimeZone};

/// Maximum preview length in characters, before the ellipsis.
pub const PREVIEW_LENGTH: usize = 100;

/// Renders a note as plain shareable text: title, blank line, content.
#[must_use]
pub fn share_text(note: &Note) -> String {
    format!("{}\n\n{}", note.title, note.content)
}

/// Returns a preview of note content, truncated to [`PREVIEW_LENGTH`]
/// characters with a trailing ellipsis.
///
/// Truncation counts characters, not bytes, so multi-byte content never
/// gets split mid-character. Newlines are flattened to spaces.
#[must_use]
pub fn preview(content: &str) -> String {
    let flat: String = content
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= PREVIEW_LENGTH {
        return flat;
    }
    let truncated: String = flat.chars().take(PREVIEW_LENGTH).collect();
    format!("{}...", truncated.trim_end())
}

/// Renders a millisecond timestamp as coarse relative time.
///
/// Buckets: "just now" under a minute, then minutes, hours, and days up to
/// a week; anything older renders as a local calendar date.
#[must_use]
pub fn relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let delta_ms = now_ms.saturating_sub(timestamp_ms);
    let minutes = delta_ms / 60_000;
    let hours = minutes / 60;
    let days = hours / 24;

    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        Local
            .timestamp_millis_opt(timestamp_ms)
            .single()
            .map_or_else(
                || timestamp_ms.to_string(),
                |dt| dt.format("%Y-%m-%d").to_string(),
            )
    }
}
