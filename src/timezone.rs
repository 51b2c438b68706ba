//! Backend timestamps rendered in India Standard Time.

use chrono::{DateTime, FixedOffset};

/// Wire format used by the calling backend, e.g. `2024-01-15 10:30:00+0000`.
const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%z";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// IST is UTC+05:30 with no daylight saving.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Placeholder for missing timestamps.
pub const PLACEHOLDER: &str = "-";

/// Convert a backend timestamp to IST for display.
///
/// Best effort: missing input yields `-`, anything that does not parse is
/// returned unchanged.
pub fn to_display_timezone(input: Option<&str>) -> String {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return PLACEHOLDER.to_string(),
    };

    // chrono skips whitespace before numeric fields; the wire format has
    // exactly one space, between date and time.
    if !has_single_separator(raw) {
        tracing::trace!("Unparseable timestamp {:?}: unexpected whitespace", raw);
        return raw.to_string();
    }

    match DateTime::parse_from_str(raw, WIRE_FORMAT) {
        Ok(ts) => ts.with_timezone(&ist()).format(DISPLAY_FORMAT).to_string(),
        Err(e) => {
            tracing::trace!("Unparseable timestamp {:?}: {}", raw, e);
            raw.to_string()
        }
    }
}

fn has_single_separator(raw: &str) -> bool {
    let mut spaces = raw.char_indices().filter(|(_, c)| c.is_whitespace());
    match (spaces.next(), spaces.next()) {
        (Some((pos, ' ')), None) => pos > 0 && pos + 1 < raw.len(),
        _ => false,
    }
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset is within +/-24h")
}
