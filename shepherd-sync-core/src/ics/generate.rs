//! iCalendar document generation.

use chrono::{DateTime, Utc};

use super::escape::escape_text;
use crate::appointment::EventData;
use crate::error::{SyncError, SyncResult};
use crate::extract::FALLBACK_TITLE;
use crate::instant::parse_instant;

/// Domain suffix of generated UIDs.
pub const DEFAULT_UID_DOMAIN: &str = "shepherd.vet";

/// Generate .ics content for an event.
///
/// Lines are CRLF-separated with no trailing line break. A UID is only
/// emitted when the event carries an appointment id.
pub fn generate_ics(event: &EventData, uid_domain: &str) -> SyncResult<String> {
    if event.start_date.trim().is_empty() || event.end_date.trim().is_empty() {
        return Err(SyncError::Format("missing required date information".to_string()));
    }

    let start = format_timestamp(&resolve(&event.start_date)?);
    let end = format_timestamp(&resolve(&event.end_date)?);

    let title = if event.title.is_empty() {
        FALLBACK_TITLE
    } else {
        event.title.as_str()
    };

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
    ];

    if let Some(id) = event.appointment_id.as_deref().filter(|id| !id.is_empty()) {
        lines.push(format!("UID:{}@{}", id, uid_domain));
    }

    lines.push(format!("SUMMARY:{}", escape_text(title)));
    lines.push(format!("DTSTART:{}", start));
    lines.push(format!("DTEND:{}", end));
    lines.push(format!("LOCATION:{}", escape_text(&event.location)));
    lines.push(format!("DESCRIPTION:{}", escape_text(&event.notes)));
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    Ok(lines.join("\r\n"))
}

/// UTC basic format, e.g. `20240601T140000Z`.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M%SZ").to_string()
}

fn resolve(value: &str) -> SyncResult<DateTime<Utc>> {
    parse_instant(value).ok_or_else(|| SyncError::Format(format!("invalid date '{}'", value)))
}
