//! iCalendar output.
//!
//! The generated document is a fixed-order RFC 5545 subset: one VEVENT with
//! UID (optional), SUMMARY, DTSTART, DTEND, LOCATION and DESCRIPTION.

mod escape;
mod generate;

pub use escape::{escape_text, unescape_text};
pub use generate::{DEFAULT_UID_DOMAIN, format_timestamp, generate_ics};
