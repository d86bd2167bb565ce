//! Appointment types produced by the extractor.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A fully extracted appointment, ready to be encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRecord {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Composed client address, empty when incomplete
    pub location: String,
    pub description: String,
    /// External identifier, only used to build the event UID
    pub appointment_id: Option<String>,
}

impl AppointmentRecord {
    /// The subset of the record the encoder consumes, with timestamps
    /// rendered as RFC 3339 strings (millisecond precision, `Z` suffix).
    pub fn to_event_data(&self) -> EventData {
        EventData {
            title: self.title.clone(),
            start_date: self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            end_date: self.end.to_rfc3339_opts(SecondsFormat::Millis, true),
            location: self.location.clone(),
            notes: self.description.clone(),
            appointment_id: self.appointment_id.clone(),
        }
    }
}

/// Event payload passed from the extractor to the encoder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
}

/// Pet owner details shown on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub details: String,
}

impl ClientInfo {
    /// `"{street}, {details}"` when both parts are present, otherwise empty.
    /// A partial address is never emitted.
    pub fn full_address(&self) -> String {
        let Address { street, details } = &self.address;
        if street.is_empty() || details.is_empty() {
            return String::new();
        }
        format!("{}, {}", street, details)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientInfo {
    pub name: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteInfo {
    pub content: String,
    /// Author and timestamp line shown under the note
    pub author_info: String,
}

/// Everything the event description is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub provider: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub reason: String,
    pub notes: Vec<NoteInfo>,
    pub patients: Vec<PatientInfo>,
}
