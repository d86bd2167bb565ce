//! Data-URI packaging of calendar documents.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{SyncError, SyncResult};

pub const DATA_URI_PREFIX: &str = "data:text/calendar;charset=utf-8;base64,";

const DEFAULT_FILE_STEM: &str = "vet-appointment";

/// What the download collaborator is asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadRequest {
    pub payload_uri: String,
    pub suggested_filename: String,
    /// Ask the user where to save instead of using the default location
    pub prompt_save_location: bool,
}

/// Answer from the download collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DownloadStatus {
    Success,
    Error { message: String },
}

/// Base64 payload of a calendar document.
///
/// The document is percent-encoded, every `%XX` escape is reinterpreted as
/// the byte it names, and the resulting byte string is base64-encoded. The
/// bytes are exactly the document's UTF-8 encoding, so non-ASCII text
/// survives the base64 channel unchanged.
pub fn encode_payload(document: &str) -> String {
    let percent_encoded = urlencoding::encode(document);
    let bytes = urlencoding::decode_binary(percent_encoded.as_bytes());
    STANDARD.encode(bytes)
}

pub fn decode_payload(payload: &str) -> SyncResult<Vec<u8>> {
    STANDARD
        .decode(payload)
        .map_err(|e| SyncError::Serialization(format!("invalid base64 payload: {}", e)))
}

pub fn data_uri(payload: &str) -> String {
    format!("{}{}", DATA_URI_PREFIX, payload)
}

/// Bytes carried by a calendar data-URI.
pub fn decode_data_uri(uri: &str) -> SyncResult<Vec<u8>> {
    let payload = uri.strip_prefix(DATA_URI_PREFIX).ok_or_else(|| {
        SyncError::Serialization("not a base64 text/calendar data URI".to_string())
    })?;
    decode_payload(payload)
}

/// `"{title}.ics"`, or `"vet-appointment.ics"` for an empty title.
pub fn suggested_filename(title: &str) -> String {
    let stem = if title.is_empty() { DEFAULT_FILE_STEM } else { title };
    format!("{}.ics", stem)
}
