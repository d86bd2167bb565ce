//! Form-to-download pipeline.
//!
//! Everything is built in memory; nothing reaches the download collaborator
//! unless every step succeeded.

use tracing::debug;

use crate::appointment::EventData;
use crate::error::SyncResult;
use crate::extract::extract;
use crate::ics::{DEFAULT_UID_DOMAIN, generate_ics};
use crate::locator::FieldLocator;
use crate::payload::{DownloadRequest, data_uri, encode_payload, suggested_filename};
use crate::rules::LocatorRules;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub uid_domain: String,
    pub prompt_save_location: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            uid_domain: DEFAULT_UID_DOMAIN.to_string(),
            prompt_save_location: true,
        }
    }
}

/// Extract the appointment from `form` and package it for download.
pub fn create_download<L: FieldLocator>(
    form: &L,
    rules: &LocatorRules,
    options: &PipelineOptions,
) -> SyncResult<DownloadRequest> {
    let record = extract(form, rules)?;
    debug!(title = %record.title, start = %record.start, "extracted appointment");
    download_request(&record.to_event_data(), options)
}

/// Encode an already extracted event and package it for download.
pub fn download_request(event: &EventData, options: &PipelineOptions) -> SyncResult<DownloadRequest> {
    let document = generate_ics(event, &options.uid_domain)?;

    Ok(DownloadRequest {
        payload_uri: data_uri(&encode_payload(&document)),
        suggested_filename: suggested_filename(&event.title),
        prompt_save_location: options.prompt_save_location,
    })
}
