//! Core pipeline for shepherd-sync.
//!
//! This crate turns one rendered appointment form into a calendar file:
//! - `extract` reads the form through a [`FieldLocator`] into an [`AppointmentRecord`]
//! - `describe` builds the event description text
//! - `ics` serializes the event and `payload` packages it as a data-URI download

pub mod appointment;
pub mod describe;
pub mod error;
pub mod extract;
pub mod ics;
pub mod instant;
pub mod locator;
pub mod payload;
pub mod pipeline;
pub mod rules;
pub mod text;

pub use appointment::{
    Address, AppointmentDetails, AppointmentRecord, ClientInfo, EventData, NoteInfo, PatientInfo,
};
pub use error::{SyncError, SyncResult};
pub use locator::{FieldLocator, FixtureFragment, HtmlDocument, HtmlFragment};
pub use payload::{DownloadRequest, DownloadStatus};
pub use rules::LocatorRules;
pub use pipeline::{PipelineOptions, create_download, download_request};
