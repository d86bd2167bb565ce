//! CSS selectors used to locate each field of the appointment form.

use serde::{Deserialize, Serialize};

/// Locator rules for the appointment form.
///
/// Defaults match the Shepherd web app's "edit appointment" modal. Any entry
/// can be overridden from the `[selectors]` table of the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorRules {
    /// The enclosing appointment form
    pub form: String,
    pub date: String,
    pub duration: String,
    pub provider: String,
    pub client_name: String,
    pub client_phone: String,
    pub client_email: String,
    pub address_street: String,
    pub address_details: String,
    /// One match per patient card; the patient fields below are looked up inside it
    pub patient_card: String,
    pub patient_name: String,
    pub patient_details: String,
    /// One match per note block; the note fields below are looked up inside it
    pub note_item: String,
    pub note_content: String,
    pub note_author: String,
    pub reason: String,
    pub appointment_id: String,
}

impl Default for LocatorRules {
    fn default() -> Self {
        LocatorRules {
            form: ".ReactModal__Content".into(),
            date: r#"[data-test-id="appointment-form-date-input"]"#.into(),
            duration: r#"[data-test-id="appointment-form-duration-input"]"#.into(),
            provider: r#"[data-test-id="appointment-form-provider-control"] .react-select__single-value"#
                .into(),
            client_name: r#"[data-test-id="appointment-form-clientName"]"#.into(),
            client_phone: r#"a[href^="tel:"]"#.into(),
            client_email: r#"a[href^="mailto:"]"#.into(),
            address_street: r#"[data-test-id="client-page-adress-1"]"#.into(),
            address_details: r#"[data-test-id="client-page-adress-details"]"#.into(),
            patient_card: r#"[data-test-id^="appointment-form-patient-card-"]"#.into(),
            patient_name: r#"[data-test-id="appointment-form-patientLink"]"#.into(),
            patient_details: ".card__body--sml .col-sml-12".into(),
            note_item: r#"[data-test-groupid="undefined-note-item"]"#.into(),
            note_content: r#"[data-test-id="note-content"] p"#.into(),
            note_author: ".notes__user-info".into(),
            reason: r#"[data-test-id="appointment-form-reasonForVisit-txtbox"]"#.into(),
            appointment_id: r#"[data-test-id="appointment-form-id"]"#.into(),
        }
    }
}
