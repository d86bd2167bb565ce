//! Appointment extraction.
//!
//! Only the start date is mandatory. Every other field degrades to a
//! documented default when its element is missing or its lookup fails,
//! and each degradation is logged.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::appointment::{
    Address, AppointmentDetails, AppointmentRecord, ClientInfo, NoteInfo, PatientInfo,
};
use crate::describe::format_description;
use crate::error::{SyncError, SyncResult};
use crate::instant::parse_instant;
use crate::locator::FieldLocator;
use crate::rules::LocatorRules;
use crate::text::{normalize_text, strip_location_marker};

pub const DEFAULT_DURATION_MINUTES: i64 = 30;
pub const UNKNOWN_PROVIDER: &str = "Unknown Provider";
pub const DEFAULT_PATIENT_NAME: &str = "Pet";
pub const FALLBACK_TITLE: &str = "Vet Appointment";

/// Extract one appointment from its form.
pub fn extract<L: FieldLocator>(form: &L, rules: &LocatorRules) -> SyncResult<AppointmentRecord> {
    let (start, end) = appointment_basics(form, rules)?;

    let provider = provider_name(form, rules);
    let client = client_info(form, rules);
    let patients = patients(form, rules);
    let notes = notes(form, rules);
    let reason = reason_for_visit(form, rules);
    let appointment_id = appointment_id(form, rules);

    let title = match &provider {
        Ok(name) => generate_title(name, &client.name),
        Err(_) => FALLBACK_TITLE.to_string(),
    };
    let provider = provider.unwrap_or_else(|_| UNKNOWN_PROVIDER.to_string());

    let description = format_description(&AppointmentDetails {
        provider,
        client_name: client.name.clone(),
        client_phone: client.phone.clone(),
        client_email: client.email.clone(),
        reason,
        notes,
        patients,
    });

    Ok(AppointmentRecord {
        title,
        start,
        end,
        location: client.full_address(),
        description,
        appointment_id,
    })
}

/// Start and end instants.
fn appointment_basics<L: FieldLocator>(
    form: &L,
    rules: &LocatorRules,
) -> SyncResult<(DateTime<Utc>, DateTime<Utc>)> {
    let date_input = form.find_one(&rules.date).map_err(|e| {
        warn!(error = %e, "date lookup failed");
        invalid_start()
    })?;
    let start = date_input
        .as_deref()
        .and_then(parse_instant)
        .ok_or_else(invalid_start)?;

    let duration_input = soft_lookup(form, &rules.duration, "duration");
    let duration_minutes = parse_duration_minutes(duration_input.as_deref()).unwrap_or_else(|| {
        debug!(
            input = ?duration_input,
            default = DEFAULT_DURATION_MINUTES,
            "duration missing or not a positive number, using default"
        );
        DEFAULT_DURATION_MINUTES
    });

    let end = add_minutes(start, duration_minutes)
        .or_else(|| {
            warn!(
                duration_minutes,
                default = DEFAULT_DURATION_MINUTES,
                "duration out of range, using default"
            );
            add_minutes(start, DEFAULT_DURATION_MINUTES)
        })
        .ok_or_else(|| SyncError::Extraction("appointment end is out of range".to_string()))?;

    Ok((start, end))
}

fn add_minutes(start: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    Duration::try_minutes(minutes).and_then(|d| start.checked_add_signed(d))
}

fn invalid_start() -> SyncError {
    SyncError::Extraction("missing or invalid start date".to_string())
}

/// Leading-integer parse: optional sign, digits, anything after is ignored.
/// Zero and negative durations are treated as absent.
fn parse_duration_minutes(input: Option<&str>) -> Option<i64> {
    let input = input?.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let minutes: i64 = rest[..digits_len].parse().ok()?;

    if negative || minutes == 0 {
        None
    } else {
        Some(minutes)
    }
}

/// Provider display name. A missing element yields the default name; a
/// failed lookup is returned so the title can fall back as well.
fn provider_name<L: FieldLocator>(form: &L, rules: &LocatorRules) -> SyncResult<String> {
    match form.find_one(&rules.provider) {
        Ok(Some(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        Ok(_) => {
            debug!(selector = %rules.provider, "provider not found, using default");
            Ok(UNKNOWN_PROVIDER.to_string())
        }
        Err(e) => {
            warn!(error = %e, "provider lookup failed");
            Err(e)
        }
    }
}

fn client_info<L: FieldLocator>(form: &L, rules: &LocatorRules) -> ClientInfo {
    ClientInfo {
        name: soft_lookup(form, &rules.client_name, "client name").unwrap_or_default(),
        phone: soft_lookup(form, &rules.client_phone, "client phone").unwrap_or_default(),
        email: soft_lookup(form, &rules.client_email, "client email").unwrap_or_default(),
        address: Address {
            street: soft_lookup(form, &rules.address_street, "address street").unwrap_or_default(),
            details: soft_lookup(form, &rules.address_details, "address details")
                .unwrap_or_default(),
        },
    }
}

fn patients<L: FieldLocator>(form: &L, rules: &LocatorRules) -> Vec<PatientInfo> {
    let cards = match form.find_all(&rules.patient_card) {
        Ok(cards) => cards,
        Err(e) => {
            warn!(error = %e, "patient lookup failed, continuing without patients");
            return Vec::new();
        }
    };

    cards
        .iter()
        .map(|card| PatientInfo {
            name: soft_lookup(card, &rules.patient_name, "patient name")
                .unwrap_or_else(|| DEFAULT_PATIENT_NAME.to_string()),
            details: normalize_text(
                &soft_lookup(card, &rules.patient_details, "patient details").unwrap_or_default(),
            ),
        })
        .collect()
}

fn notes<L: FieldLocator>(form: &L, rules: &LocatorRules) -> Vec<NoteInfo> {
    let items = match form.find_all(&rules.note_item) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "note lookup failed, continuing without notes");
            return Vec::new();
        }
    };

    items
        .iter()
        .filter_map(|item| {
            let content = normalize_text(
                &soft_lookup(item, &rules.note_content, "note content").unwrap_or_default(),
            );
            if content.is_empty() {
                debug!("dropping note with empty content");
                return None;
            }
            Some(NoteInfo {
                content,
                author_info: soft_lookup(item, &rules.note_author, "note author")
                    .unwrap_or_default(),
            })
        })
        .collect()
}

fn reason_for_visit<L: FieldLocator>(form: &L, rules: &LocatorRules) -> String {
    // Untrimmed: the marker strip has to see the original line breaks
    let raw = match form.find_one(&rules.reason) {
        Ok(text) => text.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "reason for visit lookup failed");
            String::new()
        }
    };
    normalize_text(&strip_location_marker(&raw))
}

fn appointment_id<L: FieldLocator>(form: &L, rules: &LocatorRules) -> Option<String> {
    form.find_one(&rules.appointment_id)
        .ok()
        .flatten()
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Trimmed text of an optional field; misses and lookup errors are logged
/// and reported as `None`.
fn soft_lookup<L: FieldLocator>(scope: &L, selector: &str, field: &str) -> Option<String> {
    match scope.find_one(selector) {
        Ok(Some(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Ok(_) => {
            debug!(field, selector, "optional field not found");
            None
        }
        Err(e) => {
            warn!(field, error = %e, "optional field lookup failed");
            None
        }
    }
}

/// `"{initials} - {client}"`, or the fallback title when the provider name
/// yields no initials.
pub fn generate_title(provider_name: &str, client_name: &str) -> String {
    match provider_initials(provider_name) {
        Some(initials) => format!("{} - {}", initials, client_name),
        None => {
            debug!(provider_name, "no provider initials, using fallback title");
            FALLBACK_TITLE.to_string()
        }
    }
}

/// Initials of a provider name, ignoring a leading "Dr." title.
///
/// "Dr. Mary-Kate O'Neil" gives "MKO".
pub fn provider_initials(provider_name: &str) -> Option<String> {
    let name = match provider_name.strip_prefix("Dr.") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => provider_name,
    };

    let initials: String = name
        .trim()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter_map(|part| part.chars().find(char::is_ascii_alphabetic))
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if initials.is_empty() { None } else { Some(initials) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::{FixtureFragment, HtmlDocument};
    use chrono::TimeZone;

    /// Fixture that fails every lookup of one selector.
    struct FailingOn {
        inner: FixtureFragment,
        selector: String,
    }

    impl FieldLocator for FailingOn {
        fn find_one(&self, selector: &str) -> SyncResult<Option<String>> {
            if selector == self.selector {
                return Err(SyncError::Locator(format!("cannot evaluate '{}'", selector)));
            }
            self.inner.find_one(selector)
        }

        fn find_all(&self, selector: &str) -> SyncResult<Vec<Self>> {
            if selector == self.selector {
                return Err(SyncError::Locator(format!("cannot evaluate '{}'", selector)));
            }
            Ok(self
                .inner
                .find_all(selector)?
                .into_iter()
                .map(|inner| FailingOn {
                    inner,
                    selector: self.selector.clone(),
                })
                .collect())
        }
    }

    fn rules() -> LocatorRules {
        LocatorRules::default()
    }

    fn minimal_form() -> FixtureFragment {
        let r = rules();
        FixtureFragment::default()
            .with_field(&r.date, "2024-06-01T14:00:00.000Z")
            .with_field(&r.provider, "Dr. John Smith")
            .with_field(&r.client_name, "Jane Doe")
            .with_field(&r.reason, "Annual checkup")
    }

    fn failing(selector: &str) -> FailingOn {
        FailingOn {
            inner: minimal_form(),
            selector: selector.to_string(),
        }
    }

    #[test]
    fn minimal_form_matches_reference_event() {
        let record = extract(&minimal_form(), &rules()).unwrap();

        assert_eq!(record.title, "JS - Jane Doe");
        assert_eq!(record.start, Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap());
        assert_eq!(record.end, Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap());
        assert_eq!(record.location, "");
        assert_eq!(record.appointment_id, None);
        assert_eq!(
            record.description,
            "Provider: Dr. John Smith\n\nOwner Information:\n--------------------\nName: Jane Doe\nPhone: \nEmail: \n\nReason for Visit:\n---------------\nAnnual checkup"
        );
    }

    #[test]
    fn missing_date_is_fatal() {
        let form = FixtureFragment::default().with_field(&rules().client_name, "Jane Doe");
        let err = extract(&form, &rules()).unwrap_err();
        assert!(
            matches!(err, SyncError::Extraction(ref msg) if msg == "missing or invalid start date")
        );
    }

    #[test]
    fn unparseable_date_is_fatal() {
        let form = minimal_form().with_field(&rules().date, "someday");
        assert!(matches!(
            extract(&form, &rules()),
            Err(SyncError::Extraction(_))
        ));
    }

    #[test]
    fn failed_date_lookup_is_fatal() {
        assert!(matches!(
            extract(&failing(&rules().date), &rules()),
            Err(SyncError::Extraction(_))
        ));
    }

    #[test]
    fn end_is_start_plus_duration() {
        for minutes in [1_i64, 15, 45, 90, 600] {
            let form = minimal_form().with_field(&rules().duration, &minutes.to_string());
            let record = extract(&form, &rules()).unwrap();
            assert_eq!(record.end - record.start, Duration::minutes(minutes));
            assert!(record.end >= record.start);
        }
    }

    #[test]
    fn duration_defaults_to_thirty_minutes() {
        for input in [None, Some(""), Some("abc"), Some("0"), Some("-20")] {
            let mut form = minimal_form();
            if let Some(input) = input {
                form = form.with_field(&rules().duration, input);
            }
            let record = extract(&form, &rules()).unwrap();
            assert_eq!(
                record.end - record.start,
                Duration::minutes(DEFAULT_DURATION_MINUTES),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn oversized_duration_falls_back_to_default() {
        // Past TimeDelta's range, then past chrono's representable years
        for input in ["999999999999999", "1000000000000"] {
            let form = minimal_form().with_field(&rules().duration, input);
            let record = extract(&form, &rules()).unwrap();
            assert_eq!(
                record.end - record.start,
                Duration::minutes(DEFAULT_DURATION_MINUTES),
                "input {}",
                input
            );
        }
    }

    #[test]
    fn add_minutes_stops_at_end_of_time() {
        assert_eq!(add_minutes(DateTime::<Utc>::MAX_UTC, DEFAULT_DURATION_MINUTES), None);
        assert_eq!(add_minutes(DateTime::<Utc>::MAX_UTC, 0), Some(DateTime::<Utc>::MAX_UTC));
    }

    #[test]
    fn duration_ignores_trailing_text() {
        assert_eq!(parse_duration_minutes(Some("45 min")), Some(45));
        assert_eq!(parse_duration_minutes(Some(" 60")), Some(60));
        assert_eq!(parse_duration_minutes(Some("+15")), Some(15));
        assert_eq!(parse_duration_minutes(Some("min 45")), None);
    }

    #[test]
    fn failed_duration_lookup_uses_default() {
        let record = extract(&failing(&rules().duration), &rules()).unwrap();
        assert_eq!(record.end - record.start, Duration::minutes(30));
    }

    #[test]
    fn missing_provider_uses_default_name() {
        let mut form = minimal_form();
        form.fields.remove(&rules().provider);

        let record = extract(&form, &rules()).unwrap();
        assert!(record.description.starts_with("Provider: Unknown Provider\n"));
        assert_eq!(record.title, "UP - Jane Doe");
    }

    #[test]
    fn failed_provider_lookup_falls_back_to_vet_appointment() {
        let record = extract(&failing(&rules().provider), &rules()).unwrap();
        assert_eq!(record.title, "Vet Appointment");
        assert!(record.description.starts_with("Provider: Unknown Provider\n"));
    }

    #[test]
    fn provider_without_letters_falls_back_to_vet_appointment() {
        let form = minimal_form().with_field(&rules().provider, "123 - 456");
        assert_eq!(extract(&form, &rules()).unwrap().title, "Vet Appointment");
    }

    #[test]
    fn initials_strip_title_and_split_on_hyphens() {
        assert_eq!(provider_initials("Dr. John Smith").as_deref(), Some("JS"));
        assert_eq!(provider_initials("Dr. Mary-Kate O'Neil").as_deref(), Some("MKO"));
        assert_eq!(provider_initials("anna  de  la cruz").as_deref(), Some("ADLC"));
        // Prefix is case-sensitive and needs trailing whitespace
        assert_eq!(provider_initials("dr. Lee").as_deref(), Some("DL"));
        assert_eq!(provider_initials("Dr.Lee").as_deref(), Some("D"));
        assert_eq!(provider_initials("Dr. 3rd Ray").as_deref(), Some("RR"));
        assert_eq!(provider_initials(""), None);
    }

    #[test]
    fn address_only_when_complete() {
        let r = rules();
        let form = minimal_form()
            .with_field(&r.address_street, " 12 Farm Rd ")
            .with_field(&r.address_details, "Springfield, IL 62701");
        assert_eq!(
            extract(&form, &r).unwrap().location,
            "12 Farm Rd, Springfield, IL 62701"
        );

        let form = minimal_form().with_field(&r.address_street, "12 Farm Rd");
        assert_eq!(extract(&form, &r).unwrap().location, "");
    }

    #[test]
    fn client_contacts_are_listed() {
        let r = rules();
        let form = minimal_form()
            .with_field(&r.client_phone, "(555) 010-2233")
            .with_field(&r.client_email, "jane@example.com");

        let description = extract(&form, &r).unwrap().description;
        assert!(description.contains("Phone: (555) 010-2233\nEmail: jane@example.com\n"));
    }

    #[test]
    fn patients_keep_document_order_and_defaults() {
        let r = rules();
        let form = minimal_form().with_children(
            &r.patient_card,
            vec![
                FixtureFragment::default()
                    .with_field(&r.patient_name, "Rex")
                    .with_field(&r.patient_details, "Canine   \n  Labrador"),
                FixtureFragment::default(),
            ],
        );

        let description = extract(&form, &r).unwrap().description;
        assert!(description.ends_with(
            "Patient Information:\n------------------\nPatient: Rex\nDetails: Canine\nLabrador\n\nPatient: Pet\nDetails: "
        ));
    }

    #[test]
    fn blank_patient_name_uses_default() {
        let r = rules();
        let form = minimal_form().with_children(
            &r.patient_card,
            vec![FixtureFragment::default().with_field(&r.patient_name, "   ")],
        );

        let description = extract(&form, &r).unwrap().description;
        assert!(description.contains("\nPatient: Pet\n"));
    }

    #[test]
    fn failed_patient_lookup_yields_no_patients() {
        let record = extract(&failing(&rules().patient_card), &rules()).unwrap();
        assert!(!record.description.contains("Patient"));
    }

    #[test]
    fn empty_notes_are_dropped_even_with_author() {
        let r = rules();
        let form = minimal_form().with_children(
            &r.note_item,
            vec![
                FixtureFragment::default()
                    .with_field(&r.note_content, "  \n ")
                    .with_field(&r.note_author, "Ghost author"),
                FixtureFragment::default()
                    .with_field(&r.note_content, "Needs   a muzzle")
                    .with_field(&r.note_author, " Amy R. "),
            ],
        );

        let description = extract(&form, &r).unwrap().description;
        assert!(!description.contains("Ghost author"));
        assert!(description.contains("Notes:\n---------------\nNote: Needs a muzzle\nAmy R.\n"));
    }

    #[test]
    fn failed_note_lookup_yields_no_notes() {
        let record = extract(&failing(&rules().note_item), &rules()).unwrap();
        assert!(!record.description.contains("Notes:"));
    }

    #[test]
    fn reason_drops_location_marker() {
        let form = minimal_form().with_field(
            &rules().reason,
            "  Vaccines  due\n@Location: Barn 2\n  Bring   records ",
        );
        let description = extract(&form, &rules()).unwrap().description;
        assert!(description.ends_with("---------------\nVaccines due\nBring records"));
    }

    #[test]
    fn appointment_id_is_optional() {
        let form = minimal_form().with_field(&rules().appointment_id, " 4821 ");
        assert_eq!(
            extract(&form, &rules()).unwrap().appointment_id.as_deref(),
            Some("4821")
        );
    }

    #[test]
    fn extracts_from_html_snapshot() {
        let html = r#"
        <div class="ReactModal__Content ReactModal__Content--after-open">
          <div class="is-schedule">
            <input data-test-id="appointment-form-date-input" value="2024-06-01T14:00:00.000Z">
            <input data-test-id="appointment-form-duration-input" value="45">
            <div data-test-id="appointment-form-provider-control">
              <div class="react-select__single-value">Dr. John Smith</div>
            </div>
            <a data-test-id="appointment-form-clientName">  Jane Doe </a>
            <a href="tel:5550102233">(555) 010-2233</a>
            <a href="mailto:jane@example.com">jane@example.com</a>
            <span data-test-id="client-page-adress-1">12 Farm Rd</span>
            <span data-test-id="client-page-adress-details">Springfield</span>
            <div data-test-id="appointment-form-patient-card-0">
              <a data-test-id="appointment-form-patientLink">Rex</a>
              <div class="card__body--sml"><div class="col-sml-12">Canine
                   Labrador</div></div>
            </div>
            <div data-test-groupid="undefined-note-item">
              <div data-test-id="note-content"><p>Bites   when nervous</p></div>
              <div class="notes__user-info">Amy R.</div>
            </div>
            <textarea data-test-id="appointment-form-reasonForVisit-txtbox">Limping
@Location: Room 2</textarea>
          </div>
        </div>"#;

        let doc = HtmlDocument::parse(html);
        let form = doc.fragment(&rules().form).unwrap();
        let record = extract(&form, &rules()).unwrap();

        assert_eq!(record.title, "JS - Jane Doe");
        assert_eq!(record.end - record.start, Duration::minutes(45));
        assert_eq!(record.location, "12 Farm Rd, Springfield");
        assert!(record.description.contains("Phone: (555) 010-2233\n"));
        assert!(record.description.contains("---------------\nLimping\n\nNotes:"));
        assert!(record.description.contains("Note: Bites when nervous\nAmy R.\n"));
        assert!(record.description.ends_with("Patient: Rex\nDetails: Canine\nLabrador"));
    }
}
