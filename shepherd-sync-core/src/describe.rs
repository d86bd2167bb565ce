//! Event description text.

use crate::appointment::{AppointmentDetails, NoteInfo, PatientInfo};

/// Above this many patients the description only carries a count.
pub const MAX_LISTED_PATIENTS: usize = 3;

/// Build the multi-section description shown in the calendar event.
pub fn format_description(details: &AppointmentDetails) -> String {
    format!(
        "Provider: {}\n\
         \n\
         Owner Information:\n\
         --------------------\n\
         Name: {}\n\
         Phone: {}\n\
         Email: {}\n\
         \n\
         Reason for Visit:\n\
         ---------------\n\
         {}{}{}",
        details.provider,
        details.client_name,
        details.client_phone,
        details.client_email,
        details.reason,
        notes_section(&details.notes),
        patient_section(&details.patients),
    )
}

fn notes_section(notes: &[NoteInfo]) -> String {
    if notes.is_empty() {
        return String::new();
    }

    let note_text = notes
        .iter()
        .map(|note| format!("Note: {}\n{}", note.content, note.author_info))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("\n\nNotes:\n---------------\n{}\n", note_text)
}

fn patient_section(patients: &[PatientInfo]) -> String {
    if patients.is_empty() {
        return String::new();
    }

    if patients.len() > MAX_LISTED_PATIENTS {
        return format!("\n\nPatients: {} patients in this appointment", patients.len());
    }

    let patient_text = patients
        .iter()
        .map(|patient| format!("Patient: {}\nDetails: {}", patient.name, patient.details))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("\n\nPatient Information:\n------------------\n{}", patient_text)
}
