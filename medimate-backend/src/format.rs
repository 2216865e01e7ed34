//! Reply text for resolved lookups. Pure functions; nothing here touches the store.

use medimate_types::MedicationRecord;

/// Render the first match, or the not-found line for `query`.
/// Additional matches are not shown.
pub fn format_medication(query: &str, records: &[MedicationRecord]) -> String {
    match records.first() {
        Some(m) => format!(
            "Medication: {}\n\
             Description: {}\n\
             Side Effects: {}\n\
             Dosage: {}\n\
             Indications: {}\n\
             Contraindications: {}\n\
             Pharmacokinetics: {}\n\
             Interactions: {}",
            m.name,
            m.description,
            m.side_effects,
            m.dosage,
            m.indications,
            m.contraindications,
            m.pharmacokinetics,
            m.interactions
        ),
        None => medication_not_found(query),
    }
}

pub fn medication_not_found(query: &str) -> String {
    format!("No information found for {}.", query)
}

/// Render every note under a header, one per line.
pub fn format_notes(topic: &str, contents: &[String]) -> String {
    if contents.is_empty() {
        return notes_not_found(topic);
    }
    format!("Medical Notes on {}:\n{}", topic, contents.join("\n"))
}

pub fn notes_not_found(topic: &str) -> String {
    format!("No notes found for {}.", topic)
}
