//! Sample medications and notes loaded into an empty store.

use crate::config::IngestPolicy;
use crate::db::Database;
use crate::error::Result;
use medimate_types::NewMedication;

const SAMPLE_MEDICATIONS: [[&str; 8]; 4] = [
    [
        "Paracetamol",
        "Used for relieving mild pain and reducing fever",
        "Nausea, liver damage",
        "500mg every 4-6 hours",
        "Pain relief, fever reduction",
        "Liver disease, alcohol use",
        "Absorbed rapidly in the gastrointestinal tract",
        "May interact with alcohol, warfarin",
    ],
    [
        "Ibuprofen",
        "NSAID for pain and inflammation",
        "Stomach upset, dizziness",
        "200mg every 4-6 hours",
        "Pain relief, inflammation reduction",
        "Peptic ulcer, kidney disease",
        "Peak plasma concentration is reached in 1-2 hours",
        "May interact with anticoagulants, diuretics",
    ],
    [
        "Amoxicillin",
        "Antibiotic for bacterial infections",
        "Diarrhea, allergic reaction",
        "250mg three times a day",
        "Treatment of bacterial infections",
        "Hypersensitivity to penicillins",
        "Well absorbed in the gastrointestinal tract",
        "May interact with oral contraceptives, anticoagulants",
    ],
    [
        "Aspirin",
        "Anti-inflammatory, analgesic, and antipyretic",
        "Stomach irritation, bleeding",
        "325mg every 4-6 hours",
        "Pain relief, fever reduction, anti-inflammatory effects",
        "Active peptic ulcer, bleeding disorders",
        "Peak plasma concentration within 1-2 hours",
        "May interact with NSAIDs, anticoagulants",
    ],
];

const SAMPLE_NOTES: [(&str, &str); 3] = [
    ("hypertension", "Recheck blood pressure within 4 weeks of any dose change."),
    ("diabetes", "Monitor glucose and HbA1c every 3 months."),
    ("asthma", "Review inhaler technique at every visit."),
];

pub fn sample_medications() -> Vec<NewMedication> {
    SAMPLE_MEDICATIONS
        .iter()
        .map(|[name, description, side_effects, dosage, indications, contraindications, pharmacokinetics, interactions]| {
            NewMedication {
                name: name.to_string(),
                description: description.to_string(),
                side_effects: side_effects.to_string(),
                dosage: dosage.to_string(),
                indications: indications.to_string(),
                contraindications: contraindications.to_string(),
                pharmacokinetics: pharmacokinetics.to_string(),
                interactions: interactions.to_string(),
            }
        })
        .collect()
}

/// Insert the samples into each table that is still empty.
/// Returns (medications inserted, notes inserted).
pub fn seed_if_empty(db: &Database) -> Result<(usize, usize)> {
    let mut meds = 0;
    if db.medication_count()? == 0 {
        meds = db.insert_medications(&sample_medications(), IngestPolicy::Append)?;
    }

    let mut notes = 0;
    if db.note_count()? == 0 {
        for (topic, content) in SAMPLE_NOTES {
            db.insert_note(topic, content)?;
            notes += 1;
        }
    }
    Ok((meds, notes))
}
