//! Maps raw feed records onto the medication row shape.
//!
//! Every field ends up populated: absent keys, nulls, blank strings and empty
//! arrays all become the field's placeholder.

use crate::config::FieldMap;
use crate::error::{MedimateError, Result};
use medimate_types::{NewMedication, RawFeedRecord};
use serde_json::Value;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_SIDE_EFFECTS: &str = "No side effects reported";
pub const NO_DOSAGE: &str = "No dosage information available";
pub const NO_INDICATIONS: &str = "No indications available";
pub const NO_CONTRAINDICATIONS: &str = "No contraindications listed";
pub const NO_PHARMACOKINETICS: &str = "No pharmacokinetics information available";
pub const NO_INTERACTIONS: &str = "No interactions listed";

/// Normalize one feed record.
///
/// Fails only when a mapped key holds something other than a string or an
/// array of strings.
pub fn normalize(raw: &RawFeedRecord, fields: &FieldMap) -> Result<NewMedication> {
    Ok(NewMedication {
        name: field(raw, &fields.name, UNKNOWN_NAME)?,
        description: field(raw, &fields.description, NO_DESCRIPTION)?,
        side_effects: field(raw, &fields.side_effects, NO_SIDE_EFFECTS)?,
        dosage: field(raw, &fields.dosage, NO_DOSAGE)?,
        indications: field(raw, &fields.indications, NO_INDICATIONS)?,
        contraindications: field(raw, &fields.contraindications, NO_CONTRAINDICATIONS)?,
        pharmacokinetics: field(raw, &fields.pharmacokinetics, NO_PHARMACOKINETICS)?,
        interactions: field(raw, &fields.interactions, NO_INTERACTIONS)?,
    })
}

fn field(raw: &RawFeedRecord, key: &str, placeholder: &str) -> Result<String> {
    let text = match raw.get_path(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(Value::Array(items)) => {
            let mut parts = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) if !s.trim().is_empty() => parts.push(s.trim()),
                    Value::String(_) | Value::Null => {}
                    other => {
                        return Err(MedimateError::Ingestion(format!(
                            "field '{}' has a non-text array element: {}",
                            key,
                            kind(other)
                        )));
                    }
                }
            }
            Some(parts.join(", "))
        }
        Some(other) => {
            return Err(MedimateError::Ingestion(format!(
                "field '{}' is a {}, expected text",
                key,
                kind(other)
            )));
        }
    };

    Ok(match text {
        Some(t) if !t.is_empty() => t,
        _ => placeholder.to_string(),
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
