//! Name and topic resolution against the store.
//!
//! Blank queries return nothing instead of matching every row. Rejecting
//! blank input with a prompt is the command router's job.

use crate::db::Database;
use crate::error::Result;
use medimate_types::MedicationRecord;

/// All medications whose name contains `query`, in insertion order.
pub fn resolve_medication(db: &Database, query: &str) -> Result<Vec<MedicationRecord>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let rows = db.query_medications_by_name(query)?;
    log::debug!("[LOOKUP] medication '{}' -> {} matches", query, rows.len());
    Ok(rows)
}

/// Content of every note whose topic contains `topic`, in insertion order.
pub fn resolve_notes(db: &Database, topic: &str) -> Result<Vec<String>> {
    if topic.trim().is_empty() {
        return Ok(Vec::new());
    }
    let notes = db.query_notes_by_topic(topic)?;
    log::debug!("[LOOKUP] notes '{}' -> {} matches", topic, notes.len());
    Ok(notes)
}
