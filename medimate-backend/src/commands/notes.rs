//! Notes command - medical notes by topic

use crate::context::AppContext;
use crate::error::{MedimateError, Result};
use crate::format;
use crate::lookup;

pub const NOTES_PROMPT: &str = "Please provide a topic after the /notes command.";

pub fn execute(ctx: &AppContext, topic: &str) -> Result<String> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(MedimateError::Validation(NOTES_PROMPT.to_string()));
    }

    let notes = lookup::resolve_notes(&ctx.db, topic)?;
    if notes.is_empty() {
        return Err(MedimateError::NotFound(format::notes_not_found(topic)));
    }
    Ok(format::format_notes(topic, &notes))
}
