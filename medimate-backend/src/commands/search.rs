//! Search command - medication lookup by (partial) name

use crate::context::AppContext;
use crate::error::{MedimateError, Result};
use crate::format;
use crate::lookup;

pub const SEARCH_PROMPT: &str = "Please provide a medication name after the /search command.";
pub const FREE_TEXT_PROMPT: &str = "Please send a medication name to look up.";

/// Look up `name` and render the first match. `prompt` is the reply for a blank name.
pub fn execute(ctx: &AppContext, name: &str, prompt: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MedimateError::Validation(prompt.to_string()));
    }

    let matches = lookup::resolve_medication(&ctx.db, name)?;
    if matches.is_empty() {
        return Err(MedimateError::NotFound(format::medication_not_found(name)));
    }
    if matches.len() > 1 {
        log::debug!(
            "[COMMANDS] '{}' matched {} medications, showing the first",
            name,
            matches.len()
        );
    }
    Ok(format::format_medication(name, &matches))
}
