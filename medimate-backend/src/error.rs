//! Error type shared by the store, ingestion, and command layers.

use std::fmt;

/// Reply sent when the store fails; never exposes the underlying error.
pub const STORAGE_APOLOGY: &str =
    "Sorry, something went wrong while looking that up. Please try again later.";

#[derive(Debug)]
pub enum MedimateError {
    /// A required argument was empty or missing. Carries the prompt to show the user.
    Validation(String),
    /// No record matched. Carries the reply text.
    NotFound(String),
    /// The external feed was unreachable or a feed record was malformed
    Ingestion(String),
    /// The persistent store failed
    Storage(String),
}

impl MedimateError {
    /// Convert into the text shown to a chat user.
    ///
    /// Validation and not-found errors carry their own reply text. Storage and
    /// ingestion details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            MedimateError::Validation(prompt) => prompt.clone(),
            MedimateError::NotFound(reply) => reply.clone(),
            MedimateError::Ingestion(_) | MedimateError::Storage(_) => {
                STORAGE_APOLOGY.to_string()
            }
        }
    }
}

impl fmt::Display for MedimateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MedimateError::Validation(msg) => write!(f, "Validation error: {}", msg),
            MedimateError::NotFound(msg) => write!(f, "Not found: {}", msg),
            MedimateError::Ingestion(msg) => write!(f, "Ingestion error: {}", msg),
            MedimateError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for MedimateError {}

impl From<rusqlite::Error> for MedimateError {
    fn from(e: rusqlite::Error) -> Self {
        MedimateError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for MedimateError {
    fn from(e: r2d2::Error) -> Self {
        MedimateError::Storage(format!("Connection pool: {}", e))
    }
}

impl From<reqwest::Error> for MedimateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            MedimateError::Ingestion(format!("Feed request timed out: {}", e))
        } else {
            MedimateError::Ingestion(format!("Feed request failed: {}", e))
        }
    }
}

pub type Result<T> = std::result::Result<T, MedimateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_hides_details() {
        let err = MedimateError::Storage("disk I/O error at /var/lib/medibot.db".to_string());
        assert_eq!(err.user_message(), STORAGE_APOLOGY);
        assert!(!err.user_message().contains("/var/lib"));
    }

    #[test]
    fn test_validation_error_is_prompt() {
        let err = MedimateError::Validation("Please provide a topic.".to_string());
        assert_eq!(err.user_message(), "Please provide a topic.");
    }

    #[test]
    fn test_from_rusqlite() {
        let err: MedimateError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, MedimateError::Storage(_)));
    }
}
