//! Shared types for the MediMate backend and its RPC clients.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =====================================================
// Domain Types
// =====================================================

/// A stored medication row. Every text field is populated; missing source
/// data is replaced with a placeholder during ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub side_effects: String,
    pub dosage: String,
    pub indications: String,
    pub contraindications: String,
    pub pharmacokinetics: String,
    pub interactions: String,
}

/// A medication that has not been stored yet (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub description: String,
    pub side_effects: String,
    pub dosage: String,
    pub indications: String,
    pub contraindications: String,
    pub pharmacokinetics: String,
    pub interactions: String,
}

/// A free-text medical note keyed by topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalNote {
    pub id: i64,
    pub topic: String,
    pub content: String,
}

/// One record from an external medication feed.
///
/// The feed enforces no schema: keys may be missing and values may be
/// strings, arrays of strings, or nested objects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawFeedRecord(pub Map<String, Value>);

impl RawFeedRecord {
    /// Look up a value by dotted path, e.g. `openfda.brand_name`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.0.get(parts.next()?)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }
}

impl From<Map<String, Value>> for RawFeedRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

// =====================================================
// RPC Request / Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// A chat message forwarded by a transport peer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandReply {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddNoteRequest {
    pub topic: String,
    pub content: String,
}

/// Outcome of one ingestion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub received: usize,
    pub inserted: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub medication_count: i64,
    pub note_count: i64,
    pub implicit_search_enabled: bool,
    pub feed_configured: bool,
    pub bot_token_configured: bool,
    pub last_ingest_at: Option<String>,
    pub last_ingest: Option<IngestReport>,
}
