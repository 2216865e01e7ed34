//! HTTP client for the external medication feed.
//!
//! Accepts either an openFDA-style envelope (`{"results": [...]}`) or a bare
//! JSON array of records.

use crate::config::FeedSource;
use crate::error::{MedimateError, Result};
use serde_json::Value;
use std::time::Duration;

/// Fetch one page of raw records. Bounded by `source.timeout_secs`.
pub async fn fetch_records(source: &FeedSource) -> Result<Vec<Value>> {
    let url = source
        .url
        .as_deref()
        .ok_or_else(|| MedimateError::Ingestion("No feed URL configured".to_string()))?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(source.timeout_secs))
        .build()?;

    log::info!("[INGEST] Fetching feed from {} (limit {})", url, source.limit);

    let response = client
        .get(url)
        .query(&[("limit", source.limit)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(MedimateError::Ingestion(format!(
            "Feed returned {}: {}",
            status,
            truncate(&body, 200)
        )));
    }

    parse_feed_body(&body)
}

pub fn parse_feed_body(body: &str) -> Result<Vec<Value>> {
    let json: Value = serde_json::from_str(body)
        .map_err(|e| MedimateError::Ingestion(format!("Invalid feed JSON: {}", e)))?;

    match json {
        Value::Array(items) => Ok(items),
        Value::Object(mut envelope) => match envelope.remove("results") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(MedimateError::Ingestion(
                "Feed response has no 'results' array".to_string(),
            )),
        },
        _ => Err(MedimateError::Ingestion(
            "Feed response is neither an array nor an object".to_string(),
        )),
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
