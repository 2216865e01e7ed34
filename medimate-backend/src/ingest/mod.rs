//! Feed ingestion: normalize raw records and persist them.
//!
//! One bad record is skipped and logged; the rest of the batch still lands.
//! An unreachable feed aborts the pass with an `Ingestion` error.

pub mod feed;
pub mod normalizer;

use crate::context::AppContext;
use crate::error::{MedimateError, Result};
use medimate_types::{IngestReport, RawFeedRecord};
use serde_json::Value;
use std::sync::Arc;

pub use normalizer::normalize;

/// Normalize and insert every record. Malformed records are skipped.
pub fn ingest_all(ctx: &AppContext, records: &[RawFeedRecord]) -> Result<IngestReport> {
    let mut normalized = Vec::with_capacity(records.len());
    let mut skipped = 0;

    for (index, raw) in records.iter().enumerate() {
        match normalize(raw, &ctx.config.field_map) {
            Ok(med) => normalized.push(med),
            Err(e) => {
                log::warn!("[INGEST] Skipping record #{}: {}", index, e);
                skipped += 1;
            }
        }
    }

    let inserted = ctx
        .db
        .insert_medications(&normalized, ctx.config.ingest_policy)?;

    Ok(IngestReport {
        received: records.len(),
        inserted,
        skipped,
    })
}

/// Same as [`ingest_all`] for untyped feed items; non-object items are skipped.
pub fn ingest_values(ctx: &AppContext, items: Vec<Value>) -> Result<IngestReport> {
    let total = items.len();
    let records: Vec<RawFeedRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            Value::Object(map) => Some(RawFeedRecord::from(map)),
            _ => {
                log::warn!("[INGEST] Skipping record #{}: not a JSON object", index);
                None
            }
        })
        .collect();
    let not_objects = total - records.len();

    let report = ingest_all(ctx, &records)?;
    Ok(IngestReport {
        received: total,
        inserted: report.inserted,
        skipped: report.skipped + not_objects,
    })
}

/// Fetch the configured feed and ingest it.
pub async fn run_feed_pass(ctx: Arc<AppContext>) -> Result<IngestReport> {
    let items = feed::fetch_records(&ctx.config.feed).await?;
    log::info!("[INGEST] Feed returned {} records", items.len());

    let report = tokio::task::spawn_blocking(move || ingest_values(&ctx, items))
        .await
        .map_err(|e| MedimateError::Ingestion(format!("Ingestion task failed: {}", e)))??;

    log::info!(
        "[INGEST] Pass complete: {} received, {} inserted, {} skipped",
        report.received,
        report.inserted,
        report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, FeedSource, IngestPolicy};
    use crate::ingest::normalizer::NO_DESCRIPTION;
    use serde_json::json;

    fn raw(value: Value) -> RawFeedRecord {
        match value {
            Value::Object(map) => RawFeedRecord(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_bad_record_does_not_abort_batch() {
        let ctx = AppContext::in_memory(Config::default());
        let records = vec![
            raw(json!({ "openfda": { "brand_name": ["Advil"] } })),
            raw(json!({ "openfda": { "brand_name": ["Broken"] }, "description": 7 })),
            raw(json!({ "openfda": { "brand_name": ["Motrin"] }, "description": ["Ibuprofen"] })),
        ];

        let report = ingest_all(&ctx, &records).unwrap();
        assert_eq!(
            report,
            IngestReport {
                received: 3,
                inserted: 2,
                skipped: 1
            }
        );

        let advil = ctx.db.query_medications_by_name("Advil").unwrap();
        assert_eq!(advil[0].description, NO_DESCRIPTION);
        assert!(ctx.db.query_medications_by_name("Broken").unwrap().is_empty());
    }

    #[test]
    fn test_ingest_values_skips_non_objects() {
        let ctx = AppContext::in_memory(Config::default());
        let items = vec![json!("just a string"), json!({ "openfda": { "brand_name": ["Advil"] } })];
        let report = ingest_values(&ctx, items).unwrap();
        assert_eq!(report.received, 2);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_repeated_ingestion_policy() {
        let records = vec![raw(json!({ "openfda": { "brand_name": ["Advil"] } }))];

        let append = AppContext::in_memory(Config::default());
        ingest_all(&append, &records).unwrap();
        ingest_all(&append, &records).unwrap();
        assert_eq!(append.db.medication_count().unwrap(), 2);

        let upsert = AppContext::in_memory(Config {
            ingest_policy: IngestPolicy::UpsertByName,
            ..Config::default()
        });
        ingest_all(&upsert, &records).unwrap();
        ingest_all(&upsert, &records).unwrap();
        assert_eq!(upsert.db.medication_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_not_fatal() {
        // Bind then drop to get a port nobody is listening on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let ctx = Arc::new(AppContext::in_memory(Config {
            feed: FeedSource {
                url: Some(format!("http://127.0.0.1:{}/", port)),
                limit: 5,
                timeout_secs: 2,
            },
            ..Config::default()
        }));

        let result = run_feed_pass(ctx.clone()).await;
        assert!(matches!(result, Err(MedimateError::Ingestion(_))));
        assert_eq!(ctx.db.medication_count().unwrap(), 0);
    }
}
