//! Tests for engine module

use super::*;
use crate::normalize::{FieldValue, MAX_NESTING_DEPTH};
use crate::types::JsonValue;
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fetch operation returning canned records or a canned failure
struct Canned {
    records: Option<Vec<JsonValue>>,
    calls: Arc<AtomicUsize>,
}

impl Canned {
    fn ok(records: Vec<JsonValue>) -> Self {
        Self {
            records: Some(records),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn failing() -> Self {
        Self {
            records: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl FetchOperation for Canned {
    async fn fetch(&self) -> Result<Vec<RawRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.records {
            Some(records) => Ok(records
                .iter()
                .map(|r| r.as_object().cloned().unwrap())
                .collect()),
            None => Err(Error::Other("connection reset by peer".to_string())),
        }
    }
}

fn normalizer() -> Normalizer {
    Normalizer::new("sk_te...")
}

fn fetcher(entries: Vec<(&str, Canned)>) -> ResourceFetcher {
    ResourceFetcher::new(
        entries
            .into_iter()
            .map(|(name, op)| ResourceDescriptor::new(name, op))
            .collect(),
    )
}

// ============================================================================
// Fetcher Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_all_keeps_order_and_errors() {
    let fetcher = fetcher(vec![
        ("customers", Canned::ok(vec![json!({"id": "cus_1"})])),
        ("charges", Canned::failing()),
        ("invoices", Canned::ok(vec![])),
    ]);

    let outcomes = fetcher.fetch_all().await;

    let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["customers", "charges", "invoices"]);
    assert!(outcomes[0].is_ok());
    assert!(!outcomes[1].is_ok());
    assert_eq!(outcomes[2].result.as_ref().unwrap().len(), 0);
}

#[tokio::test]
async fn test_each_resource_fetched_once() {
    let op = Canned::ok(vec![json!({"id": "x"})]);
    let calls = Arc::clone(&op.calls);
    let fetcher = fetcher(vec![("customers", op)]);

    let (batches, _) = fetcher.reader(normalizer()).collect_batches().await.unwrap();

    assert_eq!(batches.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_select_keeps_declared_order() {
    let fetcher = fetcher(vec![
        ("customers", Canned::ok(vec![])),
        ("charges", Canned::ok(vec![])),
        ("invoices", Canned::ok(vec![])),
    ]);

    let selected = fetcher
        .select(&["invoices".to_string(), "customers".to_string()])
        .unwrap();
    assert_eq!(selected.names(), vec!["customers", "invoices"]);
}

#[test]
fn test_select_unknown_resource() {
    let fetcher = fetcher(vec![("customers", Canned::ok(vec![]))]);
    let err = fetcher.select(&["coupons".to_string()]).unwrap_err();
    assert!(matches!(err, Error::UnknownResource { ref name } if name == "coupons"));
}

// ============================================================================
// Reader Tests
// ============================================================================

#[tokio::test]
async fn test_failed_fetch_is_skipped() {
    let fetcher = fetcher(vec![
        ("customers", Canned::ok(vec![json!({"id": "cus_1"})])),
        ("charges", Canned::failing()),
        ("invoices", Canned::ok(vec![json!({"id": "in_1"}), json!({"id": "in_2"})])),
    ]);

    let (batches, stats) = fetcher.reader(normalizer()).collect_batches().await.unwrap();

    let names: Vec<_> = batches.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["customers", "invoices"]);
    assert_eq!(
        stats,
        ReadStats {
            resources_emitted: 2,
            resources_empty: 0,
            resources_failed: 1,
            rows_emitted: 3,
        }
    );
}

#[tokio::test]
async fn test_empty_resource_emits_nothing() {
    let fetcher = fetcher(vec![
        ("payouts", Canned::ok(vec![json!({"id": "po_1", "amount": 10})])),
        ("refunds", Canned::ok(vec![])),
    ]);

    let (batches, stats) = fetcher.reader(normalizer()).collect_batches().await.unwrap();

    assert_eq!(batches.len(), 1);
    assert!(batches.iter().all(|b| b.name != "refunds"));
    assert_eq!(stats.resources_empty, 1);
    assert_eq!(stats.resources_seen(), 2);
}

#[tokio::test]
async fn test_row_counts_match() {
    let records: Vec<_> = (0..100).map(|i| json!({"id": i})).collect();
    let fetcher = fetcher(vec![("events", Canned::ok(records))]);

    let (batches, _) = fetcher.reader(normalizer()).collect_batches().await.unwrap();

    assert_eq!(batches[0].rows.len(), 100);
    assert_eq!(batches[0].expected_row_count, 100);
    assert_eq!(batches[0].rows[99].get("id"), Some(&FieldValue::from(99_i64)));
}

#[tokio::test]
async fn test_reader_ends_and_stays_ended() {
    let fetcher = fetcher(vec![("customers", Canned::ok(vec![json!({"id": 1})]))]);
    let mut reader = fetcher.reader(normalizer());

    assert!(reader.next_batch().await.is_some());
    assert!(reader.next_batch().await.is_none());
    assert!(reader.next_batch().await.is_none());
}

#[tokio::test]
async fn test_all_failures_still_complete() {
    let fetcher = fetcher(vec![
        ("customers", Canned::failing()),
        ("charges", Canned::failing()),
    ]);

    let (batches, stats) = fetcher.reader(normalizer()).collect_batches().await.unwrap();
    assert!(batches.is_empty());
    assert_eq!(stats.resources_failed, 2);
}

#[tokio::test]
async fn test_stream_yields_in_order() {
    let fetcher = fetcher(vec![
        ("customers", Canned::ok(vec![json!({"id": "cus_1"})])),
        ("charges", Canned::failing()),
        ("invoices", Canned::ok(vec![json!({"id": "in_1"})])),
        ("refunds", Canned::ok(vec![])),
    ]);

    let names: Vec<String> = fetcher
        .reader(normalizer())
        .into_stream()
        .map(|b| b.unwrap().name)
        .collect()
        .await;

    assert_eq!(names, vec!["customers", "invoices"]);
}

#[tokio::test]
async fn test_normalization_fault_ends_stream() {
    let mut lines = json!([]);
    for _ in 0..MAX_NESTING_DEPTH {
        lines = JsonValue::Array(vec![lines]);
    }
    let invoices = Canned::ok(vec![json!({"id": "in_1"})]);
    let invoice_calls = Arc::clone(&invoices.calls);
    let fetcher = fetcher(vec![
        ("customers", Canned::ok(vec![json!({"id": "cus_1"})])),
        ("charges", Canned::ok(vec![json!({"id": "ch_1", "lines": lines})])),
        ("invoices", invoices),
    ]);

    let items: Vec<Result<RowBatch>> = fetcher.reader(normalizer()).into_stream().collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap().name, "customers");
    assert!(matches!(items[1], Err(Error::Serialization { .. })));
    assert_eq!(invoice_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_reader_stays_ended_after_fault() {
    let mut lines = json!([]);
    for _ in 0..MAX_NESTING_DEPTH {
        lines = JsonValue::Array(vec![lines]);
    }
    let fetcher = fetcher(vec![
        ("charges", Canned::ok(vec![json!({"id": "ch_1", "lines": lines})])),
        ("invoices", Canned::ok(vec![json!({"id": "in_1"})])),
    ]);
    let mut reader = fetcher.reader(normalizer());

    assert!(matches!(reader.next_batch().await, Some(Err(_))));
    assert!(reader.next_batch().await.is_none());
    assert_eq!(reader.stats().resources_emitted, 0);
}

#[tokio::test]
async fn test_batch_content_is_cache_key() {
    let fetcher = fetcher(vec![("customers", Canned::ok(vec![json!({"id": 1})]))]);
    let (batches, _) = fetcher.reader(normalizer()).collect_batches().await.unwrap();

    assert_eq!(
        batches[0].content,
        r#"{"resource":"customers","apiKey":"sk_te..."}"#
    );
}

#[test]
fn test_read_stats_display() {
    let stats = ReadStats {
        resources_emitted: 3,
        resources_empty: 1,
        resources_failed: 2,
        rows_emitted: 42,
    };
    assert_eq!(stats.to_string(), "3 emitted, 1 empty, 2 failed, 42 rows");
}
