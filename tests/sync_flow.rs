//! End-to-end sync flow over the mock message source.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use sms_expense::checkpoint::{CheckpointStore, MemoryCheckpoint};
use sms_expense::config::SyncConfig;
use sms_expense::extract::TransactionType;
use sms_expense::source::{MockSource, RawMessage};
use sms_expense::sync::SyncCoordinator;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn message(id: &str, address: &str, body: &str, timestamp: i64) -> RawMessage {
    RawMessage {
        id: id.into(),
        thread_id: Some("t1".into()),
        address: address.into(),
        body: body.into(),
        timestamp,
        type_code: 1,
        is_read: false,
    }
}

fn inbox(now: i64) -> Vec<RawMessage> {
    vec![
        message(
            "1",
            "HDFCBK",
            "Rs. 2,499.00 debited from A/c XX4521 at AMAZON.",
            now - 3_000,
        ),
        message("2", "ICICIB", "$12.99 spent on card at NETFLIX.", now - 2_500),
        // OTP noise — rejected by the coordinator's exclude pattern.
        message("3", "HDFCBK", "Your OTP is 998877", now - 2_000),
        // Not an allow-listed sender.
        message("4", "FRIEND", "lunch at 1pm?", now - 1_500),
        // Credit — fetched, but suppressed by the default rule policy.
        message("5", "SBIINB", "INR 5,000 credited to A/c XX9001", now - 1_000),
    ]
}

#[tokio::test]
async fn full_sync_flow_converges() {
    init_tracing();
    let now = Utc::now().timestamp_millis();

    let source = Arc::new(MockSource::new(inbox(now)));
    let store = Arc::new(MemoryCheckpoint::new());
    let config = SyncConfig::default();
    let coordinator = SyncCoordinator::new(source.clone(), store.clone(), config.clone());

    let first = coordinator.sync().await.unwrap();
    assert_eq!(first.len(), 2);

    // Fetch order is newest first.
    assert_eq!(first[0].source_message_id, "2");
    assert_eq!(first[0].currency, "USD");
    assert_eq!(first[0].amount, dec!(12.99));
    assert_eq!(first[0].merchant.as_deref(), Some("NETFLIX"));

    assert_eq!(first[1].source_message_id, "1");
    assert_eq!(first[1].currency, "INR");
    assert_eq!(first[1].amount, dec!(2499.00));
    assert_eq!(first[1].transaction_type, TransactionType::Debit);
    assert_eq!(first[1].merchant.as_deref(), Some("AMAZON"));
    assert_eq!(first[1].account_hint.as_deref(), Some("4521"));

    let checkpoint: i64 = store
        .get(&config.checkpoint_key)
        .await
        .unwrap()
        .unwrap()
        .parse()
        .unwrap();
    assert!(checkpoint >= now);

    // An immediate re-run finds nothing new but still advances the marker.
    let second = coordinator.sync().await.unwrap();
    assert!(second.is_empty());

    let advanced: i64 = store
        .get(&config.checkpoint_key)
        .await
        .unwrap()
        .unwrap()
        .parse()
        .unwrap();
    assert!(advanced >= checkpoint);
}

#[tokio::test]
async fn fingerprints_stable_across_fresh_scans() {
    init_tracing();
    let now = Utc::now().timestamp_millis();

    // Two independent coordinators over the same inbox — as if the host
    // app were reinstalled and scanned from scratch.
    let run = || async move {
        let coordinator = SyncCoordinator::new(
            Arc::new(MockSource::new(inbox(now))),
            Arc::new(MemoryCheckpoint::new()),
            SyncConfig::default(),
        );
        coordinator.sync().await.unwrap()
    };

    let first = run().await;
    let second = run().await;

    let fingerprints = |expenses: &[sms_expense::extract::ParsedExpense]| {
        expenses
            .iter()
            .map(|e| e.fingerprint.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(fingerprints(&first), fingerprints(&second));
    assert!(!first.is_empty());
}
