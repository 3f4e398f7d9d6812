//! Check-in Recorder and History Tests
//!
//! Exercises recording against a real database: validation failures must
//! leave no row behind, and history pages come back newest first.

use std::collections::BTreeMap;

use crate::config::HistoryConfig;
use crate::core::keep::{
    list_check_ins, preview_ledger, record_check_in, settle_keep, CheckIn, CheckInError,
    CurrencyTotals, LedgerError, Outcome, PageRequest,
};
use crate::database::{CheckInOps, KeepOps};
use crate::tests::common::{create_test_db, seed_campaign, seed_facility, seed_hireling};

fn totals(upkeep: f64, profit: f64) -> CurrencyTotals {
    CurrencyTotals {
        total_upkeep: upkeep,
        total_profit: profit,
        ..Default::default()
    }
}

// =============================================================================
// Recording
// =============================================================================

#[tokio::test]
async fn test_settle_keep_persists_computed_ledger() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;
    seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;
    seed_hireling(&db, &keep.id, "Guard", (2.0, "gp"), (0.0, "gp")).await;

    let check_in = settle_keep(&db, &keep.id, 3).await.expect("Failed to settle");

    assert_eq!(check_in.weeks_away, 3);
    let gp = &check_in.breakdown["gp"];
    assert_eq!(gp.total_upkeep, 21.0);
    assert_eq!(gp.total_profit, 60.0);
    assert_eq!(check_in.net_profit["gp"], 39.0);

    let stored = db
        .get_check_in(&keep.id, &check_in.id)
        .await
        .unwrap()
        .expect("Check-in not stored");
    let stored = CheckIn::try_from(stored).expect("Stored check-in unreadable");
    assert_eq!(stored, check_in);
}

#[tokio::test]
async fn test_record_rejects_non_positive_weeks() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;

    for weeks in [0, -3] {
        let err = record_check_in(&db, &keep.id, weeks, BTreeMap::new(), BTreeMap::new())
            .await
            .expect_err("weeks must be positive");
        assert!(matches!(
            err,
            CheckInError::Ledger(LedgerError::InvalidWeeks(w)) if w == weeks
        ));
    }

    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_record_rejects_inconsistent_net_profit() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;

    let breakdown = BTreeMap::from([("gp".to_string(), totals(10.0, 50.0))]);
    let net_profit = BTreeMap::from([("gp".to_string(), 1000.0)]);

    let err = record_check_in(&db, &keep.id, 2, breakdown, net_profit)
        .await
        .expect_err("tampered net profit must be rejected");
    assert!(matches!(
        err,
        CheckInError::Ledger(LedgerError::NetProfitMismatch { .. })
    ));
    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_record_rejects_net_profit_without_breakdown() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;

    let net_profit = BTreeMap::from([("pp".to_string(), 5.0)]);
    let err = record_check_in(&db, &keep.id, 1, BTreeMap::new(), net_profit)
        .await
        .expect_err("orphan net profit must be rejected");
    assert!(matches!(
        err,
        CheckInError::Ledger(LedgerError::NetProfitWithoutBreakdown { .. })
    ));
}

#[tokio::test]
async fn test_record_unknown_keep() {
    let (db, _temp) = create_test_db().await;

    let err = record_check_in(&db, "no-such-keep", 1, BTreeMap::new(), BTreeMap::new())
        .await
        .expect_err("unknown keep");
    assert!(matches!(err, CheckInError::KeepNotFound(id) if id == "no-such-keep"));
}

#[tokio::test]
async fn test_empty_keep_records_empty_ledger() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Empty", "dm-1").await;

    let check_in = settle_keep(&db, &keep.id, 4).await.expect("Failed to settle");
    assert!(check_in.breakdown.is_empty());
    assert!(check_in.net_profit.is_empty());
    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_check_in_is_a_snapshot() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;
    let mut smithy = seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;

    let before = settle_keep(&db, &keep.id, 1).await.unwrap();

    smithy.profit_amount = 500.0;
    db.update_facility(&smithy).await.unwrap();

    let stored = db.get_check_in(&keep.id, &before.id).await.unwrap().unwrap();
    let stored = CheckIn::try_from(stored).unwrap();
    assert_eq!(stored.net_profit["gp"], 15.0);

    let preview = preview_ledger(&db, &keep.id, 1).await.unwrap();
    assert_eq!(preview.net_profit["gp"], 495.0);
}

#[tokio::test]
async fn test_preview_does_not_persist() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;
    seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;

    preview_ledger(&db, &keep.id, 2).await.unwrap();
    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 0);
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn test_history_pages_newest_first() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;
    seed_facility(&db, &keep.id, "Smithy", (1.0, "gp"), (3.0, "gp")).await;

    for weeks in 1..=12 {
        settle_keep(&db, &keep.id, weeks).await.unwrap();
    }

    let limits = HistoryConfig::default();

    let first = list_check_ins(&db, &keep.id, PageRequest::new(None, Some(5), &limits))
        .await
        .unwrap();
    assert_eq!(first.total, 12);
    assert_eq!(first.total_pages, 3);
    let weeks: Vec<u32> = first.entries.iter().map(|e| e.weeks_away).collect();
    assert_eq!(weeks, vec![12, 11, 10, 9, 8]);

    let last = list_check_ins(&db, &keep.id, PageRequest::new(Some(3), Some(5), &limits))
        .await
        .unwrap();
    let weeks: Vec<u32> = last.entries.iter().map(|e| e.weeks_away).collect();
    assert_eq!(weeks, vec![2, 1]);

    let beyond = list_check_ins(&db, &keep.id, PageRequest::new(Some(9), Some(5), &limits))
        .await
        .unwrap();
    assert!(beyond.entries.is_empty());
    assert_eq!(beyond.total, 12);
}

#[tokio::test]
async fn test_history_default_page_size_and_outcome() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Keep", "dm-1").await;
    seed_hireling(&db, &keep.id, "Steward", (4.0, "gp"), (1.0, "gp")).await;

    for _ in 0..11 {
        settle_keep(&db, &keep.id, 1).await.unwrap();
    }

    let page = list_check_ins(&db, &keep.id, PageRequest::new(None, None, &HistoryConfig::default()))
        .await
        .unwrap();
    assert_eq!(page.page, 1);
    assert_eq!(page.page_size, 10);
    assert_eq!(page.entries.len(), 10);
    assert_eq!(page.total_pages, 2);

    let entry = &page.entries[0];
    assert_eq!(entry.outcome, Outcome::Loss);
    assert_eq!(entry.total_losses, 3.0);
    assert_eq!(entry.total_gains, 0.0);
}

#[tokio::test]
async fn test_history_is_scoped_to_keep() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Mine", "dm-1").await;
    let (_, other) = seed_campaign(&db, "Theirs", "dm-2").await;

    let check_in = settle_keep(&db, &keep.id, 1).await.unwrap();
    settle_keep(&db, &other.id, 1).await.unwrap();

    assert!(db.get_check_in(&other.id, &check_in.id).await.unwrap().is_none());
    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 1);
}
