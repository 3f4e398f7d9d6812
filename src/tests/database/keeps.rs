//! Player Keep Database Tests
//!
//! Tests for the keep record and its facilities and hirelings.

use crate::database::{KeepOps, KeepRecord};
use crate::tests::common::{create_test_db, seed_campaign, seed_facility, seed_hireling};

#[tokio::test]
async fn test_keep_created_with_campaign() {
    let (db, _temp) = create_test_db().await;
    let (campaign, keep) = seed_campaign(&db, "Stronghold", "dm-1").await;

    let by_id = db
        .get_keep(&keep.id)
        .await
        .expect("Failed to get keep")
        .expect("Keep not found");
    assert_eq!(by_id.campaign_id, campaign.id);
    assert!(by_id.icon_url.is_none());
}

#[tokio::test]
async fn test_get_or_create_keep_is_idempotent() {
    let (db, _temp) = create_test_db().await;
    let (campaign, keep) = seed_campaign(&db, "Stronghold", "dm-1").await;

    let first = db.get_or_create_keep(&campaign.id).await.unwrap();
    let second = db.get_or_create_keep(&campaign.id).await.unwrap();
    assert_eq!(first.id, keep.id);
    assert_eq!(second.id, keep.id);
}

#[tokio::test]
async fn test_update_keep() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Stronghold", "dm-1").await;

    let updated = KeepRecord {
        icon_url: Some("https://example.com/tower.png".to_string()),
        description: Some("A crumbling wizard's tower".to_string()),
        ..keep.clone()
    };
    db.update_keep(&updated).await.expect("Failed to update keep");

    let stored = db.get_keep(&keep.id).await.unwrap().unwrap();
    assert_eq!(stored.icon_url.as_deref(), Some("https://example.com/tower.png"));
    assert_eq!(stored.description.as_deref(), Some("A crumbling wizard's tower"));
}

#[tokio::test]
async fn test_facility_crud() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Stronghold", "dm-1").await;

    let mut smithy = seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;
    seed_facility(&db, &keep.id, "Library", (2.0, "gp"), (0.0, "gp")).await;

    let facilities = db.list_facilities(&keep.id).await.unwrap();
    assert_eq!(facilities.len(), 2);

    smithy.profit_amount = 25.0;
    smithy.profit_currency = "sp".to_string();
    db.update_facility(&smithy).await.expect("Failed to update facility");

    let stored = db.get_facility(&keep.id, &smithy.id).await.unwrap().unwrap();
    assert_eq!(stored.profit_amount, 25.0);
    assert_eq!(stored.profit_currency, "sp");

    db.delete_facility(&keep.id, &smithy.id)
        .await
        .expect("Failed to delete facility");
    assert!(db.get_facility(&keep.id, &smithy.id).await.unwrap().is_none());
    assert_eq!(db.list_facilities(&keep.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_hireling_crud() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Stronghold", "dm-1").await;

    let mut guard = seed_hireling(&db, &keep.id, "Guard", (2.0, "gp"), (0.0, "gp")).await;

    guard.salary_amount = 3.5;
    db.update_hireling(&guard).await.expect("Failed to update hireling");

    let stored = db.get_hireling(&keep.id, &guard.id).await.unwrap().unwrap();
    assert_eq!(stored.salary_amount, 3.5);

    db.delete_hireling(&keep.id, &guard.id)
        .await
        .expect("Failed to delete hireling");
    assert!(db.list_hirelings(&keep.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_facility_lookup_is_scoped_to_keep() {
    let (db, _temp) = create_test_db().await;
    let (_, keep) = seed_campaign(&db, "Mine", "dm-1").await;
    let (_, other_keep) = seed_campaign(&db, "Theirs", "dm-2").await;

    let smithy = seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;

    assert!(db.get_facility(&other_keep.id, &smithy.id).await.unwrap().is_none());

    // Deleting through the wrong keep is a no-op
    db.delete_facility(&other_keep.id, &smithy.id).await.unwrap();
    assert!(db.get_facility(&keep.id, &smithy.id).await.unwrap().is_some());
}
