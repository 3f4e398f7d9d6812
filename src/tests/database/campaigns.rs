//! Campaign Database Tests
//!
//! Tests for campaign CRUD operations and cascading deletes.

use crate::database::{
    CampaignOps, CampaignRole, CheckInOps, CreatureOps, CreatureRecord, CurrencyOps,
    KeepOps, MemberOps, MemberRecord, ShopItemRecord, ShopOps, ShopRecord,
};
use crate::core::keep::settle_keep;
use crate::tests::common::{create_test_db, seed_campaign, seed_currency, seed_facility, seed_hireling};

// =============================================================================
// Basic CRUD Tests
// =============================================================================

#[tokio::test]
async fn test_create_campaign() {
    let (db, _temp) = create_test_db().await;

    let (campaign, keep) = seed_campaign(&db, "Dragon's Lair", "dm-1").await;

    let retrieved = db
        .get_campaign(&campaign.id)
        .await
        .expect("Failed to get campaign")
        .expect("Campaign not found");

    assert_eq!(retrieved.name, "Dragon's Lair");
    assert_eq!(retrieved.system, "D&D 5e");
    assert_eq!(keep.campaign_id, campaign.id);

    let owner = db
        .get_member(&campaign.id, "dm-1")
        .await
        .expect("Failed to get member")
        .expect("Owner not a member");
    assert_eq!(owner.campaign_role(), CampaignRole::DungeonMaster);
}

#[tokio::test]
async fn test_update_campaign() {
    let (db, _temp) = create_test_db().await;
    let (mut campaign, _) = seed_campaign(&db, "Original Name", "dm-1").await;

    campaign.name = "Updated Name".to_string();
    campaign.description = Some("A thrilling adventure".to_string());
    campaign.updated_at = chrono::Utc::now().to_rfc3339();

    db.update_campaign(&campaign)
        .await
        .expect("Failed to update campaign");

    let retrieved = db
        .get_campaign(&campaign.id)
        .await
        .expect("Failed to get campaign")
        .expect("Campaign not found");

    assert_eq!(retrieved.name, "Updated Name");
    assert_eq!(
        retrieved.description,
        Some("A thrilling adventure".to_string())
    );
}

#[tokio::test]
async fn test_list_campaigns_for_user() {
    let (db, _temp) = create_test_db().await;

    let (first, _) = seed_campaign(&db, "First", "dm-1").await;
    let (second, _) = seed_campaign(&db, "Second", "dm-2").await;

    db.add_member(&MemberRecord::new(
        second.id.clone(),
        "dm-1".to_string(),
        "Guest".to_string(),
        CampaignRole::Player,
    ))
    .await
    .expect("Failed to add member");

    let all = db.list_campaigns().await.expect("Failed to list campaigns");
    assert_eq!(all.len(), 2);

    let mine = db
        .list_campaigns_for_user("dm-1")
        .await
        .expect("Failed to list campaigns");
    let ids: Vec<_> = mine.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.id.as_str()));

    let theirs = db
        .list_campaigns_for_user("dm-2")
        .await
        .expect("Failed to list campaigns");
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].id, second.id);

    let nobody = db
        .list_campaigns_for_user("stranger")
        .await
        .expect("Failed to list campaigns");
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn test_get_nonexistent_campaign() {
    let (db, _temp) = create_test_db().await;

    let result = db
        .get_campaign("does-not-exist")
        .await
        .expect("Query failed");
    assert!(result.is_none());
}

// =============================================================================
// Cascade Tests
// =============================================================================

#[tokio::test]
async fn test_delete_campaign_removes_everything_it_owns() {
    let (db, _temp) = create_test_db().await;
    let (campaign, keep) = seed_campaign(&db, "Doomed", "dm-1").await;
    let (survivor, survivor_keep) = seed_campaign(&db, "Survivor", "dm-2").await;

    seed_currency(&db, &campaign.id, "Gold", "gp").await;
    seed_facility(&db, &keep.id, "Smithy", (5.0, "gp"), (20.0, "gp")).await;
    seed_hireling(&db, &keep.id, "Guard", (2.0, "gp"), (0.0, "gp")).await;
    settle_keep(&db, &keep.id, 2).await.expect("Failed to settle");

    let shop = ShopRecord::new(campaign.id.clone(), "General Store".to_string());
    db.create_shop(&shop).await.expect("Failed to create shop");
    db.add_shop_item(&ShopItemRecord::new(
        shop.id.clone(),
        "Rope".to_string(),
        1.0,
        "gp".to_string(),
    ))
    .await
    .expect("Failed to add item");
    db.create_creature(&CreatureRecord::new(campaign.id.clone(), "Goblin".to_string()))
        .await
        .expect("Failed to create creature");

    seed_currency(&db, &survivor.id, "Gold", "gp").await;
    seed_facility(&db, &survivor_keep.id, "Farm", (1.0, "gp"), (3.0, "gp")).await;

    db.delete_campaign(&campaign.id)
        .await
        .expect("Failed to delete campaign");

    assert!(db.get_campaign(&campaign.id).await.unwrap().is_none());
    assert!(db.list_members(&campaign.id).await.unwrap().is_empty());
    assert!(db.list_currencies(&campaign.id).await.unwrap().is_empty());
    assert!(db.get_keep_for_campaign(&campaign.id).await.unwrap().is_none());
    assert!(db.list_facilities(&keep.id).await.unwrap().is_empty());
    assert!(db.list_hirelings(&keep.id).await.unwrap().is_empty());
    assert_eq!(db.count_check_ins(&keep.id).await.unwrap(), 0);
    assert!(db.list_shops(&campaign.id).await.unwrap().is_empty());
    assert!(db.list_shop_items(&shop.id).await.unwrap().is_empty());
    assert!(db.list_creatures(&campaign.id, false).await.unwrap().is_empty());

    // The other campaign is untouched
    assert!(db.get_campaign(&survivor.id).await.unwrap().is_some());
    assert_eq!(db.list_currencies(&survivor.id).await.unwrap().len(), 1);
    assert_eq!(db.list_facilities(&survivor_keep.id).await.unwrap().len(), 1);
}
