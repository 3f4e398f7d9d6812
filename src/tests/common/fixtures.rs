//! Test Fixtures
//!
//! Provides shared test helpers for creating test databases, campaigns with
//! their keeps, currencies, facilities and hirelings.

use tempfile::TempDir;

use crate::database::{
    CampaignOps, CampaignRecord, CampaignRole, CurrencyOps, CurrencyRecord, Database,
    FacilityRecord, HirelingRecord, KeepOps, KeepRecord, MemberRecord,
};

// =============================================================================
// Database Fixtures
// =============================================================================

/// Create a test database in a temporary directory.
/// Returns both the database and the TempDir (which must be kept alive).
pub async fn create_test_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let db = Database::new(temp_dir.path())
        .await
        .expect("Failed to create test database");
    (db, temp_dir)
}

// =============================================================================
// Campaign Fixtures
// =============================================================================

/// Create a campaign owned by `dm_user` and return it with its keep.
pub async fn seed_campaign(db: &Database, name: &str, dm_user: &str) -> (CampaignRecord, KeepRecord) {
    let campaign = CampaignRecord::new(name.to_string(), "D&D 5e".to_string());
    let owner = MemberRecord::new(
        campaign.id.clone(),
        dm_user.to_string(),
        dm_user.to_string(),
        CampaignRole::DungeonMaster,
    );
    db.create_campaign(&campaign, &owner)
        .await
        .expect("Failed to create campaign");

    let keep = db
        .get_keep_for_campaign(&campaign.id)
        .await
        .expect("Failed to get keep")
        .expect("Keep not created with campaign");
    (campaign, keep)
}

/// Define a currency in the campaign.
pub async fn seed_currency(db: &Database, campaign_id: &str, name: &str, abbreviation: &str) -> CurrencyRecord {
    let currency = CurrencyRecord::new(
        campaign_id.to_string(),
        name.to_string(),
        abbreviation.to_string(),
    );
    db.create_currency(&currency)
        .await
        .expect("Failed to create currency");
    currency
}

// =============================================================================
// Keep Fixtures
// =============================================================================

/// Build an unsaved facility.
pub fn facility(keep_id: &str, name: &str, upkeep: (f64, &str), profit: (f64, &str)) -> FacilityRecord {
    FacilityRecord::new(
        keep_id.to_string(),
        name.to_string(),
        (upkeep.0, upkeep.1.to_string()),
        (profit.0, profit.1.to_string()),
    )
}

/// Build an unsaved hireling.
pub fn hireling(keep_id: &str, name: &str, salary: (f64, &str), profit: (f64, &str)) -> HirelingRecord {
    HirelingRecord::new(
        keep_id.to_string(),
        name.to_string(),
        (salary.0, salary.1.to_string()),
        (profit.0, profit.1.to_string()),
    )
}

/// Store a facility and return it.
pub async fn seed_facility(db: &Database, keep_id: &str, name: &str, upkeep: (f64, &str), profit: (f64, &str)) -> FacilityRecord {
    let record = facility(keep_id, name, upkeep, profit);
    db.create_facility(&record)
        .await
        .expect("Failed to create facility");
    record
}

/// Store a hireling and return it.
pub async fn seed_hireling(db: &Database, keep_id: &str, name: &str, salary: (f64, &str), profit: (f64, &str)) -> HirelingRecord {
    let record = hireling(keep_id, name, salary, profit);
    db.create_hireling(&record)
        .await
        .expect("Failed to create hireling");
    record
}
