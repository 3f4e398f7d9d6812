//! Player keep database operations
//!
//! Covers the keep itself and its facilities and hirelings. Every lookup of
//! a facility or hireling is constrained to its keep so ids from another
//! campaign never resolve.

use super::models::{FacilityRecord, HirelingRecord, KeepRecord};
use super::Database;

/// Extension trait for player keep operations
pub trait KeepOps {
    // Keep
    fn get_keep_for_campaign(&self, campaign_id: &str) -> impl std::future::Future<Output = Result<Option<KeepRecord>, sqlx::Error>> + Send;
    fn get_or_create_keep(&self, campaign_id: &str) -> impl std::future::Future<Output = Result<KeepRecord, sqlx::Error>> + Send;
    fn get_keep(&self, id: &str) -> impl std::future::Future<Output = Result<Option<KeepRecord>, sqlx::Error>> + Send;
    fn update_keep(&self, keep: &KeepRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;

    // Facilities
    fn create_facility(&self, facility: &FacilityRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_facility(&self, keep_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<FacilityRecord>, sqlx::Error>> + Send;
    fn list_facilities(&self, keep_id: &str) -> impl std::future::Future<Output = Result<Vec<FacilityRecord>, sqlx::Error>> + Send;
    fn update_facility(&self, facility: &FacilityRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_facility(&self, keep_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;

    // Hirelings
    fn create_hireling(&self, hireling: &HirelingRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_hireling(&self, keep_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<HirelingRecord>, sqlx::Error>> + Send;
    fn list_hirelings(&self, keep_id: &str) -> impl std::future::Future<Output = Result<Vec<HirelingRecord>, sqlx::Error>> + Send;
    fn update_hireling(&self, hireling: &HirelingRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_hireling(&self, keep_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl KeepOps for Database {
    // =========================================================================
    // Keep Operations
    // =========================================================================

    async fn get_keep_for_campaign(&self, campaign_id: &str) -> Result<Option<KeepRecord>, sqlx::Error> {
        sqlx::query_as::<_, KeepRecord>(
            "SELECT * FROM player_keeps WHERE campaign_id = ?"
        )
        .bind(campaign_id)
        .fetch_optional(self.pool())
        .await
    }

    async fn get_or_create_keep(&self, campaign_id: &str) -> Result<KeepRecord, sqlx::Error> {
        let keep = KeepRecord::new(campaign_id.to_string());
        sqlx::query(
            r#"
            INSERT OR IGNORE INTO player_keeps (id, campaign_id, icon_url, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&keep.id)
        .bind(&keep.campaign_id)
        .bind(&keep.icon_url)
        .bind(&keep.description)
        .bind(&keep.created_at)
        .bind(&keep.updated_at)
        .execute(self.pool())
        .await?;

        sqlx::query_as::<_, KeepRecord>(
            "SELECT * FROM player_keeps WHERE campaign_id = ?"
        )
        .bind(campaign_id)
        .fetch_one(self.pool())
        .await
    }

    async fn get_keep(&self, id: &str) -> Result<Option<KeepRecord>, sqlx::Error> {
        sqlx::query_as::<_, KeepRecord>(
            "SELECT * FROM player_keeps WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn update_keep(&self, keep: &KeepRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE player_keeps SET icon_url = ?, description = ?, updated_at = ? WHERE id = ?"
        )
        .bind(&keep.icon_url)
        .bind(&keep.description)
        .bind(&keep.updated_at)
        .bind(&keep.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    // =========================================================================
    // Facility Operations
    // =========================================================================

    async fn create_facility(&self, facility: &FacilityRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO keep_facilities
            (id, keep_id, name, upkeep_amount, upkeep_currency, profit_amount, profit_currency, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&facility.id)
        .bind(&facility.keep_id)
        .bind(&facility.name)
        .bind(facility.upkeep_amount)
        .bind(&facility.upkeep_currency)
        .bind(facility.profit_amount)
        .bind(&facility.profit_currency)
        .bind(&facility.created_at)
        .bind(&facility.updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_facility(&self, keep_id: &str, id: &str) -> Result<Option<FacilityRecord>, sqlx::Error> {
        sqlx::query_as::<_, FacilityRecord>(
            "SELECT * FROM keep_facilities WHERE keep_id = ? AND id = ?"
        )
        .bind(keep_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_facilities(&self, keep_id: &str) -> Result<Vec<FacilityRecord>, sqlx::Error> {
        sqlx::query_as::<_, FacilityRecord>(
            "SELECT * FROM keep_facilities WHERE keep_id = ? ORDER BY created_at, name"
        )
        .bind(keep_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_facility(&self, facility: &FacilityRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE keep_facilities
            SET name = ?, upkeep_amount = ?, upkeep_currency = ?,
                profit_amount = ?, profit_currency = ?, updated_at = ?
            WHERE keep_id = ? AND id = ?
            "#
        )
        .bind(&facility.name)
        .bind(facility.upkeep_amount)
        .bind(&facility.upkeep_currency)
        .bind(facility.profit_amount)
        .bind(&facility.profit_currency)
        .bind(&facility.updated_at)
        .bind(&facility.keep_id)
        .bind(&facility.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_facility(&self, keep_id: &str, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM keep_facilities WHERE keep_id = ? AND id = ?")
            .bind(keep_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }

    // =========================================================================
    // Hireling Operations
    // =========================================================================

    async fn create_hireling(&self, hireling: &HirelingRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO keep_hirelings
            (id, keep_id, name, salary_amount, salary_currency, profit_amount, profit_currency, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&hireling.id)
        .bind(&hireling.keep_id)
        .bind(&hireling.name)
        .bind(hireling.salary_amount)
        .bind(&hireling.salary_currency)
        .bind(hireling.profit_amount)
        .bind(&hireling.profit_currency)
        .bind(&hireling.created_at)
        .bind(&hireling.updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_hireling(&self, keep_id: &str, id: &str) -> Result<Option<HirelingRecord>, sqlx::Error> {
        sqlx::query_as::<_, HirelingRecord>(
            "SELECT * FROM keep_hirelings WHERE keep_id = ? AND id = ?"
        )
        .bind(keep_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_hirelings(&self, keep_id: &str) -> Result<Vec<HirelingRecord>, sqlx::Error> {
        sqlx::query_as::<_, HirelingRecord>(
            "SELECT * FROM keep_hirelings WHERE keep_id = ? ORDER BY created_at, name"
        )
        .bind(keep_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_hireling(&self, hireling: &HirelingRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE keep_hirelings
            SET name = ?, salary_amount = ?, salary_currency = ?,
                profit_amount = ?, profit_currency = ?, updated_at = ?
            WHERE keep_id = ? AND id = ?
            "#
        )
        .bind(&hireling.name)
        .bind(hireling.salary_amount)
        .bind(&hireling.salary_currency)
        .bind(hireling.profit_amount)
        .bind(&hireling.profit_currency)
        .bind(&hireling.updated_at)
        .bind(&hireling.keep_id)
        .bind(&hireling.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_hireling(&self, keep_id: &str, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM keep_hirelings WHERE keep_id = ? AND id = ?")
            .bind(keep_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
