//! Campaign database operations
//!
//! This module provides CRUD operations for campaigns. Creating a campaign
//! also enrolls its owner as DM and opens the campaign's player keep.

use super::models::{CampaignRecord, KeepRecord, MemberRecord};
use super::Database;

/// Extension trait for campaign-related database operations
pub trait CampaignOps {
    fn create_campaign(&self, campaign: &CampaignRecord, owner: &MemberRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_campaign(&self, id: &str) -> impl std::future::Future<Output = Result<Option<CampaignRecord>, sqlx::Error>> + Send;
    fn list_campaigns(&self) -> impl std::future::Future<Output = Result<Vec<CampaignRecord>, sqlx::Error>> + Send;
    fn list_campaigns_for_user(&self, user_id: &str) -> impl std::future::Future<Output = Result<Vec<CampaignRecord>, sqlx::Error>> + Send;
    fn update_campaign(&self, campaign: &CampaignRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_campaign(&self, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl CampaignOps for Database {
    async fn create_campaign(&self, campaign: &CampaignRecord, owner: &MemberRecord) -> Result<(), sqlx::Error> {
        let keep = KeepRecord::new(campaign.id.clone());
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (id, name, system, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&campaign.id)
        .bind(&campaign.name)
        .bind(&campaign.system)
        .bind(&campaign.description)
        .bind(&campaign.created_at)
        .bind(&campaign.updated_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO campaign_members (campaign_id, user_id, display_name, role, joined_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&campaign.id)
        .bind(&owner.user_id)
        .bind(&owner.display_name)
        .bind(&owner.role)
        .bind(&owner.joined_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO player_keeps (id, campaign_id, icon_url, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&keep.id)
        .bind(&keep.campaign_id)
        .bind(&keep.icon_url)
        .bind(&keep.description)
        .bind(&keep.created_at)
        .bind(&keep.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn get_campaign(&self, id: &str) -> Result<Option<CampaignRecord>, sqlx::Error> {
        sqlx::query_as::<_, CampaignRecord>(
            "SELECT * FROM campaigns WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, sqlx::Error> {
        sqlx::query_as::<_, CampaignRecord>(
            "SELECT * FROM campaigns ORDER BY updated_at DESC"
        )
        .fetch_all(self.pool())
        .await
    }

    async fn list_campaigns_for_user(&self, user_id: &str) -> Result<Vec<CampaignRecord>, sqlx::Error> {
        sqlx::query_as::<_, CampaignRecord>(
            r#"
            SELECT c.* FROM campaigns c
            JOIN campaign_members m ON m.campaign_id = c.id
            WHERE m.user_id = ?
            ORDER BY c.updated_at DESC
            "#
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_campaign(&self, campaign: &CampaignRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE campaigns
            SET name = ?, system = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(&campaign.name)
        .bind(&campaign.system)
        .bind(&campaign.description)
        .bind(&campaign.updated_at)
        .bind(&campaign.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_campaign(&self, id: &str) -> Result<(), sqlx::Error> {
        // Children before parents: foreign keys are enforced
        const CASCADE: [&str; 10] = [
            "DELETE FROM shop_items WHERE shop_id IN (SELECT id FROM shops WHERE campaign_id = ?)",
            "DELETE FROM shops WHERE campaign_id = ?",
            "DELETE FROM creatures WHERE campaign_id = ?",
            "DELETE FROM keep_check_ins WHERE keep_id IN (SELECT id FROM player_keeps WHERE campaign_id = ?)",
            "DELETE FROM keep_facilities WHERE keep_id IN (SELECT id FROM player_keeps WHERE campaign_id = ?)",
            "DELETE FROM keep_hirelings WHERE keep_id IN (SELECT id FROM player_keeps WHERE campaign_id = ?)",
            "DELETE FROM player_keeps WHERE campaign_id = ?",
            "DELETE FROM currencies WHERE campaign_id = ?",
            "DELETE FROM campaign_members WHERE campaign_id = ?",
            "DELETE FROM campaigns WHERE id = ?",
        ];

        let mut tx = self.pool().begin().await?;
        for statement in CASCADE {
            sqlx::query(statement).bind(id).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
