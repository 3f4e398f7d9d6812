//! Campaign member database operations
//!
//! Demoting or removing a DM is conditional on another DM remaining. The
//! count is part of the same statement as the write, so concurrent requests
//! cannot both pass it.

use super::models::MemberRecord;
use super::Database;
use sqlx::Row;

/// Extension trait for campaign membership operations
pub trait MemberOps {
    fn add_member(&self, member: &MemberRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_member(&self, campaign_id: &str, user_id: &str) -> impl std::future::Future<Output = Result<Option<MemberRecord>, sqlx::Error>> + Send;
    fn list_members(&self, campaign_id: &str) -> impl std::future::Future<Output = Result<Vec<MemberRecord>, sqlx::Error>> + Send;
    /// Returns `false` when the member is missing or the write would leave
    /// the campaign without a DM.
    fn update_member(&self, member: &MemberRecord) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
    /// Returns `false` when the member is missing or is the campaign's last DM.
    fn remove_member(&self, campaign_id: &str, user_id: &str) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
    fn count_members_with_role(&self, campaign_id: &str, role: &str) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl MemberOps for Database {
    async fn add_member(&self, member: &MemberRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO campaign_members (campaign_id, user_id, display_name, role, joined_at)
            VALUES (?, ?, ?, ?, ?)
            "#
        )
        .bind(&member.campaign_id)
        .bind(&member.user_id)
        .bind(&member.display_name)
        .bind(&member.role)
        .bind(&member.joined_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_member(&self, campaign_id: &str, user_id: &str) -> Result<Option<MemberRecord>, sqlx::Error> {
        sqlx::query_as::<_, MemberRecord>(
            "SELECT * FROM campaign_members WHERE campaign_id = ? AND user_id = ?"
        )
        .bind(campaign_id)
        .bind(user_id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_members(&self, campaign_id: &str) -> Result<Vec<MemberRecord>, sqlx::Error> {
        sqlx::query_as::<_, MemberRecord>(
            "SELECT * FROM campaign_members WHERE campaign_id = ? ORDER BY role, display_name"
        )
        .bind(campaign_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_member(&self, member: &MemberRecord) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE campaign_members SET display_name = ?, role = ?
            WHERE campaign_id = ? AND user_id = ?
              AND (role <> 'dm' OR ? = 'dm'
                   OR (SELECT COUNT(*) FROM campaign_members
                       WHERE campaign_id = ? AND role = 'dm') > 1)
            "#
        )
        .bind(&member.display_name)
        .bind(&member.role)
        .bind(&member.campaign_id)
        .bind(&member.user_id)
        .bind(&member.role)
        .bind(&member.campaign_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove_member(&self, campaign_id: &str, user_id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM campaign_members
            WHERE campaign_id = ? AND user_id = ?
              AND (role <> 'dm'
                   OR (SELECT COUNT(*) FROM campaign_members
                       WHERE campaign_id = ? AND role = 'dm') > 1)
            "#
        )
        .bind(campaign_id)
        .bind(user_id)
        .bind(campaign_id)
        .execute(self.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_members_with_role(&self, campaign_id: &str, role: &str) -> Result<i64, sqlx::Error> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM campaign_members WHERE campaign_id = ? AND role = ?"
        )
        .bind(campaign_id)
        .bind(role)
        .fetch_one(self.pool())
        .await?;

        row.try_get::<i64, _>("n")
    }
}
