//! Check-in history database operations
//!
//! Check-ins are append-only. Rows are removed only together with their
//! campaign.

use super::models::CheckInRecord;
use super::Database;
use sqlx::Row;

/// Extension trait for check-in history operations
pub trait CheckInOps {
    fn insert_check_in(&self, check_in: &CheckInRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_check_in(&self, keep_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<CheckInRecord>, sqlx::Error>> + Send;
    /// Newest first, `limit` rows starting at `offset`.
    fn list_check_ins(&self, keep_id: &str, limit: i64, offset: i64) -> impl std::future::Future<Output = Result<Vec<CheckInRecord>, sqlx::Error>> + Send;
    fn count_check_ins(&self, keep_id: &str) -> impl std::future::Future<Output = Result<i64, sqlx::Error>> + Send;
}

impl CheckInOps for Database {
    async fn insert_check_in(&self, check_in: &CheckInRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO keep_check_ins (id, keep_id, weeks_away, breakdown_json, net_profit_json, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&check_in.id)
        .bind(&check_in.keep_id)
        .bind(check_in.weeks_away)
        .bind(&check_in.breakdown_json)
        .bind(&check_in.net_profit_json)
        .bind(&check_in.created_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_check_in(&self, keep_id: &str, id: &str) -> Result<Option<CheckInRecord>, sqlx::Error> {
        sqlx::query_as::<_, CheckInRecord>(
            "SELECT * FROM keep_check_ins WHERE keep_id = ? AND id = ?"
        )
        .bind(keep_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_check_ins(&self, keep_id: &str, limit: i64, offset: i64) -> Result<Vec<CheckInRecord>, sqlx::Error> {
        sqlx::query_as::<_, CheckInRecord>(
            r#"
            SELECT * FROM keep_check_ins
            WHERE keep_id = ?
            ORDER BY created_at DESC, rowid DESC
            LIMIT ? OFFSET ?
            "#
        )
        .bind(keep_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await
    }

    async fn count_check_ins(&self, keep_id: &str) -> Result<i64, sqlx::Error> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM keep_check_ins WHERE keep_id = ?")
            .bind(keep_id)
            .fetch_one(self.pool())
            .await?;

        row.try_get::<i64, _>("n")
    }
}
