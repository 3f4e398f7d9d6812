//! Currency database operations
//!
//! Currencies are scoped to a campaign and unique by abbreviation.

use super::models::CurrencyRecord;
use super::Database;

/// Extension trait for currency operations
pub trait CurrencyOps {
    fn create_currency(&self, currency: &CurrencyRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_currency(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<CurrencyRecord>, sqlx::Error>> + Send;
    fn list_currencies(&self, campaign_id: &str) -> impl std::future::Future<Output = Result<Vec<CurrencyRecord>, sqlx::Error>> + Send;
    fn currency_exists(&self, campaign_id: &str, abbreviation: &str) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
    fn update_currency(&self, currency: &CurrencyRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_currency(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl CurrencyOps for Database {
    async fn create_currency(&self, currency: &CurrencyRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO currencies (id, campaign_id, name, abbreviation, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&currency.id)
        .bind(&currency.campaign_id)
        .bind(&currency.name)
        .bind(&currency.abbreviation)
        .bind(&currency.description)
        .bind(&currency.created_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_currency(&self, campaign_id: &str, id: &str) -> Result<Option<CurrencyRecord>, sqlx::Error> {
        sqlx::query_as::<_, CurrencyRecord>(
            "SELECT * FROM currencies WHERE campaign_id = ? AND id = ?"
        )
        .bind(campaign_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_currencies(&self, campaign_id: &str) -> Result<Vec<CurrencyRecord>, sqlx::Error> {
        sqlx::query_as::<_, CurrencyRecord>(
            "SELECT * FROM currencies WHERE campaign_id = ? ORDER BY name"
        )
        .bind(campaign_id)
        .fetch_all(self.pool())
        .await
    }

    async fn currency_exists(&self, campaign_id: &str, abbreviation: &str) -> Result<bool, sqlx::Error> {
        let found: Option<(String,)> = sqlx::query_as(
            "SELECT id FROM currencies WHERE campaign_id = ? AND abbreviation = ?"
        )
        .bind(campaign_id)
        .bind(abbreviation)
        .fetch_optional(self.pool())
        .await?;
        Ok(found.is_some())
    }

    async fn update_currency(&self, currency: &CurrencyRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE currencies
            SET name = ?, abbreviation = ?, description = ?
            WHERE campaign_id = ? AND id = ?
            "#
        )
        .bind(&currency.name)
        .bind(&currency.abbreviation)
        .bind(&currency.description)
        .bind(&currency.campaign_id)
        .bind(&currency.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_currency(&self, campaign_id: &str, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM currencies WHERE campaign_id = ? AND id = ?")
            .bind(campaign_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
