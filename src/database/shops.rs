//! Shop database operations
//!
//! Shops and their stocked items.

use super::models::{ShopItemRecord, ShopRecord};
use super::Database;

/// Extension trait for shop operations
pub trait ShopOps {
    fn create_shop(&self, shop: &ShopRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_shop(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<ShopRecord>, sqlx::Error>> + Send;
    fn list_shops(&self, campaign_id: &str) -> impl std::future::Future<Output = Result<Vec<ShopRecord>, sqlx::Error>> + Send;
    fn update_shop(&self, shop: &ShopRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_shop(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;

    fn add_shop_item(&self, item: &ShopItemRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_shop_item(&self, shop_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<ShopItemRecord>, sqlx::Error>> + Send;
    fn list_shop_items(&self, shop_id: &str) -> impl std::future::Future<Output = Result<Vec<ShopItemRecord>, sqlx::Error>> + Send;
    fn update_shop_item(&self, item: &ShopItemRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn remove_shop_item(&self, shop_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl ShopOps for Database {
    // =========================================================================
    // Shop Operations
    // =========================================================================

    async fn create_shop(&self, shop: &ShopRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO shops (id, campaign_id, name, keeper, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&shop.id)
        .bind(&shop.campaign_id)
        .bind(&shop.name)
        .bind(&shop.keeper)
        .bind(&shop.description)
        .bind(&shop.created_at)
        .bind(&shop.updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_shop(&self, campaign_id: &str, id: &str) -> Result<Option<ShopRecord>, sqlx::Error> {
        sqlx::query_as::<_, ShopRecord>(
            "SELECT * FROM shops WHERE campaign_id = ? AND id = ?"
        )
        .bind(campaign_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_shops(&self, campaign_id: &str) -> Result<Vec<ShopRecord>, sqlx::Error> {
        sqlx::query_as::<_, ShopRecord>(
            "SELECT * FROM shops WHERE campaign_id = ? ORDER BY name"
        )
        .bind(campaign_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_shop(&self, shop: &ShopRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE shops
            SET name = ?, keeper = ?, description = ?, updated_at = ?
            WHERE campaign_id = ? AND id = ?
            "#
        )
        .bind(&shop.name)
        .bind(&shop.keeper)
        .bind(&shop.description)
        .bind(&shop.updated_at)
        .bind(&shop.campaign_id)
        .bind(&shop.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_shop(&self, campaign_id: &str, id: &str) -> Result<(), sqlx::Error> {
        let mut tx = self.pool().begin().await?;

        sqlx::query(
            "DELETE FROM shop_items WHERE shop_id IN (SELECT id FROM shops WHERE campaign_id = ? AND id = ?)"
        )
        .bind(campaign_id)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM shops WHERE campaign_id = ? AND id = ?")
            .bind(campaign_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // =========================================================================
    // Shop Item Operations
    // =========================================================================

    async fn add_shop_item(&self, item: &ShopItemRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO shop_items (id, shop_id, name, price, currency, quantity)
            VALUES (?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&item.id)
        .bind(&item.shop_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.currency)
        .bind(item.quantity)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_shop_item(&self, shop_id: &str, id: &str) -> Result<Option<ShopItemRecord>, sqlx::Error> {
        sqlx::query_as::<_, ShopItemRecord>(
            "SELECT * FROM shop_items WHERE shop_id = ? AND id = ?"
        )
        .bind(shop_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_shop_items(&self, shop_id: &str) -> Result<Vec<ShopItemRecord>, sqlx::Error> {
        sqlx::query_as::<_, ShopItemRecord>(
            "SELECT * FROM shop_items WHERE shop_id = ? ORDER BY name"
        )
        .bind(shop_id)
        .fetch_all(self.pool())
        .await
    }

    async fn update_shop_item(&self, item: &ShopItemRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE shop_items SET name = ?, price = ?, currency = ?, quantity = ? WHERE shop_id = ? AND id = ?"
        )
        .bind(&item.name)
        .bind(item.price)
        .bind(&item.currency)
        .bind(item.quantity)
        .bind(&item.shop_id)
        .bind(&item.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn remove_shop_item(&self, shop_id: &str, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM shop_items WHERE shop_id = ? AND id = ?")
            .bind(shop_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
