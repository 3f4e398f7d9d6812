//! Creature (bestiary) database operations

use super::models::CreatureRecord;
use super::Database;

/// Extension trait for creature operations
pub trait CreatureOps {
    fn create_creature(&self, creature: &CreatureRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn get_creature(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<Option<CreatureRecord>, sqlx::Error>> + Send;
    /// List a campaign's creatures; `visible_only` hides DM-only entries.
    fn list_creatures(&self, campaign_id: &str, visible_only: bool) -> impl std::future::Future<Output = Result<Vec<CreatureRecord>, sqlx::Error>> + Send;
    fn update_creature(&self, creature: &CreatureRecord) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
    fn delete_creature(&self, campaign_id: &str, id: &str) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;
}

impl CreatureOps for Database {
    async fn create_creature(&self, creature: &CreatureRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO creatures
            (id, campaign_id, name, kind, challenge_rating, armor_class, hit_points,
             description, visible_to_players, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(&creature.id)
        .bind(&creature.campaign_id)
        .bind(&creature.name)
        .bind(&creature.kind)
        .bind(&creature.challenge_rating)
        .bind(creature.armor_class)
        .bind(creature.hit_points)
        .bind(&creature.description)
        .bind(creature.visible_to_players)
        .bind(&creature.created_at)
        .bind(&creature.updated_at)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn get_creature(&self, campaign_id: &str, id: &str) -> Result<Option<CreatureRecord>, sqlx::Error> {
        sqlx::query_as::<_, CreatureRecord>(
            "SELECT * FROM creatures WHERE campaign_id = ? AND id = ?"
        )
        .bind(campaign_id)
        .bind(id)
        .fetch_optional(self.pool())
        .await
    }

    async fn list_creatures(&self, campaign_id: &str, visible_only: bool) -> Result<Vec<CreatureRecord>, sqlx::Error> {
        if visible_only {
            sqlx::query_as::<_, CreatureRecord>(
                "SELECT * FROM creatures WHERE campaign_id = ? AND visible_to_players = 1 ORDER BY name"
            )
            .bind(campaign_id)
            .fetch_all(self.pool())
            .await
        } else {
            sqlx::query_as::<_, CreatureRecord>(
                "SELECT * FROM creatures WHERE campaign_id = ? ORDER BY name"
            )
            .bind(campaign_id)
            .fetch_all(self.pool())
            .await
        }
    }

    async fn update_creature(&self, creature: &CreatureRecord) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE creatures
            SET name = ?, kind = ?, challenge_rating = ?, armor_class = ?, hit_points = ?,
                description = ?, visible_to_players = ?, updated_at = ?
            WHERE campaign_id = ? AND id = ?
            "#
        )
        .bind(&creature.name)
        .bind(&creature.kind)
        .bind(&creature.challenge_rating)
        .bind(creature.armor_class)
        .bind(creature.hit_points)
        .bind(&creature.description)
        .bind(creature.visible_to_players)
        .bind(&creature.updated_at)
        .bind(&creature.campaign_id)
        .bind(&creature.id)
        .execute(self.pool())
        .await?;
        Ok(())
    }

    async fn delete_creature(&self, campaign_id: &str, id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM creatures WHERE campaign_id = ? AND id = ?")
            .bind(campaign_id)
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
