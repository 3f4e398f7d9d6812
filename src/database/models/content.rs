//! Shared Campaign Content Records
//!
//! Shops with their stock, and the campaign bestiary.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{new_id, now_timestamp};

// ============================================================================
// Shop Records
// ============================================================================

/// Shop database record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub keeper: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl ShopRecord {
    pub fn new(campaign_id: String, name: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            campaign_id,
            name,
            keeper: None,
            description: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Item stocked by a shop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ShopItemRecord {
    pub id: String,
    pub shop_id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub quantity: Option<i64>, // None = unlimited stock
}

impl ShopItemRecord {
    pub fn new(shop_id: String, name: String, price: f64, currency: String) -> Self {
        Self {
            id: new_id(),
            shop_id,
            name,
            price,
            currency,
            quantity: None,
        }
    }
}

/// Shop together with its stock, as returned to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopWithItems {
    #[serde(flatten)]
    pub shop: ShopRecord,
    pub items: Vec<ShopItemRecord>,
}

// ============================================================================
// Creature Record
// ============================================================================

/// Creature (bestiary entry) database record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CreatureRecord {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub kind: Option<String>, // "beast", "undead", "fiend", ...
    pub challenge_rating: Option<String>,
    pub armor_class: Option<i64>,
    pub hit_points: Option<i64>,
    pub description: Option<String>,
    pub visible_to_players: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl CreatureRecord {
    pub fn new(campaign_id: String, name: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            campaign_id,
            name,
            kind: None,
            challenge_rating: None,
            armor_class: None,
            hit_points: None,
            description: None,
            visible_to_players: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}
