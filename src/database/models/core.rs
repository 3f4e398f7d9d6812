//! Core Entity Records
//!
//! Database records for campaigns, their members and their currencies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{new_id, now_timestamp};

// ============================================================================
// Campaign Record
// ============================================================================

/// Campaign database record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRecord {
    pub id: String,
    pub name: String,
    pub system: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl CampaignRecord {
    pub fn new(name: String, system: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            name,
            system,
            description: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// ============================================================================
// Campaign Member Record
// ============================================================================

/// Role a user holds inside one campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignRole {
    #[serde(rename = "dm")]
    DungeonMaster,
    Player,
}

impl CampaignRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignRole::DungeonMaster => "dm",
            CampaignRole::Player => "player",
        }
    }
}

impl TryFrom<&str> for CampaignRole {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "dm" => Ok(CampaignRole::DungeonMaster),
            "player" => Ok(CampaignRole::Player),
            _ => Err(format!("Unknown campaign role: {}", s)),
        }
    }
}

/// Campaign membership record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub campaign_id: String,
    pub user_id: String,
    pub display_name: String,
    pub role: String, // "dm", "player"
    pub joined_at: String,
}

impl MemberRecord {
    pub fn new(
        campaign_id: String,
        user_id: String,
        display_name: String,
        role: CampaignRole,
    ) -> Self {
        Self {
            campaign_id,
            user_id,
            display_name,
            role: role.as_str().to_string(),
            joined_at: now_timestamp(),
        }
    }

    /// Parsed role; unknown stored values degrade to `Player`.
    pub fn campaign_role(&self) -> CampaignRole {
        CampaignRole::try_from(self.role.as_str()).unwrap_or(CampaignRole::Player)
    }
}

// ============================================================================
// Currency Record
// ============================================================================

/// Campaign-scoped currency, referenced elsewhere by abbreviation
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    pub id: String,
    pub campaign_id: String,
    pub name: String,
    pub abbreviation: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl CurrencyRecord {
    pub fn new(campaign_id: String, name: String, abbreviation: String) -> Self {
        Self {
            id: new_id(),
            campaign_id,
            name,
            abbreviation,
            description: None,
            created_at: now_timestamp(),
        }
    }
}
