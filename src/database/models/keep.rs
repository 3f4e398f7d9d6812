//! Player Keep Records
//!
//! Keeps, their recurring facilities and hirelings, and the append-only
//! check-in history.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{new_id, now_timestamp};
use crate::core::keep::WeeklyObligation;

// ============================================================================
// Player Keep Record
// ============================================================================

/// Player keep database record (one per campaign)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct KeepRecord {
    pub id: String,
    pub campaign_id: String,
    pub icon_url: Option<String>,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl KeepRecord {
    pub fn new(campaign_id: String) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            campaign_id,
            icon_url: None,
            description: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

// ============================================================================
// Facility Record
// ============================================================================

/// Facility: a weekly upkeep and a weekly profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FacilityRecord {
    pub id: String,
    pub keep_id: String,
    pub name: String,
    pub upkeep_amount: f64,
    pub upkeep_currency: String,
    pub profit_amount: f64,
    pub profit_currency: String,
    pub created_at: String,
    pub updated_at: String,
}

impl FacilityRecord {
    pub fn new(
        keep_id: String,
        name: String,
        upkeep: (f64, String),
        profit: (f64, String),
    ) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            keep_id,
            name,
            upkeep_amount: upkeep.0,
            upkeep_currency: upkeep.1,
            profit_amount: profit.0,
            profit_currency: profit.1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl WeeklyObligation for FacilityRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn weekly_cost(&self) -> (f64, &str) {
        (self.upkeep_amount, &self.upkeep_currency)
    }

    fn weekly_income(&self) -> (f64, &str) {
        (self.profit_amount, &self.profit_currency)
    }
}

// ============================================================================
// Hireling Record
// ============================================================================

/// Hireling: a paid NPC with a weekly salary and a weekly profit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HirelingRecord {
    pub id: String,
    pub keep_id: String,
    pub name: String,
    pub salary_amount: f64,
    pub salary_currency: String,
    pub profit_amount: f64,
    pub profit_currency: String,
    pub created_at: String,
    pub updated_at: String,
}

impl HirelingRecord {
    pub fn new(
        keep_id: String,
        name: String,
        salary: (f64, String),
        profit: (f64, String),
    ) -> Self {
        let now = now_timestamp();
        Self {
            id: new_id(),
            keep_id,
            name,
            salary_amount: salary.0,
            salary_currency: salary.1,
            profit_amount: profit.0,
            profit_currency: profit.1,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

impl WeeklyObligation for HirelingRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn weekly_cost(&self) -> (f64, &str) {
        (self.salary_amount, &self.salary_currency)
    }

    fn weekly_income(&self) -> (f64, &str) {
        (self.profit_amount, &self.profit_currency)
    }
}

// ============================================================================
// Check-in Record
// ============================================================================

/// Stored check-in snapshot. Never updated once written.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CheckInRecord {
    pub id: String,
    pub keep_id: String,
    pub weeks_away: i64,
    pub breakdown_json: String,  // JSON map currency -> totals
    pub net_profit_json: String, // JSON map currency -> signed total
    pub created_at: String,
}
