//! Check-in Recorder
//!
//! A check-in is the settlement of a keep's accrued costs and income after
//! the party has been away for some weeks. Once written it is never changed:
//! later edits to facilities or hirelings do not touch earlier snapshots.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::{CheckInError, LedgerError};
use super::ledger::{compute_breakdown, validate_weeks, Breakdown, KeepLedger, NetProfit};
use crate::database::models::{new_id, now_timestamp};
use crate::database::{CheckInOps, CheckInRecord, Database, KeepOps};

/// Immutable settlement snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub keep_id: String,
    pub weeks_away: u32,
    pub breakdown: Breakdown,
    pub net_profit: NetProfit,
    pub created_at: String,
}

impl TryFrom<CheckInRecord> for CheckIn {
    type Error = CheckInError;

    fn try_from(record: CheckInRecord) -> Result<Self, Self::Error> {
        let weeks_away = u32::try_from(record.weeks_away)
            .map_err(|_| LedgerError::InvalidWeeks(record.weeks_away))?;

        let breakdown = serde_json::from_str(&record.breakdown_json).map_err(|source| {
            CheckInError::Corrupt {
                id: record.id.clone(),
                source,
            }
        })?;
        let net_profit = serde_json::from_str(&record.net_profit_json).map_err(|source| {
            CheckInError::Corrupt {
                id: record.id.clone(),
                source,
            }
        })?;

        Ok(Self {
            id: record.id,
            keep_id: record.keep_id,
            weeks_away,
            breakdown,
            net_profit,
            created_at: record.created_at,
        })
    }
}

/// Persist a computed ledger as a new check-in for `keep_id`.
///
/// The breakdown is stored verbatim after a structural check: `weeks` must
/// be positive and every net profit entry must match its currency totals.
/// The write is a single insert, so nothing partial is ever stored.
pub async fn record_check_in(
    db: &Database,
    keep_id: &str,
    weeks: i64,
    breakdown: Breakdown,
    net_profit: NetProfit,
) -> Result<CheckIn, CheckInError> {
    let ledger = KeepLedger {
        weeks: validate_weeks(weeks)?,
        breakdown,
        net_profit,
    };
    ledger.verify()?;

    if db.get_keep(keep_id).await?.is_none() {
        return Err(CheckInError::KeepNotFound(keep_id.to_string()));
    }

    let record = CheckInRecord {
        id: new_id(),
        keep_id: keep_id.to_string(),
        weeks_away: i64::from(ledger.weeks),
        breakdown_json: serde_json::to_string(&ledger.breakdown)?,
        net_profit_json: serde_json::to_string(&ledger.net_profit)?,
        created_at: now_timestamp(),
    };
    db.insert_check_in(&record).await?;

    info!(
        keep_id,
        check_in_id = %record.id,
        weeks = ledger.weeks,
        currencies = ledger.breakdown.len(),
        "Recorded keep check-in"
    );

    Ok(CheckIn {
        id: record.id,
        keep_id: record.keep_id,
        weeks_away: ledger.weeks,
        breakdown: ledger.breakdown,
        net_profit: ledger.net_profit,
        created_at: record.created_at,
    })
}

/// Compute the ledger for `keep_id` from its current facilities and hirelings.
pub async fn preview_ledger(
    db: &Database,
    keep_id: &str,
    weeks: i64,
) -> Result<KeepLedger, CheckInError> {
    validate_weeks(weeks)?;

    let facilities = db.list_facilities(keep_id).await?;
    let hirelings = db.list_hirelings(keep_id).await?;
    debug!(
        keep_id,
        weeks,
        facilities = facilities.len(),
        hirelings = hirelings.len(),
        "Computing keep ledger"
    );

    Ok(compute_breakdown(weeks, &facilities, &hirelings)?)
}

/// Recompute the ledger from stored rates and record it as a check-in.
pub async fn settle_keep(db: &Database, keep_id: &str, weeks: i64) -> Result<CheckIn, CheckInError> {
    let ledger = preview_ledger(db, keep_id, weeks).await?;
    record_check_in(
        db,
        keep_id,
        i64::from(ledger.weeks),
        ledger.breakdown,
        ledger.net_profit,
    )
    .await
}
