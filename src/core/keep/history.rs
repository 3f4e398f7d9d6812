//! Check-in History Viewer
//!
//! Reads settlements back newest-first and shapes them for display:
//! currencies without activity are dropped, amounts are rounded to two
//! decimals, and each entry gets an overall profit/loss indicator. None of
//! this is persisted.

use serde::{Deserialize, Serialize};

use super::check_in::CheckIn;
use super::error::CheckInError;
use super::ledger::{LedgerLine, NetProfit};
use crate::config::HistoryConfig;
use crate::database::{CheckInOps, Database};

// ============================================================================
// Formatting
// ============================================================================

/// Overall direction of a check-in across all currencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Profit,
    Loss,
    Neutral,
}

/// One currency as shown in the history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRow {
    pub currency: String,
    pub total_upkeep: f64,
    pub total_profit: f64,
    pub net: f64,
    pub facilities: Vec<LedgerLine>,
    pub hirelings: Vec<LedgerLine>,
}

/// Display form of a stored check-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInView {
    pub id: String,
    pub weeks_away: u32,
    pub created_at: String,
    pub outcome: Outcome,
    pub total_gains: f64,
    pub total_losses: f64,
    pub currencies: Vec<CurrencyRow>,
}

/// Round to the two decimals used for display.
pub fn round2(value: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0
    (value * 100.0).round() / 100.0 + 0.0
}

/// Classify a net profit map.
///
/// Compares the sum of positive values with the sum of the magnitudes of
/// negative values, at display precision. Currencies are never converted;
/// this only drives a visual indicator.
pub fn classify(net_profit: &NetProfit) -> Outcome {
    let (gains, losses) = gains_and_losses(net_profit);
    let (gains, losses) = (round2(gains), round2(losses));

    if gains > losses {
        Outcome::Profit
    } else if losses > gains {
        Outcome::Loss
    } else {
        Outcome::Neutral
    }
}

fn gains_and_losses(net_profit: &NetProfit) -> (f64, f64) {
    net_profit.values().fold((0.0, 0.0), |(gains, losses), &net| {
        if net > 0.0 {
            (gains + net, losses)
        } else {
            (gains, losses - net)
        }
    })
}

fn rounded_lines(lines: &[LedgerLine]) -> Vec<LedgerLine> {
    lines
        .iter()
        .map(|line| LedgerLine {
            amount: round2(line.amount),
            per_week: round2(line.per_week),
            ..line.clone()
        })
        .collect()
}

/// Shape a check-in for display.
pub fn format_check_in(check_in: &CheckIn) -> CheckInView {
    let currencies = check_in
        .breakdown
        .iter()
        .filter(|(_, totals)| totals.has_activity())
        .map(|(currency, totals)| CurrencyRow {
            currency: currency.clone(),
            total_upkeep: round2(totals.total_upkeep),
            total_profit: round2(totals.total_profit),
            net: round2(
                check_in
                    .net_profit
                    .get(currency)
                    .copied()
                    .unwrap_or_else(|| totals.net()),
            ),
            facilities: rounded_lines(&totals.facilities),
            hirelings: rounded_lines(&totals.hirelings),
        })
        .collect();

    let (gains, losses) = gains_and_losses(&check_in.net_profit);

    CheckInView {
        id: check_in.id.clone(),
        weeks_away: check_in.weeks_away,
        created_at: check_in.created_at.clone(),
        outcome: classify(&check_in.net_profit),
        total_gains: round2(gains),
        total_losses: round2(losses),
        currencies,
    }
}

// ============================================================================
// Pagination
// ============================================================================

/// Normalized 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Fill in defaults and clamp to the configured limits.
    pub fn new(page: Option<u32>, page_size: Option<u32>, limits: &HistoryConfig) -> Self {
        let max = limits.max_page_size.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size
                .unwrap_or(limits.default_page_size)
                .clamp(1, max),
        }
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }
}

/// One page of formatted check-ins
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPage {
    pub entries: Vec<CheckInView>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
    pub total_pages: i64,
}

/// List a keep's check-ins newest first.
pub async fn list_check_ins(
    db: &Database,
    keep_id: &str,
    request: PageRequest,
) -> Result<CheckInPage, CheckInError> {
    let total = db.count_check_ins(keep_id).await?;
    let records = db
        .list_check_ins(keep_id, i64::from(request.page_size), request.offset())
        .await?;

    let entries = records
        .into_iter()
        .map(|record| CheckIn::try_from(record).map(|check_in| format_check_in(&check_in)))
        .collect::<Result<Vec<_>, _>>()?;

    let page_size = i64::from(request.page_size);
    Ok(CheckInPage {
        entries,
        page: request.page,
        page_size: request.page_size,
        total,
        total_pages: (total + page_size - 1) / page_size,
    })
}
