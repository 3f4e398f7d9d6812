//! Keep Ledger Calculator
//!
//! Settles a player keep's recurring obligations over a number of weeks.
//! Facilities and hirelings each carry a weekly cost and a weekly income,
//! denominated independently. Totals are kept per currency abbreviation and
//! never converted or summed across currencies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::{LedgerError, Result};

/// Relative tolerance used when re-checking a submitted net profit.
const NET_PROFIT_TOLERANCE: f64 = 1e-9;

// ============================================================================
// Inputs
// ============================================================================

/// A recurring weekly cost and income attached to a keep.
///
/// Implemented by facility and hireling records so the calculator can stay
/// independent of the persistence layer.
pub trait WeeklyObligation {
    fn name(&self) -> &str;
    /// Weekly cost (facility upkeep or hireling salary) and its currency.
    fn weekly_cost(&self) -> (f64, &str);
    /// Weekly income and its currency.
    fn weekly_income(&self) -> (f64, &str);
}

// ============================================================================
// Outputs
// ============================================================================

/// Kind of an itemized ledger line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Upkeep,
    Salary,
    Profit,
}

impl LineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineKind::Upkeep => "upkeep",
            LineKind::Salary => "salary",
            LineKind::Profit => "profit",
        }
    }

    pub fn is_cost(&self) -> bool {
        matches!(self, LineKind::Upkeep | LineKind::Salary)
    }
}

/// One itemized entry in a currency's breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerLine {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: LineKind,
    /// Accrued amount over the whole period
    pub amount: f64,
    pub per_week: f64,
}

/// Accumulated totals for a single currency
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotals {
    pub total_upkeep: f64,
    pub total_profit: f64,
    #[serde(default)]
    pub facilities: Vec<LedgerLine>,
    #[serde(default)]
    pub hirelings: Vec<LedgerLine>,
}

impl CurrencyTotals {
    pub fn net(&self) -> f64 {
        self.total_profit - self.total_upkeep
    }

    /// False when both totals are zero; such currencies are hidden on display.
    pub fn has_activity(&self) -> bool {
        self.total_upkeep != 0.0 || self.total_profit != 0.0
    }
}

/// Per-currency breakdown keyed by currency abbreviation.
pub type Breakdown = BTreeMap<String, CurrencyTotals>;

/// Signed net result per currency abbreviation.
pub type NetProfit = BTreeMap<String, f64>;

/// Result of settling a keep over a number of weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeepLedger {
    pub weeks: u32,
    pub breakdown: Breakdown,
    pub net_profit: NetProfit,
}

impl KeepLedger {
    /// Check that a ledger is internally consistent.
    ///
    /// Every currency in `net_profit` must exist in `breakdown` and equal
    /// `total_profit - total_upkeep` for that currency.
    pub fn verify(&self) -> Result<()> {
        if self.weeks == 0 {
            return Err(LedgerError::InvalidWeeks(0));
        }

        for (currency, net) in &self.net_profit {
            let totals = self.breakdown.get(currency).ok_or_else(|| {
                LedgerError::NetProfitWithoutBreakdown {
                    currency: currency.clone(),
                }
            })?;

            if !net.is_finite() || !totals.total_profit.is_finite() || !totals.total_upkeep.is_finite() {
                return Err(LedgerError::NonFiniteAmount {
                    currency: currency.clone(),
                });
            }

            let expected = totals.net();
            let scale = 1.0_f64
                .max(totals.total_profit.abs() + totals.total_upkeep.abs());
            if (expected - net).abs() > NET_PROFIT_TOLERANCE * scale {
                return Err(LedgerError::NetProfitMismatch {
                    currency: currency.clone(),
                    expected,
                    actual: *net,
                });
            }
        }

        Ok(())
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Validate a raw week count.
pub fn validate_weeks(weeks: i64) -> Result<u32> {
    if weeks <= 0 {
        return Err(LedgerError::InvalidWeeks(weeks));
    }
    u32::try_from(weeks).map_err(|_| LedgerError::InvalidWeeks(weeks))
}

/// Compute the per-currency breakdown and net profit for `weeks` weeks.
///
/// Invalid week counts are rejected before any accumulation.
pub fn compute_breakdown<F, H>(weeks: i64, facilities: &[F], hirelings: &[H]) -> Result<KeepLedger>
where
    F: WeeklyObligation,
    H: WeeklyObligation,
{
    let weeks = validate_weeks(weeks)?;
    let factor = f64::from(weeks);

    let mut breakdown = Breakdown::new();

    for facility in facilities {
        let (upkeep, upkeep_currency) = facility.weekly_cost();
        let (profit, profit_currency) = facility.weekly_income();

        let totals = breakdown.entry(upkeep_currency.to_string()).or_default();
        totals.total_upkeep += upkeep * factor;
        totals.facilities.push(line(facility.name(), LineKind::Upkeep, upkeep, factor));

        let totals = breakdown.entry(profit_currency.to_string()).or_default();
        totals.total_profit += profit * factor;
        totals.facilities.push(line(facility.name(), LineKind::Profit, profit, factor));
    }

    for hireling in hirelings {
        let (salary, salary_currency) = hireling.weekly_cost();
        let (profit, profit_currency) = hireling.weekly_income();

        let totals = breakdown.entry(salary_currency.to_string()).or_default();
        totals.total_upkeep += salary * factor;
        totals.hirelings.push(line(hireling.name(), LineKind::Salary, salary, factor));

        let totals = breakdown.entry(profit_currency.to_string()).or_default();
        totals.total_profit += profit * factor;
        totals.hirelings.push(line(hireling.name(), LineKind::Profit, profit, factor));
    }

    let net_profit = breakdown
        .iter()
        .map(|(currency, totals)| (currency.clone(), totals.net()))
        .collect();

    Ok(KeepLedger {
        weeks,
        breakdown,
        net_profit,
    })
}

fn line(name: &str, kind: LineKind, per_week: f64, factor: f64) -> LedgerLine {
    LedgerLine {
        name: name.to_string(),
        kind,
        amount: per_week * factor,
        per_week,
    }
}
