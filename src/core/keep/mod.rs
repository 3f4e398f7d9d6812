//! Player Keep Economy
//!
//! Weekly settlement of a keep's facilities and hirelings, the append-only
//! check-in history that records each settlement, and the formatting used
//! when that history is read back.
//!
//! ## Modules
//!
//! - [`ledger`] - pure per-currency calculator
//! - [`check_in`] - persisting and loading settlements
//! - [`history`] - paginated, display-ready history
//! - [`error`] - error types

pub mod check_in;
pub mod error;
pub mod history;
pub mod ledger;

pub use check_in::{preview_ledger, record_check_in, settle_keep, CheckIn};
pub use error::{CheckInError, LedgerError};
pub use history::{
    classify, format_check_in, list_check_ins, CheckInPage, CheckInView, CurrencyRow, Outcome,
    PageRequest,
};
pub use ledger::{
    compute_breakdown, validate_weeks, Breakdown, CurrencyTotals, KeepLedger, LedgerLine,
    LineKind, NetProfit, WeeklyObligation,
};
