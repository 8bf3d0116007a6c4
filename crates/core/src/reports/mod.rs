//! Financial report synthesis: trial balance, balance sheet, and
//! profit-and-loss.
//!
//! Pure with respect to storage: all functions consume balances the store
//! gathered under one read-lock snapshot.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ReportService;
pub use types::{
    AccountBalance, BalanceSheetReport, BalanceSheetSection, ProfitAndLossReport,
    ProfitAndLossSection, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
