//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::accounts::{AccountType, BalanceSide};

/// Account balance input for report synthesis.
///
/// `balance` is signed with debit positive; natural-side magnitudes for
/// report columns come from [`AccountBalance::natural_balance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Account subtype, if any.
    pub subtype: Option<String>,
    /// Total debit amount over the period, opening included.
    pub total_debit: Decimal,
    /// Total credit amount over the period, opening included.
    pub total_credit: Decimal,
    /// Net balance, debit minus credit.
    pub balance: Decimal,
}

impl AccountBalance {
    /// Returns the balance as a magnitude on the account's normal side.
    ///
    /// Credit-normal accounts (liabilities, equity, revenue) report
    /// credit minus debit, so a healthy balance reads positive.
    #[must_use]
    pub fn natural_balance(&self) -> Decimal {
        match self.account_type.normal_side() {
            BalanceSide::Debit => self.balance,
            BalanceSide::Credit => -self.balance,
        }
    }
}

/// One row of the trial balance, placed in a column by balance sign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Debit column amount (net debit balances).
    pub debit: Decimal,
    /// Credit column amount (net credit balances).
    pub credit: Decimal,
}

/// Trial balance column totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Whether the columns agree.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Rows, in account-code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Column totals.
    pub totals: TrialBalanceTotals,
}

/// A balance sheet section (assets, liabilities, or equity).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetSection {
    /// Section total on the natural side.
    pub total: Decimal,
    /// Accounts in the section.
    pub accounts: Vec<AccountBalance>,
}

/// Balance sheet report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Assets section.
    pub assets: BalanceSheetSection,
    /// Liabilities section.
    pub liabilities: BalanceSheetSection,
    /// Equity section.
    pub equity: BalanceSheetSection,
    /// Total assets.
    pub total_assets: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Total equity.
    pub total_equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity.
    pub is_balanced: bool,
}

/// A profit-and-loss section (revenue or expenses).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfitAndLossSection {
    /// Section total on the natural side.
    pub total: Decimal,
    /// Accounts in the section.
    pub accounts: Vec<AccountBalance>,
}

/// Profit-and-loss report over a half-open period `[from, to)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitAndLossReport {
    /// Period start (inclusive).
    pub from: NaiveDate,
    /// Period end (exclusive).
    pub to: NaiveDate,
    /// Currency code.
    pub currency: String,
    /// Revenue section (revenue and other income).
    pub revenue: ProfitAndLossSection,
    /// Expense section (expenses, cost of goods sold, other expenses).
    pub expenses: ProfitAndLossSection,
    /// Revenue minus expenses.
    pub gross_profit: Decimal,
    /// Equal to gross profit; no below-the-line adjustments exist.
    pub net_profit: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn balance(account_type: AccountType, balance: Decimal) -> AccountBalance {
        AccountBalance {
            code: "1000".to_string(),
            name: "Test".to_string(),
            account_type,
            subtype: None,
            total_debit: Decimal::ZERO,
            total_credit: Decimal::ZERO,
            balance,
        }
    }

    #[test]
    fn test_natural_balance_flips_for_credit_normal() {
        assert_eq!(
            balance(AccountType::Asset, dec!(500)).natural_balance(),
            dec!(500)
        );
        assert_eq!(
            balance(AccountType::Revenue, dec!(-1000)).natural_balance(),
            dec!(1000)
        );
        assert_eq!(
            balance(AccountType::Liability, dec!(-250)).natural_balance(),
            dec!(250)
        );
        assert_eq!(
            balance(AccountType::Expense, dec!(300)).natural_balance(),
            dec!(300)
        );
    }
}
