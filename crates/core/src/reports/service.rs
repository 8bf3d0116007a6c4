//! Report synthesis from account balances.
//!
//! Pure functions over pre-computed balances; the store layer gathers
//! balances under its read lock and hands them here, so reports always
//! reflect one consistent snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::accounts::AccountType;

use super::types::{
    AccountBalance, BalanceSheetReport, BalanceSheetSection, ProfitAndLossReport,
    ProfitAndLossSection, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};

/// Stateless report generator.
pub struct ReportService;

impl ReportService {
    /// Generates a trial balance from account balances.
    ///
    /// Each account lands in the debit or credit column by the sign of its
    /// net balance; the columns must agree for a consistent ledger.
    #[must_use]
    pub fn trial_balance(
        as_of: NaiveDate,
        currency: impl Into<String>,
        balances: Vec<AccountBalance>,
    ) -> TrialBalanceReport {
        let mut rows: Vec<TrialBalanceRow> = balances
            .into_iter()
            .map(|b| {
                let (debit, credit) = if b.balance >= Decimal::ZERO {
                    (b.balance, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, -b.balance)
                };
                TrialBalanceRow {
                    code: b.code,
                    name: b.name,
                    account_type: b.account_type,
                    debit,
                    credit,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.code.cmp(&b.code));

        let total_debit: Decimal = rows.iter().map(|r| r.debit).sum();
        let total_credit: Decimal = rows.iter().map(|r| r.credit).sum();

        TrialBalanceReport {
            as_of,
            currency: currency.into(),
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates a balance sheet from account balances.
    ///
    /// Partitions balances into assets, liabilities, and equity; income
    /// statement accounts are excluded. Verifies
    /// Assets = Liabilities + Equity.
    #[must_use]
    pub fn balance_sheet(
        as_of: NaiveDate,
        currency: impl Into<String>,
        balances: Vec<AccountBalance>,
    ) -> BalanceSheetReport {
        let mut assets = BalanceSheetSection::default();
        let mut liabilities = BalanceSheetSection::default();
        let mut equity = BalanceSheetSection::default();

        for balance in balances {
            match balance.account_type {
                AccountType::Asset => Self::add_to_section(&mut assets, balance),
                AccountType::Liability => Self::add_to_section(&mut liabilities, balance),
                AccountType::Equity => Self::add_to_section(&mut equity, balance),
                AccountType::Revenue
                | AccountType::Expense
                | AccountType::CostOfGoodsSold
                | AccountType::OtherIncome
                | AccountType::OtherExpense => {}
            }
        }

        let total_assets = assets.total;
        let total_liabilities = liabilities.total;
        let total_equity = equity.total;
        let liabilities_and_equity = total_liabilities + total_equity;

        BalanceSheetReport {
            as_of,
            currency: currency.into(),
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }

    /// Generates a profit-and-loss report from period account balances.
    ///
    /// The caller restricts the balances to activity in `[from, to)`.
    /// Revenue covers Revenue and OtherIncome; expenses cover Expense,
    /// CostOfGoodsSold, and OtherExpense. There are no below-the-line
    /// adjustments, so net profit equals gross profit.
    #[must_use]
    pub fn profit_and_loss(
        from: NaiveDate,
        to: NaiveDate,
        currency: impl Into<String>,
        balances: Vec<AccountBalance>,
    ) -> ProfitAndLossReport {
        let mut revenue = ProfitAndLossSection::default();
        let mut expenses = ProfitAndLossSection::default();

        for balance in balances {
            match balance.account_type {
                AccountType::Revenue | AccountType::OtherIncome => {
                    Self::add_to_pl_section(&mut revenue, balance);
                }
                AccountType::Expense
                | AccountType::CostOfGoodsSold
                | AccountType::OtherExpense => {
                    Self::add_to_pl_section(&mut expenses, balance);
                }
                AccountType::Asset | AccountType::Liability | AccountType::Equity => {}
            }
        }

        let gross_profit = revenue.total - expenses.total;

        ProfitAndLossReport {
            from,
            to,
            currency: currency.into(),
            revenue,
            expenses,
            gross_profit,
            net_profit: gross_profit,
        }
    }

    fn add_to_section(section: &mut BalanceSheetSection, balance: AccountBalance) {
        section.total += balance.natural_balance();
        section.accounts.push(balance);
    }

    fn add_to_pl_section(section: &mut ProfitAndLossSection, balance: AccountBalance) {
        section.total += balance.natural_balance();
        section.accounts.push(balance);
    }
}
