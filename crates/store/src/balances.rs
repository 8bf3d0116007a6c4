//! Balance derivation and report generation.
//!
//! Balances are derived, never stored: signed opening term plus the sum of
//! confirmed line amounts in range. All reads happen under one read-lock
//! snapshot, so a report never observes a partially posted entry.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use ledgerkit_core::accounts::{Account, AccountError, BalanceSide};
use ledgerkit_core::ledger::LedgerLine;
use ledgerkit_core::reports::{
    AccountBalance, BalanceSheetReport, ProfitAndLossReport, ReportService, TrialBalanceReport,
};

use crate::error::StoreError;
use crate::store::{Inner, Store};

/// Signed balance of one account: opening (debit positive) plus confirmed
/// activity dated at or before `as_of` (all activity when `None`).
pub(crate) fn signed_balance(inner: &Inner, account: &Account, as_of: Option<NaiveDate>) -> Decimal {
    let activity: Decimal = inner
        .lines
        .iter()
        .filter(|l| {
            l.account_code == account.code
                && l.status.counts_in_balance()
                && as_of.is_none_or(|d| l.transaction_date <= d)
        })
        .map(LedgerLine::signed_amount)
        .sum();
    account.signed_opening_balance() + activity
}

impl Store {
    /// Signed balance of an account as of a date: debit-positive opening
    /// plus confirmed lines dated at or before `as_of`. Lines dated later
    /// never affect the result.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn account_balance(&self, code: &str, as_of: NaiveDate) -> Result<Decimal, StoreError> {
        let inner = self.read()?;
        let account = inner
            .accounts
            .get(code)
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()))?;
        Ok(signed_balance(&inner, account, Some(as_of)))
    }

    /// Balance of an account as a magnitude on its normal side:
    /// credit-normal accounts report credit minus debit.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn natural_balance(&self, code: &str, as_of: NaiveDate) -> Result<Decimal, StoreError> {
        let inner = self.read()?;
        let account = inner
            .accounts
            .get(code)
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()))?;
        let signed = signed_balance(&inner, account, Some(as_of));
        Ok(match account.account_type.normal_side() {
            BalanceSide::Debit => signed,
            BalanceSide::Credit => -signed,
        })
    }

    /// Trial balance over active accounts with nonzero balances.
    ///
    /// With a scope, only activity from journal entries in that scope is
    /// counted and opening balances are excluded (scoped views are
    /// activity-only).
    pub fn trial_balance(
        &self,
        as_of: NaiveDate,
        scope: Option<&str>,
    ) -> Result<TrialBalanceReport, StoreError> {
        let inner = self.read()?;
        let mut balances = Self::gather(&inner, Some(as_of), None, scope);
        balances.retain(|b| !b.balance.is_zero());
        Ok(ReportService::trial_balance(
            as_of,
            self.config().currency.clone(),
            balances,
        ))
    }

    /// Balance sheet as of a date.
    pub fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, StoreError> {
        let inner = self.read()?;
        let mut balances = Self::gather(&inner, Some(as_of), None, None);
        balances.retain(|b| !b.balance.is_zero());
        Ok(ReportService::balance_sheet(
            as_of,
            self.config().currency.clone(),
            balances,
        ))
    }

    /// Profit and loss over the half-open period `[from, to)`. Period
    /// activity only; opening balances are excluded.
    pub fn profit_and_loss(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ProfitAndLossReport, StoreError> {
        let inner = self.read()?;
        let balances = Self::gather_period(&inner, from, to);
        Ok(ReportService::profit_and_loss(
            from,
            to,
            self.config().currency.clone(),
            balances,
        ))
    }

    /// Gathers point-in-time balances for active accounts, dropping zero
    /// rows.
    fn gather(
        inner: &Inner,
        as_of: Option<NaiveDate>,
        from: Option<NaiveDate>,
        scope: Option<&str>,
    ) -> Vec<AccountBalance> {
        let scoped_refs: Option<BTreeSet<&str>> = scope.map(|s| {
            inner
                .entries
                .values()
                .filter(|e| e.scope.as_deref() == Some(s))
                .map(|e| e.entry_number.as_str())
                .collect()
        });
        let include_opening = scoped_refs.is_none() && from.is_none();

        inner
            .accounts
            .values()
            .filter(|a| a.is_active)
            .filter_map(|account| {
                let (mut total_debit, mut total_credit) = if include_opening {
                    match account.opening_side {
                        BalanceSide::Debit => (account.opening_balance, Decimal::ZERO),
                        BalanceSide::Credit => (Decimal::ZERO, account.opening_balance),
                    }
                } else {
                    (Decimal::ZERO, Decimal::ZERO)
                };

                for line in &inner.lines {
                    if line.account_code != account.code || !line.status.counts_in_balance() {
                        continue;
                    }
                    if as_of.is_some_and(|d| line.transaction_date > d) {
                        continue;
                    }
                    if from.is_some_and(|d| line.transaction_date < d) {
                        continue;
                    }
                    if let Some(refs) = &scoped_refs {
                        let in_scope = line
                            .reference_number
                            .as_deref()
                            .is_some_and(|r| refs.contains(r));
                        if !in_scope {
                            continue;
                        }
                    }
                    total_debit += line.debit;
                    total_credit += line.credit;
                }

                let balance = total_debit - total_credit;
                if balance.is_zero() && total_debit.is_zero() && total_credit.is_zero() {
                    return None;
                }
                Some(AccountBalance {
                    code: account.code.clone(),
                    name: account.name.clone(),
                    account_type: account.account_type,
                    subtype: account.subtype.clone(),
                    total_debit,
                    total_credit,
                    balance,
                })
            })
            .collect()
    }

    /// Gathers activity-only balances over `[from, to)`.
    fn gather_period(inner: &Inner, from: NaiveDate, to: NaiveDate) -> Vec<AccountBalance> {
        // Half-open: reuse the inclusive gatherer with `to - 1 day` as the
        // upper bound.
        let upper = to.pred_opt();
        Self::gather(inner, upper, Some(from), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerkit_core::accounts::{AccountSpec, AccountType};
    use ledgerkit_core::journal::{JournalLine, NewJournalEntry};
    use ledgerkit_core::ledger::TransactionKind;
    use ledgerkit_shared::types::ActorId;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> Store {
        let store = Store::default();
        store
            .create_account(AccountSpec::new("1000", "Cash", AccountType::Asset))
            .unwrap();
        store
            .create_account(AccountSpec::new("4000", "Sales", AccountType::Revenue))
            .unwrap();
        store
    }

    fn post_sale(store: &Store, amount: rust_decimal::Decimal, on: NaiveDate) {
        let actor = ActorId::new();
        let entry = store
            .create_entry(NewJournalEntry {
                kind: TransactionKind::Sale,
                entry_date: on,
                description: "Sale".to_string(),
                scope: Some("store-1".to_string()),
                lines: vec![
                    JournalLine::debit("1000", amount),
                    JournalLine::credit("4000", amount),
                ],
                created_by: actor,
            })
            .unwrap();
        let entry = store
            .submit_entry(&entry.entry_number, entry.version, actor)
            .unwrap();
        let entry = store
            .approve_entry(&entry.entry_number, entry.version, actor, None)
            .unwrap();
        store
            .post_entry(&entry.entry_number, entry.version, actor)
            .unwrap();
    }

    #[test]
    fn test_signed_and_natural_balance() {
        let store = store();
        post_sale(&store, dec!(1000), date(2024, 1, 10));

        let as_of = date(2024, 1, 31);
        assert_eq!(store.account_balance("1000", as_of).unwrap(), dec!(1000));
        assert_eq!(store.account_balance("4000", as_of).unwrap(), dec!(-1000));
        // Natural side flips credit-normal accounts positive.
        assert_eq!(store.natural_balance("4000", as_of).unwrap(), dec!(1000));
    }

    #[test]
    fn test_balance_ignores_later_lines() {
        let store = store();
        post_sale(&store, dec!(1000), date(2024, 1, 10));
        let before = store.account_balance("1000", date(2024, 1, 31)).unwrap();

        post_sale(&store, dec!(500), date(2024, 2, 15));
        let after = store.account_balance("1000", date(2024, 1, 31)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_opening_balance_included() {
        let store = Store::default();
        store
            .create_account(
                AccountSpec::new("1000", "Cash", AccountType::Asset)
                    .with_opening_balance(dec!(250), BalanceSide::Debit),
            )
            .unwrap();
        assert_eq!(
            store.account_balance("1000", date(2024, 1, 1)).unwrap(),
            dec!(250)
        );
    }

    #[test]
    fn test_trial_balance_identity() {
        let store = store();
        post_sale(&store, dec!(1000), date(2024, 1, 10));
        post_sale(&store, dec!(250), date(2024, 1, 12));

        let report = store.trial_balance(date(2024, 1, 31), None).unwrap();
        assert!(report.totals.is_balanced);
        assert_eq!(report.totals.total_debit, dec!(1250));
        assert_eq!(report.totals.total_credit, dec!(1250));
    }

    #[test]
    fn test_trial_balance_scope_filter() {
        let store = store();
        post_sale(&store, dec!(1000), date(2024, 1, 10));

        let scoped = store
            .trial_balance(date(2024, 1, 31), Some("store-1"))
            .unwrap();
        assert_eq!(scoped.totals.total_debit, dec!(1000));

        let other = store
            .trial_balance(date(2024, 1, 31), Some("store-2"))
            .unwrap();
        assert!(other.rows.is_empty());
    }

    #[test]
    fn test_profit_and_loss_half_open_period() {
        let store = store();
        post_sale(&store, dec!(1000), date(2024, 1, 10));
        post_sale(&store, dec!(500), date(2024, 2, 1));

        // [Jan 1, Feb 1) excludes the Feb 1 sale.
        let report = store
            .profit_and_loss(date(2024, 1, 1), date(2024, 2, 1))
            .unwrap();
        assert_eq!(report.revenue.total, dec!(1000));
        assert_eq!(report.gross_profit, dec!(1000));
        assert_eq!(report.net_profit, report.gross_profit);
    }
}
