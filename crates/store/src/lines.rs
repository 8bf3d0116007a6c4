//! Ledger line append and query operations.
//!
//! Lines are append-only: no update-in-place API exists. The journal
//! service is the only caller on posting paths; direct appends exist for
//! migrations and opening adjustments.

use tracing::info;

use ledgerkit_core::accounts::AccountError;
use ledgerkit_core::ledger::{LedgerError, LedgerLine, validate_line};
use ledgerkit_shared::types::LedgerLineId;

use crate::error::StoreError;
use crate::query::LineFilter;
use crate::store::{Inner, Store};

impl Store {
    /// Appends a single validated line.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`/`AccountInactive`, a line validation
    /// error, or `DuplicateLineId`.
    pub fn append_line(&self, line: LedgerLine) -> Result<LedgerLineId, StoreError> {
        let mut inner = self.write()?;
        Self::check_line(&inner, &line)?;
        let id = line.id;
        inner.lines.push(line);
        info!(line_id = %id, "ledger line appended");
        Ok(id)
    }

    /// Appends a batch of lines atomically: every line is validated before
    /// any is written, so either all land or none do.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure; the collection is untouched
    /// on error.
    pub fn append_lines(&self, lines: Vec<LedgerLine>) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        Self::check_batch(&inner, &lines)?;
        let count = lines.len();
        inner.lines.extend(lines);
        info!(count, "ledger line batch appended");
        Ok(())
    }

    /// Queries lines, ordered by transaction date ascending with ties
    /// broken by ID, so balance computation is deterministic.
    pub fn query_lines(&self, filter: &LineFilter) -> Result<Vec<LedgerLine>, StoreError> {
        let inner = self.read()?;
        let mut result: Vec<LedgerLine> = inner
            .lines
            .iter()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();
        result.sort_by(|a, b| {
            a.transaction_date
                .cmp(&b.transaction_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(result)
    }

    pub(crate) fn check_batch(inner: &Inner, lines: &[LedgerLine]) -> Result<(), StoreError> {
        for line in lines {
            Self::check_line(inner, line)?;
        }
        for (i, line) in lines.iter().enumerate() {
            if lines[..i].iter().any(|other| other.id == line.id) {
                return Err(LedgerError::DuplicateLineId(line.id.to_string()).into());
            }
        }
        Ok(())
    }

    fn check_line(inner: &Inner, line: &LedgerLine) -> Result<(), StoreError> {
        let account = inner
            .accounts
            .get(&line.account_code)
            .ok_or_else(|| AccountError::AccountNotFound(line.account_code.clone()))?;
        if !account.is_active {
            return Err(AccountError::AccountInactive(line.account_code.clone()).into());
        }
        validate_line(line)?;
        if inner.lines.iter().any(|l| l.id == line.id) {
            return Err(LedgerError::DuplicateLineId(line.id.to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use ledgerkit_core::accounts::{AccountSpec, AccountType};
    use ledgerkit_core::ledger::{LineStatus, TransactionKind};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn store_with_cash() -> Store {
        let store = Store::default();
        store
            .create_account(AccountSpec::new("1000", "Cash", AccountType::Asset))
            .unwrap();
        store
    }

    fn debit_line(account: &str, amount: Decimal, date: NaiveDate) -> LedgerLine {
        LedgerLine {
            id: LedgerLineId::new(),
            transaction_date: date,
            kind: TransactionKind::Sale,
            account_code: account.to_string(),
            debit: amount,
            credit: Decimal::ZERO,
            status: LineStatus::Confirmed,
            counterparty: None,
            reference_number: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_append_and_query() {
        let store = store_with_cash();
        store
            .append_line(debit_line("1000", dec!(100), date(2024, 1, 10)))
            .unwrap();

        let lines = store
            .query_lines(&LineFilter::new().account("1000"))
            .unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].debit, dec!(100));
    }

    #[test]
    fn test_unknown_account_rejected() {
        let store = store_with_cash();
        assert!(matches!(
            store.append_line(debit_line("9999", dec!(100), date(2024, 1, 10))),
            Err(StoreError::Account(AccountError::AccountNotFound(_)))
        ));
    }

    #[test]
    fn test_inactive_account_rejected() {
        let store = store_with_cash();
        store.deactivate_account("1000").unwrap();
        assert!(matches!(
            store.append_line(debit_line("1000", dec!(100), date(2024, 1, 10))),
            Err(StoreError::Account(AccountError::AccountInactive(_)))
        ));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let store = store_with_cash();
        let line = debit_line("1000", dec!(100), date(2024, 1, 10));
        let duplicate = line.clone();
        store.append_line(line).unwrap();
        assert!(matches!(
            store.append_line(duplicate),
            Err(StoreError::Ledger(LedgerError::DuplicateLineId(_)))
        ));
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let store = store_with_cash();
        let good = debit_line("1000", dec!(100), date(2024, 1, 10));
        let bad = debit_line("9999", dec!(100), date(2024, 1, 10));

        assert!(store.append_lines(vec![good, bad]).is_err());
        let lines = store.query_lines(&LineFilter::new()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn test_query_ordered_by_date() {
        let store = store_with_cash();
        store
            .append_lines(vec![
                debit_line("1000", dec!(2), date(2024, 1, 20)),
                debit_line("1000", dec!(1), date(2024, 1, 10)),
                debit_line("1000", dec!(3), date(2024, 1, 30)),
            ])
            .unwrap();

        let lines = store.query_lines(&LineFilter::new()).unwrap();
        let amounts: Vec<Decimal> = lines.iter().map(|l| l.debit).collect();
        assert_eq!(amounts, vec![dec!(1), dec!(2), dec!(3)]);
    }
}
