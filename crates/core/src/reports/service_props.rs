//! Property tests for report synthesis.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::accounts::AccountType;

use super::service::ReportService;
use super::types::AccountBalance;

fn cents(range: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|c| Decimal::new(c, 2))
}

/// Balance sets that sum to zero, as any fully posted double-entry ledger
/// does: N signed balances plus one balancing remainder.
fn zero_sum_balances() -> impl Strategy<Value = Vec<AccountBalance>> {
    prop::collection::vec(cents(-5_000_000..=5_000_000), 1..12).prop_map(|amounts| {
        let remainder: Decimal = -amounts.iter().sum::<Decimal>();
        let mut all = amounts;
        all.push(remainder);
        all.into_iter()
            .enumerate()
            .map(|(i, signed)| AccountBalance {
                code: format!("{:04}", 1000 + i),
                name: format!("Account {i}"),
                account_type: AccountType::Asset,
                subtype: None,
                total_debit: Decimal::ZERO,
                total_credit: Decimal::ZERO,
                balance: signed,
            })
            .collect()
    })
}

proptest! {
    /// The trial balance identity holds for any zero-sum balance set:
    /// the debit and credit columns always agree.
    #[test]
    fn prop_trial_balance_identity(balances in zero_sum_balances()) {
        let as_of = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let report = ReportService::trial_balance(as_of, "USD", balances);
        prop_assert!(report.totals.is_balanced);
        prop_assert_eq!(report.totals.total_debit, report.totals.total_credit);
    }

    /// Every balance appears in exactly one column, with its magnitude
    /// preserved.
    #[test]
    fn prop_trial_balance_rows_single_column(balances in zero_sum_balances()) {
        let as_of = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let expected: Decimal = balances.iter().map(|b| b.balance.abs()).sum();
        let report = ReportService::trial_balance(as_of, "USD", balances);

        for row in &report.rows {
            prop_assert!(row.debit >= Decimal::ZERO);
            prop_assert!(row.credit >= Decimal::ZERO);
            prop_assert!(row.debit.is_zero() || row.credit.is_zero());
        }
        let column_sum: Decimal = report.rows.iter().map(|r| r.debit + r.credit).sum();
        prop_assert_eq!(column_sum, expected);
    }
}
