//! Property tests for the journal engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use ledgerkit_shared::types::ActorId;

use super::engine::{JournalAction, JournalEngine};
use super::types::{EntryStatus, JournalEntry, JournalLine, NewJournalEntry};
use crate::ledger::{LineStatus, TransactionKind};

/// Cent amounts in a range that keeps Decimal sums exact.
fn cents() -> impl Strategy<Value = Decimal> {
    (1i64..=10_000_000).prop_map(|c| Decimal::new(c, 2))
}

/// Generates a balanced line set: N debit lines plus one credit line for
/// the debit total.
fn balanced_lines() -> impl Strategy<Value = Vec<JournalLine>> {
    prop::collection::vec(cents(), 1..8).prop_map(|amounts| {
        let total: Decimal = amounts.iter().sum();
        let mut lines: Vec<JournalLine> = amounts
            .into_iter()
            .enumerate()
            .map(|(i, amount)| JournalLine::debit(format!("5{i:03}"), amount))
            .collect();
        lines.push(JournalLine::credit("1000", total));
        lines
    })
}

fn approved_entry(lines: Vec<JournalLine>) -> JournalEntry {
    let mut entry = JournalEntry::draft(
        "JE-20240110-0001".to_string(),
        NewJournalEntry {
            kind: TransactionKind::Journal,
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            description: "Generated entry".to_string(),
            scope: None,
            lines,
            created_by: ActorId::new(),
        },
    );
    entry.status = EntryStatus::Approved;
    entry
}

proptest! {
    /// Balanced-by-construction line sets always validate.
    #[test]
    fn prop_balanced_lines_validate(lines in balanced_lines()) {
        let totals = JournalEngine::validate_lines(&lines).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.total_debit, totals.total_credit);
    }

    /// Posting materializes confirmed lines whose debit and credit sums
    /// match the entry's totals exactly.
    #[test]
    fn prop_materialized_lines_balance(lines in balanced_lines()) {
        let entry = approved_entry(lines);
        let action = JournalEngine::post(&entry, ActorId::new()).unwrap();
        let JournalAction::Post { lines, .. } = action else {
            panic!("expected post action");
        };

        prop_assert!(lines.iter().all(|l| l.status == LineStatus::Confirmed));
        prop_assert!(lines.iter().all(|l| l.debit.is_zero() != l.credit.is_zero()));

        let debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let credit: Decimal = lines.iter().map(|l| l.credit).sum();
        prop_assert_eq!(debit, entry.total_debit);
        prop_assert_eq!(credit, entry.total_credit);
    }

    /// Shifting any single line's debit by a nonzero delta breaks the
    /// balance check (beyond the one-cent tolerance).
    #[test]
    fn prop_perturbed_lines_rejected(lines in balanced_lines(), delta in 2i64..=1000) {
        let mut lines = lines;
        lines[0].debit += Decimal::new(delta, 2);
        prop_assert!(JournalEngine::validate_lines(&lines).is_err());
    }
}
