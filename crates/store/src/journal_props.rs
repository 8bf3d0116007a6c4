//! Property tests over full posting flows.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use ledgerkit_core::accounts::{AccountSpec, AccountType};
use ledgerkit_core::journal::{JournalLine, NewJournalEntry};
use ledgerkit_core::ledger::TransactionKind;
use ledgerkit_shared::types::ActorId;

use crate::store::Store;

const ACCOUNTS: [(&str, AccountType); 4] = [
    ("1000", AccountType::Asset),
    ("2000", AccountType::Liability),
    ("4000", AccountType::Revenue),
    ("6000", AccountType::Expense),
];

fn seeded_store() -> Store {
    let store = Store::default();
    for (code, account_type) in ACCOUNTS {
        store
            .create_account(AccountSpec::new(code, format!("Account {code}"), account_type))
            .unwrap();
    }
    store
}

/// A balanced entry: debits spread over random accounts, one credit for
/// the total.
fn balanced_entry() -> impl Strategy<Value = NewJournalEntry> {
    (
        prop::collection::vec((0usize..3, 1i64..=1_000_000), 1..5),
        0u32..28,
    )
        .prop_map(|(debits, day_offset)| {
            let total: i64 = debits.iter().map(|(_, cents)| cents).sum();
            let mut lines: Vec<JournalLine> = debits
                .into_iter()
                .map(|(idx, cents)| JournalLine::debit(ACCOUNTS[idx].0, Decimal::new(cents, 2)))
                .collect();
            lines.push(JournalLine::credit("4000", Decimal::new(total, 2)));
            NewJournalEntry {
                kind: TransactionKind::Journal,
                entry_date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.checked_add_days(chrono::Days::new(u64::from(day_offset))))
                    .unwrap(),
                description: "Generated".to_string(),
                scope: None,
                lines,
                created_by: ActorId::new(),
            }
        })
}

fn post(store: &Store, input: NewJournalEntry) -> String {
    let actor = input.created_by;
    let entry = store.create_entry(input).unwrap();
    let entry = store
        .submit_entry(&entry.entry_number, entry.version, actor)
        .unwrap();
    let entry = store
        .approve_entry(&entry.entry_number, entry.version, actor, None)
        .unwrap();
    store
        .post_entry(&entry.entry_number, entry.version, actor)
        .unwrap()
        .entry_number
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The trial balance identity holds after any sequence of posted
    /// entries.
    #[test]
    fn prop_trial_balance_identity(entries in prop::collection::vec(balanced_entry(), 1..6)) {
        let store = seeded_store();
        for input in entries {
            post(&store, input);
        }
        let as_of = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let report = store.trial_balance(as_of, None).unwrap();
        prop_assert!(report.totals.is_balanced);
    }

    /// Reversing a posted entry restores every account balance to its
    /// value before the entry was posted.
    #[test]
    fn prop_reversal_restores_balances(input in balanced_entry()) {
        let store = seeded_store();
        let actor = input.created_by;
        let as_of = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

        let before: Vec<Decimal> = ACCOUNTS
            .iter()
            .map(|(code, _)| store.account_balance(code, as_of).unwrap())
            .collect();

        let number = post(&store, input);
        let entry = store.get_entry(&number).unwrap();
        store
            .reverse_entry(
                &number,
                entry.version,
                NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                actor,
                "generated reversal",
            )
            .unwrap();

        let after: Vec<Decimal> = ACCOUNTS
            .iter()
            .map(|(code, _)| store.account_balance(code, as_of).unwrap())
            .collect();
        prop_assert_eq!(before, after);
    }
}
