//! Reversal entry construction.
//!
//! A reversal is a new journal entry with every line's debit and credit
//! swapped. It cancels the original's effect on balances; the original is
//! marked Reversed and its confirmed lines are retired.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use ledgerkit_shared::types::ActorId;

use super::types::{EntryStatus, EntryTotals, JournalEntry, JournalLine};

/// Builds the reversal entry for a posted original.
///
/// Lines are swapped debit-for-credit; the entry is created pre-approved
/// (the reversal flow posts it immediately) and linked back to the original
/// through `reversed_entry`. Reversal entries never chain, so `original` is
/// asserted not to be a reversal itself; the engine rejects that case before
/// this is reached.
#[must_use]
pub fn build_reversal(
    original: &JournalEntry,
    reversal_number: String,
    entry_date: NaiveDate,
    reversed_by: ActorId,
    reason: &str,
) -> JournalEntry {
    debug_assert!(!original.is_reversal, "reversals never chain");

    let lines: Vec<JournalLine> = original
        .lines
        .iter()
        .map(|line| JournalLine {
            account_code: line.account_code.clone(),
            description: Some(format!(
                "Reversal: {}",
                line.description.clone().unwrap_or_default()
            )),
            debit: line.credit,
            credit: line.debit,
            cost_center: line.cost_center.clone(),
        })
        .collect();

    let totals = EntryTotals::from_lines(&lines);
    let now = Utc::now();

    JournalEntry {
        entry_number: reversal_number,
        entry_date,
        kind: original.kind,
        description: format!(
            "Reversal of entry {}. Reason: {}",
            original.entry_number, reason
        ),
        scope: original.scope.clone(),
        lines,
        total_debit: totals.total_debit,
        total_credit: totals.total_credit,
        status: EntryStatus::Approved,
        created_by: reversed_by,
        created_at: now,
        approved_by: Some(reversed_by),
        approved_at: Some(now),
        approval_notes: None,
        posted_at: None,
        is_reversal: true,
        reversed_entry: Some(original.entry_number.clone()),
        reversed_by: None,
        version: 1,
    }
}

/// Returns true if a set of journal lines sums to zero when debits and
/// credits offset. Posted originals always satisfy this.
#[must_use]
pub fn is_balanced(lines: &[JournalLine]) -> bool {
    let net: Decimal = lines.iter().map(|l| l.debit - l.credit).sum();
    net.is_zero()
}
