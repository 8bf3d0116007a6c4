//! Direct expense posting.
//!
//! An expense payment is always the same two-line shape: debit the expense
//! account for the category, credit the settlement account for the payment
//! method. The builder validates the amount; balance validation happens in
//! the journal engine like any other entry.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerkit_shared::types::ActorId;

use crate::journal::{JournalError, JournalLine, NewJournalEntry};
use crate::ledger::{LedgerError, TransactionKind};

/// Settlement account for cash payments.
pub const CASH_ACCOUNT: &str = "1000";
/// Settlement account for bank payments.
pub const BANK_ACCOUNT: &str = "1100";

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid from the cash account.
    Cash,
    /// Paid from the bank account.
    Bank,
}

impl PaymentMethod {
    /// The account credited when an expense is settled with this method.
    #[must_use]
    pub const fn settlement_account(self) -> &'static str {
        match self {
            Self::Cash => CASH_ACCOUNT,
            Self::Bank => BANK_ACCOUNT,
        }
    }
}

/// A business expense to be posted directly.
#[derive(Debug, Clone)]
pub struct ExpenseEvent {
    /// The expense account for this category.
    pub expense_account: String,
    /// Expense amount (> 0).
    pub amount: Decimal,
    /// How the expense was paid.
    pub payment_method: PaymentMethod,
    /// Date of the expense.
    pub expense_date: NaiveDate,
    /// Expense description.
    pub description: String,
    /// Store/branch scope reference, if any.
    pub scope: Option<String>,
    /// The actor recording the expense.
    pub created_by: ActorId,
}

/// Builds the journal entry for an expense event.
///
/// # Errors
///
/// Returns `InvalidLine(NegativeAmount)` for a negative amount and
/// `InvalidLine(ZeroAmount)` for a zero amount.
pub fn build_expense_entry(event: ExpenseEvent) -> Result<NewJournalEntry, JournalError> {
    if event.amount < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount.into());
    }
    if event.amount.is_zero() {
        return Err(LedgerError::ZeroAmount.into());
    }

    let settlement = event.payment_method.settlement_account();
    Ok(NewJournalEntry {
        kind: TransactionKind::Expense,
        entry_date: event.expense_date,
        description: event.description.clone(),
        scope: event.scope,
        lines: vec![
            JournalLine::debit(event.expense_account, event.amount)
                .with_description(event.description),
            JournalLine::credit(settlement, event.amount),
        ],
        created_by: event.created_by,
    })
}
