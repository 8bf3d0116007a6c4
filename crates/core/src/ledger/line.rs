//! Ledger line domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerkit_shared::types::{CounterpartyId, LedgerLineId};

/// Business classification of a ledger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Customer sale.
    Sale,
    /// Vendor purchase.
    Purchase,
    /// Operating expense.
    Expense,
    /// Outgoing payment.
    Payment,
    /// Incoming receipt.
    Receipt,
    /// Transfer between accounts.
    Transfer,
    /// Adjustment entry.
    Adjustment,
    /// General journal entry.
    Journal,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Purchase => "purchase",
            Self::Expense => "expense",
            Self::Payment => "payment",
            Self::Receipt => "receipt",
            Self::Transfer => "transfer",
            Self::Adjustment => "adjustment",
            Self::Journal => "journal",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ledger line status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    /// Written but not yet confirmed.
    Pending,
    /// Confirmed and counted in balances. Amounts are immutable.
    Confirmed,
    /// Explicitly voided; both amounts are zero.
    Cancelled,
    /// Offset by a reversal journal entry; no longer counted in balances.
    Reversed,
}

impl LineStatus {
    /// Returns true if a line in this status contributes to balances.
    #[must_use]
    pub const fn counts_in_balance(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// A single immutable debit or credit posting against one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerLine {
    /// Unique identifier, generated when not supplied by the caller.
    pub id: LedgerLineId,
    /// Business date of the underlying transaction.
    pub transaction_date: NaiveDate,
    /// Business classification.
    pub kind: TransactionKind,
    /// The account this line posts to.
    pub account_code: String,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Line status.
    pub status: LineStatus,
    /// Optional customer/vendor linkage.
    pub counterparty: Option<CounterpartyId>,
    /// Journal entry number that materialized this line, if any.
    pub reference_number: Option<String>,
    /// Optional description.
    pub description: Option<String>,
    /// When the line was written.
    pub created_at: DateTime<Utc>,
}

impl LedgerLine {
    /// Returns the signed amount (debit positive, credit negative).
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.debit - self.credit
    }

    /// Returns true if this is an explicit void line (both sides zero).
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.debit.is_zero() && self.credit.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_line(debit: Decimal, credit: Decimal) -> LedgerLine {
        LedgerLine {
            id: LedgerLineId::new(),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            kind: TransactionKind::Journal,
            account_code: "1000".to_string(),
            debit,
            credit,
            status: LineStatus::Confirmed,
            counterparty: None,
            reference_number: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_signed_amount() {
        assert_eq!(make_line(dec!(100), dec!(0)).signed_amount(), dec!(100));
        assert_eq!(make_line(dec!(0), dec!(100)).signed_amount(), dec!(-100));
    }

    #[test]
    fn test_is_void() {
        assert!(make_line(dec!(0), dec!(0)).is_void());
        assert!(!make_line(dec!(1), dec!(0)).is_void());
    }

    #[test]
    fn test_only_confirmed_counts_in_balance() {
        assert!(LineStatus::Confirmed.counts_in_balance());
        assert!(!LineStatus::Pending.counts_in_balance());
        assert!(!LineStatus::Cancelled.counts_in_balance());
        assert!(!LineStatus::Reversed.counts_in_balance());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TransactionKind::Sale.to_string(), "sale");
        assert_eq!(TransactionKind::Journal.to_string(), "journal");
    }
}
