//! Tax withholding (TDS) records and posting.
//!
//! A withholding record is derived once, at creation: the TDS amount, net
//! payable, and both statutory due dates are computed from the gross amount
//! and payment date and never recomputed. A changed gross means a new
//! record; once the tax is deposited the record is locked.

use chrono::{Datelike, DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ledgerkit_shared::error::{CategorizedError, ErrorCategory};
use ledgerkit_shared::types::{ActorId, CounterpartyId, WithholdingId};

use crate::journal::{JournalLine, NewJournalEntry};
use crate::ledger::TransactionKind;

/// Account debited for the withheld tax.
pub const TDS_EXPENSE_ACCOUNT: &str = "6500";
/// Account credited with the liability until deposit.
pub const TDS_PAYABLE_ACCOUNT: &str = "2300";

/// TDS section under which tax is withheld.
///
/// Each section carries a statutory default rate; callers may override it
/// per record where a lower-deduction certificate applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TdsSection {
    /// 194A - interest other than on securities.
    S194A,
    /// 194C - payments to contractors.
    S194C,
    /// 194H - commission or brokerage.
    S194H,
    /// 194I - rent.
    S194I,
    /// 194J - professional or technical fees.
    S194J,
}

impl TdsSection {
    /// Returns the statutory default rate in percent.
    #[must_use]
    pub fn default_rate(self) -> Decimal {
        match self {
            Self::S194C => Decimal::new(2, 0),
            Self::S194H => Decimal::new(5, 0),
            Self::S194A | Self::S194I | Self::S194J => Decimal::new(10, 0),
        }
    }

    /// Returns the section code as printed on returns.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S194A => "194A",
            Self::S194C => "194C",
            Self::S194H => "194H",
            Self::S194I => "194I",
            Self::S194J => "194J",
        }
    }
}

impl std::fmt::Display for TdsSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a withholding record.
///
/// Valid transitions:
/// - Pending → Deducted | Cancelled
/// - Deducted → Deposited | Cancelled
/// - Deposited → ReturnFiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithholdingStatus {
    /// Record created, tax not yet deducted from the payment.
    Pending,
    /// Tax deducted and posted to the payable account.
    Deducted,
    /// Tax deposited with the authority. The record is locked.
    Deposited,
    /// Quarterly return filed covering this record.
    ReturnFiled,
    /// Record cancelled before deposit.
    Cancelled,
}

impl WithholdingStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Deducted => "deducted",
            Self::Deposited => "deposited",
            Self::ReturnFiled => "return_filed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WithholdingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from withholding derivation and lifecycle changes.
#[derive(Debug, Error)]
pub enum WithholdingError {
    /// Gross amount must be positive.
    #[error("Withholding gross amount must be positive")]
    NonPositiveGross,

    /// Rate must lie in [0, 100].
    #[error("Withholding rate {0} is outside 0-100")]
    InvalidRate(Decimal),

    /// Attempted an invalid status transition.
    #[error("Invalid withholding transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: WithholdingStatus,
        /// The attempted target status.
        to: WithholdingStatus,
    },

    /// The record is locked after deposit.
    #[error("Withholding record {0} is locked after deposit")]
    RecordLocked(WithholdingId),
}

impl WithholdingError {
    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveGross => "NON_POSITIVE_GROSS",
            Self::InvalidRate(_) => "INVALID_RATE",
            Self::InvalidTransition { .. } => "INVALID_WITHHOLDING_TRANSITION",
            Self::RecordLocked(_) => "WITHHOLDING_RECORD_LOCKED",
        }
    }
}

impl CategorizedError for WithholdingError {
    fn error_code(&self) -> &'static str {
        self.code()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::NonPositiveGross | Self::InvalidRate(_) => ErrorCategory::Validation,
            Self::InvalidTransition { .. } => ErrorCategory::State,
            Self::RecordLocked(_) => ErrorCategory::Invariant,
        }
    }
}

/// Input for deriving a withholding record.
#[derive(Debug, Clone)]
pub struct NewWithholding {
    /// The payee the tax is withheld from, if tracked.
    pub counterparty: Option<CounterpartyId>,
    /// Gross payment amount before withholding.
    pub gross_amount: Decimal,
    /// Applicable TDS section.
    pub section: TdsSection,
    /// Override rate in percent; the section default applies when absent.
    pub rate: Option<Decimal>,
    /// Date of the underlying payment.
    pub payment_date: NaiveDate,
    /// External reference (invoice or voucher number).
    pub reference: Option<String>,
    /// The actor recording the withholding.
    pub created_by: ActorId,
}

/// A derived withholding record. Amounts and due dates are fixed at
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithholdingRecord {
    /// Record ID.
    pub id: WithholdingId,
    /// The payee the tax is withheld from, if tracked.
    pub counterparty: Option<CounterpartyId>,
    /// Gross payment amount before withholding.
    pub gross_amount: Decimal,
    /// Applicable TDS section.
    pub section: TdsSection,
    /// Applied rate in percent.
    pub rate: Decimal,
    /// Withheld tax: gross x rate / 100.
    pub tds_amount: Decimal,
    /// Amount payable to the payee: gross minus tax.
    pub net_amount: Decimal,
    /// Date of the underlying payment.
    pub payment_date: NaiveDate,
    /// Statutory deposit deadline: 7th of the month after payment.
    pub deposit_due_date: NaiveDate,
    /// Statutory return deadline: last day of the month after the fiscal
    /// quarter containing the payment.
    pub return_due_date: NaiveDate,
    /// Current lifecycle status.
    pub status: WithholdingStatus,
    /// External reference (invoice or voucher number).
    pub reference: Option<String>,
    /// The actor who recorded the withholding.
    pub created_by: ActorId,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl WithholdingRecord {
    /// Derives a record from input.
    ///
    /// # Errors
    ///
    /// Returns `NonPositiveGross` for a gross amount of zero or less, or
    /// `InvalidRate` for a rate outside [0, 100].
    pub fn derive(input: NewWithholding) -> Result<Self, WithholdingError> {
        if input.gross_amount <= Decimal::ZERO {
            return Err(WithholdingError::NonPositiveGross);
        }
        let rate = input.rate.unwrap_or_else(|| input.section.default_rate());
        if rate < Decimal::ZERO || rate > Decimal::new(100, 0) {
            return Err(WithholdingError::InvalidRate(rate));
        }

        let tds_amount = input.gross_amount * rate / Decimal::new(100, 0);
        Ok(Self {
            id: WithholdingId::new(),
            counterparty: input.counterparty,
            gross_amount: input.gross_amount,
            section: input.section,
            rate,
            tds_amount,
            net_amount: input.gross_amount - tds_amount,
            payment_date: input.payment_date,
            deposit_due_date: deposit_due_date(input.payment_date),
            return_due_date: return_due_date(input.payment_date),
            status: WithholdingStatus::Pending,
            reference: input.reference,
            created_by: input.created_by,
            created_at: Utc::now(),
        })
    }

    /// Returns true once the record can no longer be cancelled or changed.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(
            self.status,
            WithholdingStatus::Deposited | WithholdingStatus::ReturnFiled
        )
    }

    /// Moves the record to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `RecordLocked` when cancelling a deposited record, or
    /// `InvalidTransition` for any other illegal move.
    pub fn transition(&mut self, to: WithholdingStatus) -> Result<(), WithholdingError> {
        if self.is_locked() && to == WithholdingStatus::Cancelled {
            return Err(WithholdingError::RecordLocked(self.id));
        }
        let allowed = matches!(
            (self.status, to),
            (
                WithholdingStatus::Pending,
                WithholdingStatus::Deducted | WithholdingStatus::Cancelled
            ) | (
                WithholdingStatus::Deducted,
                WithholdingStatus::Deposited | WithholdingStatus::Cancelled
            ) | (WithholdingStatus::Deposited, WithholdingStatus::ReturnFiled)
        );
        if !allowed {
            return Err(WithholdingError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

/// The deposit deadline for tax withheld on `payment_date`: the 7th of the
/// following month.
#[must_use]
pub fn deposit_due_date(payment_date: NaiveDate) -> NaiveDate {
    let (year, month) = month_after(payment_date.year(), payment_date.month());
    NaiveDate::from_ymd_opt(year, month, 7).unwrap_or(payment_date)
}

/// The quarterly return deadline for tax withheld on `payment_date`: the
/// last day of the month after the fiscal quarter containing the payment.
/// Fiscal quarters end in June, September, December, and March.
#[must_use]
pub fn return_due_date(payment_date: NaiveDate) -> NaiveDate {
    let quarter_end_month = match payment_date.month() {
        4..=6 => 6,
        7..=9 => 9,
        10..=12 => 12,
        _ => 3,
    };
    let (year, month) = month_after(payment_date.year(), quarter_end_month);
    last_day_of_month(year, month).unwrap_or(payment_date)
}

fn month_after(year: i32, month: u32) -> (i32, u32) {
    if month == 12 { (year + 1, 1) } else { (year, month + 1) }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = month_after(year, month);
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.checked_sub_days(Days::new(1))
}

/// Builds the journal entry that posts a withholding deduction: debit the
/// TDS expense account, credit the TDS payable account for the withheld
/// amount.
#[must_use]
pub fn build_withholding_entry(record: &WithholdingRecord) -> NewJournalEntry {
    let description = format!(
        "TDS u/s {} on gross {}",
        record.section, record.gross_amount
    );
    NewJournalEntry {
        kind: TransactionKind::Payment,
        entry_date: record.payment_date,
        description: description.clone(),
        scope: None,
        lines: vec![
            JournalLine::debit(TDS_EXPENSE_ACCOUNT, record.tds_amount)
                .with_description(description),
            JournalLine::credit(TDS_PAYABLE_ACCOUNT, record.tds_amount),
        ],
        created_by: record.created_by,
    }
}
