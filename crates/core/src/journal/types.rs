//! Journal entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ledgerkit_shared::types::ActorId;

use crate::ledger::TransactionKind;

/// Tolerance for the debit/credit balance comparison: one unit of the
/// smallest denomination.
pub static BALANCE_TOLERANCE: Lazy<Decimal> = Lazy::new(|| Decimal::new(1, 2));

/// Journal entry status in the posting workflow.
///
/// Valid transitions:
/// - Draft → PendingApproval (submit, approval required)
/// - Draft → Approved (submit, approval not required)
/// - PendingApproval → Approved (approve)
/// - Approved → Posted (post)
/// - Posted → Reversed (reverse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Entry is being drafted and can be modified.
    Draft,
    /// Entry has been submitted and awaits approval.
    PendingApproval,
    /// Entry has been approved and is ready for posting.
    Approved,
    /// Entry has been posted to the ledger (immutable).
    Posted,
    /// Entry has been reversed by an offsetting entry (immutable).
    Reversed,
}

impl EntryStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Posted => "posted",
            Self::Reversed => "reversed",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_approval" => Some(Self::PendingApproval),
            "approved" => Some(Self::Approved),
            "posted" => Some(Self::Posted),
            "reversed" => Some(Self::Reversed),
            _ => None,
        }
    }

    /// Returns true if the entry can be modified.
    #[must_use]
    pub const fn is_editable(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub const fn is_immutable(self) -> bool {
        matches!(self, Self::Posted | Self::Reversed)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single line within a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalLine {
    /// The account this line posts to.
    pub account_code: String,
    /// Optional description for this line.
    pub description: Option<String>,
    /// Debit amount (>= 0).
    pub debit: Decimal,
    /// Credit amount (>= 0).
    pub credit: Decimal,
    /// Optional cost center / department tag.
    pub cost_center: Option<String>,
}

impl JournalLine {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            description: None,
            debit: amount,
            credit: Decimal::ZERO,
            cost_center: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            description: None,
            debit: Decimal::ZERO,
            credit: amount,
            cost_center: None,
        }
    }

    /// Sets the line description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Computed debit/credit totals for a journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Sum of all debit amounts.
    pub total_debit: Decimal,
    /// Sum of all credit amounts.
    pub total_credit: Decimal,
    /// Whether the totals agree within [`BALANCE_TOLERANCE`].
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: (total_debit - total_credit).abs() <= *BALANCE_TOLERANCE,
        }
    }

    /// Recomputes totals from a set of journal lines.
    #[must_use]
    pub fn from_lines(lines: &[JournalLine]) -> Self {
        let total_debit: Decimal = lines.iter().map(|l| l.debit).sum();
        let total_credit: Decimal = lines.iter().map(|l| l.credit).sum();
        Self::new(total_debit, total_credit)
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}

/// Input for creating a new journal entry.
#[derive(Debug, Clone)]
pub struct NewJournalEntry {
    /// Business classification.
    pub kind: TransactionKind,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Store/branch scope reference, if any.
    pub scope: Option<String>,
    /// The journal lines.
    pub lines: Vec<JournalLine>,
    /// The actor creating the entry.
    pub created_by: ActorId,
}

/// A journal entry: a balanced group of lines with workflow state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique entry number.
    pub entry_number: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Business classification.
    pub kind: TransactionKind,
    /// Entry description.
    pub description: String,
    /// Store/branch scope reference, if any.
    pub scope: Option<String>,
    /// Ordered journal lines.
    pub lines: Vec<JournalLine>,
    /// Sum of debit amounts, recomputed on submit/approve.
    pub total_debit: Decimal,
    /// Sum of credit amounts, recomputed on submit/approve.
    pub total_credit: Decimal,
    /// Current workflow status.
    pub status: EntryStatus,
    /// The actor who created the entry.
    pub created_by: ActorId,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// The actor who approved the entry, if approved.
    pub approved_by: Option<ActorId>,
    /// When the entry was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// Optional approval notes.
    pub approval_notes: Option<String>,
    /// When the entry was posted.
    pub posted_at: Option<DateTime<Utc>>,
    /// True if this entry reverses another entry.
    pub is_reversal: bool,
    /// On a reversal entry: the number of the entry it reverses.
    pub reversed_entry: Option<String>,
    /// On a reversed original: the number of the reversal entry.
    pub reversed_by: Option<String>,
    /// Optimistic concurrency version, incremented on every mutation.
    pub version: i64,
}

impl JournalEntry {
    /// Builds a draft entry from input, with totals computed from the lines.
    #[must_use]
    pub fn draft(entry_number: String, input: NewJournalEntry) -> Self {
        let totals = EntryTotals::from_lines(&input.lines);
        Self {
            entry_number,
            entry_date: input.entry_date,
            kind: input.kind,
            description: input.description,
            scope: input.scope,
            lines: input.lines,
            total_debit: totals.total_debit,
            total_credit: totals.total_credit,
            status: EntryStatus::Draft,
            created_by: input.created_by,
            created_at: Utc::now(),
            approved_by: None,
            approved_at: None,
            approval_notes: None,
            posted_at: None,
            is_reversal: false,
            reversed_entry: None,
            reversed_by: None,
            version: 1,
        }
    }

    /// Recomputes totals from the current lines.
    #[must_use]
    pub fn totals(&self) -> EntryTotals {
        EntryTotals::from_lines(&self.lines)
    }

    /// Returns true if the entry can be posted.
    #[must_use]
    pub fn can_post(&self) -> bool {
        self.status == EntryStatus::Approved
    }

    /// Returns true if the entry can be reversed.
    #[must_use]
    pub fn can_reverse(&self) -> bool {
        self.status == EntryStatus::Posted && !self.is_reversal
    }
}
