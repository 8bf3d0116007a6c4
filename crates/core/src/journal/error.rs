//! Journal engine error types.
//!
//! State errors carry the entry's current status so the caller can decide
//! what to do; concurrency errors are safe to retry after re-reading.

use rust_decimal::Decimal;
use thiserror::Error;

use ledgerkit_shared::error::{CategorizedError, ErrorCategory};

use super::types::EntryStatus;
use crate::ledger::LedgerError;

/// Errors that can occur during journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    /// Entry must have at least 2 lines.
    #[error("Journal entry must have at least 2 lines")]
    InsufficientLines,

    /// Entry is not balanced beyond tolerance.
    #[error("Journal entry is not balanced. Debit: {debit}, Credit: {credit}")]
    UnbalancedEntry {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    /// A line within the entry is invalid.
    #[error(transparent)]
    InvalidLine(#[from] LedgerError),

    /// Entry is not in the Approved state.
    #[error("Journal entry cannot be posted from status '{current}'")]
    NotApproved {
        /// The entry's current status.
        current: EntryStatus,
    },

    /// Entry is not in the Posted state.
    #[error("Journal entry cannot be reversed from status '{current}'")]
    NotPosted {
        /// The entry's current status.
        current: EntryStatus,
    },

    /// Entry has already been reversed.
    #[error("Journal entry {0} has already been reversed")]
    AlreadyReversed(String),

    /// Reversal entries cannot themselves be reversed.
    #[error("Journal entry {0} is a reversal and cannot be reversed")]
    CannotReverseReversal(String),

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: EntryStatus,
        /// The attempted target status.
        to: EntryStatus,
    },

    /// A reversal reason is required.
    #[error("Reversal reason is required")]
    ReasonRequired,

    /// Entry not found.
    #[error("Journal entry not found: {0}")]
    EntryNotFound(String),

    /// Lost an optimistic concurrency race on the entry.
    #[error("Concurrent modification of entry {entry_number}: expected version {expected}, found {actual}")]
    ConcurrentModification {
        /// The entry number.
        entry_number: String,
        /// The version the caller read.
        expected: i64,
        /// The version currently stored.
        actual: i64,
    },
}

impl JournalError {
    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientLines => "INSUFFICIENT_LINES",
            Self::UnbalancedEntry { .. } => "UNBALANCED_ENTRY",
            Self::InvalidLine(_) => "INVALID_LINE",
            Self::NotApproved { .. } => "NOT_APPROVED",
            Self::NotPosted { .. } => "NOT_POSTED",
            Self::AlreadyReversed(_) => "ALREADY_REVERSED",
            Self::CannotReverseReversal(_) => "CANNOT_REVERSE_REVERSAL",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::ReasonRequired => "REASON_REQUIRED",
            Self::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
        }
    }
}

impl CategorizedError for JournalError {
    fn error_code(&self) -> &'static str {
        self.code()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::UnbalancedEntry { .. } => ErrorCategory::Invariant,
            Self::InvalidLine(e) => e.category(),
            Self::NotApproved { .. }
            | Self::NotPosted { .. }
            | Self::AlreadyReversed(_)
            | Self::CannotReverseReversal(_)
            | Self::InvalidTransition { .. } => ErrorCategory::State,
            Self::ConcurrentModification { .. } => ErrorCategory::Concurrency,
            Self::InsufficientLines | Self::ReasonRequired | Self::EntryNotFound(_) => {
                ErrorCategory::Validation
            }
        }
    }
}
