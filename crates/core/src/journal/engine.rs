//! The journal posting state machine.
//!
//! `JournalEngine` is a stateless service: it validates transitions and
//! returns the resulting [`JournalAction`] with audit trail data. Applying
//! the action to storage is the store layer's job, so every multi-step
//! mutation can happen inside one atomic unit of work.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use ledgerkit_shared::types::ActorId;

use super::error::JournalError;
use super::types::{EntryStatus, EntryTotals, JournalEntry, JournalLine};
use crate::ledger::{LedgerError, LedgerLine, LineStatus};
use ledgerkit_shared::types::LedgerLineId;

/// A validated state transition with audit trail information.
#[derive(Debug, Clone)]
pub enum JournalAction {
    /// Submit a draft entry.
    Submit {
        /// The new status (PendingApproval, or Approved when no approval
        /// step is configured).
        new_status: EntryStatus,
        /// The actor who submitted the entry.
        submitted_by: ActorId,
        /// When the entry was submitted.
        submitted_at: DateTime<Utc>,
        /// Recomputed totals.
        totals: EntryTotals,
    },
    /// Approve a pending entry.
    Approve {
        /// The new status after approval.
        new_status: EntryStatus,
        /// The actor who approved the entry.
        approved_by: ActorId,
        /// When the entry was approved.
        approved_at: DateTime<Utc>,
        /// Optional notes from the approver.
        approval_notes: Option<String>,
        /// Recomputed totals.
        totals: EntryTotals,
    },
    /// Post an approved entry to the ledger.
    Post {
        /// The new status after posting.
        new_status: EntryStatus,
        /// The actor who posted the entry.
        posted_by: ActorId,
        /// When the entry was posted.
        posted_at: DateTime<Utc>,
        /// The ledger lines to materialize.
        lines: Vec<LedgerLine>,
    },
    /// Reverse a posted entry.
    Reverse {
        /// The new status of the original entry.
        new_status: EntryStatus,
        /// The actor who reversed the entry.
        reversed_by: ActorId,
        /// When the entry was reversed.
        reversed_at: DateTime<Utc>,
    },
}

impl JournalAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> EntryStatus {
        match self {
            Self::Submit { new_status, .. }
            | Self::Approve { new_status, .. }
            | Self::Post { new_status, .. }
            | Self::Reverse { new_status, .. } => *new_status,
        }
    }
}

/// Stateless service implementing the journal entry state machine.
pub struct JournalEngine;

impl JournalEngine {
    /// Validates the lines of a journal entry.
    ///
    /// Rules: at least 2 lines, each line carries exactly one nonzero
    /// non-negative side, and totals balance within tolerance.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientLines`, a line-level error, or
    /// `UnbalancedEntry`.
    pub fn validate_lines(lines: &[JournalLine]) -> Result<EntryTotals, JournalError> {
        if lines.len() < 2 {
            return Err(JournalError::InsufficientLines);
        }

        for line in lines {
            if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
                return Err(LedgerError::NegativeAmount.into());
            }
            if !line.debit.is_zero() && !line.credit.is_zero() {
                return Err(LedgerError::BothSidesNonzero.into());
            }
            if line.debit.is_zero() && line.credit.is_zero() {
                return Err(LedgerError::ZeroAmount.into());
            }
        }

        let totals = EntryTotals::from_lines(lines);
        if !totals.is_balanced {
            return Err(JournalError::UnbalancedEntry {
                debit: totals.total_debit,
                credit: totals.total_credit,
            });
        }

        Ok(totals)
    }

    /// Submit a draft entry.
    ///
    /// Recomputes totals from the lines; when `approval_required` is false
    /// the entry moves straight to Approved with the submitter recorded as
    /// approver.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the entry is Draft, or a
    /// validation error from [`Self::validate_lines`].
    pub fn submit(
        entry: &JournalEntry,
        approval_required: bool,
        submitted_by: ActorId,
    ) -> Result<JournalAction, JournalError> {
        if entry.status != EntryStatus::Draft {
            return Err(JournalError::InvalidTransition {
                from: entry.status,
                to: EntryStatus::PendingApproval,
            });
        }

        let totals = Self::validate_lines(&entry.lines)?;
        let new_status = if approval_required {
            EntryStatus::PendingApproval
        } else {
            EntryStatus::Approved
        };

        Ok(JournalAction::Submit {
            new_status,
            submitted_by,
            submitted_at: Utc::now(),
            totals,
        })
    }

    /// Approve a pending entry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` unless the entry is PendingApproval, or
    /// a validation error from [`Self::validate_lines`].
    pub fn approve(
        entry: &JournalEntry,
        approved_by: ActorId,
        approval_notes: Option<String>,
    ) -> Result<JournalAction, JournalError> {
        if entry.status != EntryStatus::PendingApproval {
            return Err(JournalError::InvalidTransition {
                from: entry.status,
                to: EntryStatus::Approved,
            });
        }

        let totals = Self::validate_lines(&entry.lines)?;

        Ok(JournalAction::Approve {
            new_status: EntryStatus::Approved,
            approved_by,
            approved_at: Utc::now(),
            approval_notes,
            totals,
        })
    }

    /// Post an approved entry, producing the ledger lines to materialize.
    ///
    /// One confirmed line is produced per nonzero side of every journal
    /// line, all tagged with the entry number as `reference_number`.
    ///
    /// # Errors
    ///
    /// Returns `NotApproved` with the current status unless the entry is
    /// Approved.
    pub fn post(entry: &JournalEntry, posted_by: ActorId) -> Result<JournalAction, JournalError> {
        if entry.status != EntryStatus::Approved {
            return Err(JournalError::NotApproved {
                current: entry.status,
            });
        }

        Ok(JournalAction::Post {
            new_status: EntryStatus::Posted,
            posted_by,
            posted_at: Utc::now(),
            lines: Self::materialize_lines(entry),
        })
    }

    /// Validate that a posted entry can be reversed.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyReversed`, `CannotReverseReversal`, `ReasonRequired`,
    /// or `NotPosted` with the current status.
    pub fn reverse(
        entry: &JournalEntry,
        reversed_by: ActorId,
        reason: &str,
    ) -> Result<JournalAction, JournalError> {
        if reason.trim().is_empty() {
            return Err(JournalError::ReasonRequired);
        }
        if entry.status == EntryStatus::Reversed {
            return Err(JournalError::AlreadyReversed(entry.entry_number.clone()));
        }
        if entry.is_reversal {
            return Err(JournalError::CannotReverseReversal(
                entry.entry_number.clone(),
            ));
        }
        if entry.status != EntryStatus::Posted {
            return Err(JournalError::NotPosted {
                current: entry.status,
            });
        }

        Ok(JournalAction::Reverse {
            new_status: EntryStatus::Reversed,
            reversed_by,
            reversed_at: Utc::now(),
        })
    }

    /// Builds the ledger lines a posted entry materializes.
    #[must_use]
    pub fn materialize_lines(entry: &JournalEntry) -> Vec<LedgerLine> {
        let mut lines = Vec::with_capacity(entry.lines.len());
        for journal_line in &entry.lines {
            if journal_line.debit > Decimal::ZERO {
                lines.push(Self::ledger_line(entry, journal_line, journal_line.debit, true));
            }
            if journal_line.credit > Decimal::ZERO {
                lines.push(Self::ledger_line(entry, journal_line, journal_line.credit, false));
            }
        }
        lines
    }

    fn ledger_line(
        entry: &JournalEntry,
        journal_line: &JournalLine,
        amount: Decimal,
        is_debit: bool,
    ) -> LedgerLine {
        LedgerLine {
            id: LedgerLineId::new(),
            transaction_date: entry.entry_date,
            kind: entry.kind,
            account_code: journal_line.account_code.clone(),
            debit: if is_debit { amount } else { Decimal::ZERO },
            credit: if is_debit { Decimal::ZERO } else { amount },
            status: LineStatus::Confirmed,
            counterparty: None,
            reference_number: Some(entry.entry_number.clone()),
            description: journal_line
                .description
                .clone()
                .or_else(|| Some(entry.description.clone())),
            created_at: Utc::now(),
        }
    }

    /// Check if a status transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: EntryStatus, to: EntryStatus) -> bool {
        matches!(
            (from, to),
            (
                EntryStatus::Draft,
                EntryStatus::PendingApproval | EntryStatus::Approved
            ) | (EntryStatus::PendingApproval, EntryStatus::Approved)
                | (EntryStatus::Approved, EntryStatus::Posted)
                | (EntryStatus::Posted, EntryStatus::Reversed)
        )
    }
}
