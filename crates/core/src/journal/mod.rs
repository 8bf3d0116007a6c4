//! Journal entries and the posting state machine.
//!
//! A journal entry groups ledger lines that must balance, and moves through
//! Draft → PendingApproval → Approved → Posted → Reversed. Posting is the
//! only way ledger lines are materialized; reversal is the only legal
//! forward transition out of Posted.

pub mod audit;
pub mod engine;
pub mod error;
pub mod reversal;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use audit::{AuditRecord, AuditSink, InMemoryAuditSink, NoopAuditSink};
pub use engine::{JournalAction, JournalEngine};
pub use error::JournalError;
pub use reversal::build_reversal;
pub use types::{
    BALANCE_TOLERANCE, EntryStatus, EntryTotals, JournalEntry, JournalLine, NewJournalEntry,
};
