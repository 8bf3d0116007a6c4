//! Audit trail for journal workflow transitions.
//!
//! Every status transition is recorded with the actor who performed it.
//! The sink is a trait so callers can plug in whatever persistence they
//! need; the in-memory sink is used by the store and in tests.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ledgerkit_shared::types::ActorId;

use super::types::EntryStatus;

/// A single audit record: one workflow transition on one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The entry the transition applied to.
    pub entry_number: String,
    /// The actor who performed the transition.
    pub actor: ActorId,
    /// Status before the transition.
    pub from_status: EntryStatus,
    /// Status after the transition.
    pub to_status: EntryStatus,
    /// When the transition happened.
    pub at: DateTime<Utc>,
    /// Free-form note (approval notes, reversal reason).
    pub note: Option<String>,
}

impl AuditRecord {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(
        entry_number: impl Into<String>,
        actor: ActorId,
        from_status: EntryStatus,
        to_status: EntryStatus,
        note: Option<String>,
    ) -> Self {
        Self {
            entry_number: entry_number.into(),
            actor,
            from_status,
            to_status,
            at: Utc::now(),
            note,
        }
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    /// Records a workflow transition.
    fn record(&self, record: AuditRecord);
}

/// Sink that discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _record: AuditRecord) {}
}

/// Sink that appends records to an in-memory list.
#[derive(Debug, Default)]
pub struct InMemoryAuditSink {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all recorded transitions.
    #[must_use]
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Returns the transitions recorded for one entry, in order.
    #[must_use]
    pub fn records_for(&self, entry_number: &str) -> Vec<AuditRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.entry_number == entry_number)
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&self, record: AuditRecord) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_sink_records_in_order() {
        let sink = InMemoryAuditSink::new();
        let actor = ActorId::new();

        sink.record(AuditRecord::new(
            "JE-20240110-0001",
            actor,
            EntryStatus::Draft,
            EntryStatus::Approved,
            None,
        ));
        sink.record(AuditRecord::new(
            "JE-20240110-0001",
            actor,
            EntryStatus::Approved,
            EntryStatus::Posted,
            None,
        ));
        sink.record(AuditRecord::new(
            "JE-20240110-0002",
            actor,
            EntryStatus::Draft,
            EntryStatus::Approved,
            None,
        ));

        assert_eq!(sink.records().len(), 3);
        let trail = sink.records_for("JE-20240110-0001");
        assert_eq!(trail.len(), 2);
        assert_eq!(trail[0].to_status, EntryStatus::Approved);
        assert_eq!(trail[1].to_status, EntryStatus::Posted);
    }

    #[test]
    fn test_record_carries_note() {
        let record = AuditRecord::new(
            "JE-20240110-0001",
            ActorId::new(),
            EntryStatus::Posted,
            EntryStatus::Reversed,
            Some("Duplicate entry".to_string()),
        );
        assert_eq!(record.note.as_deref(), Some("Duplicate entry"));
    }

    #[test]
    fn test_noop_sink_discards() {
        let sink = NoopAuditSink;
        sink.record(AuditRecord::new(
            "JE-20240110-0001",
            ActorId::new(),
            EntryStatus::Draft,
            EntryStatus::Approved,
            None,
        ));
    }
}
