//! The store handle and its shared state.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use ledgerkit_core::accounts::Account;
use ledgerkit_core::journal::{AuditSink, JournalEntry, NoopAuditSink};
use ledgerkit_core::ledger::LedgerLine;
use ledgerkit_core::posting::WithholdingRecord;
use ledgerkit_shared::config::LedgerConfig;
use ledgerkit_shared::types::WithholdingId;

use crate::error::StoreError;

/// All durable collections, guarded together.
///
/// One lock over everything keeps posting and reversal atomic across the
/// entry, line, and withholding collections; a partially applied posting
/// is never observable.
#[derive(Debug, Default)]
pub(crate) struct Inner {
    /// Chart of accounts, keyed by code.
    pub accounts: BTreeMap<String, Account>,
    /// Append-only ledger lines.
    pub lines: Vec<LedgerLine>,
    /// Journal entries, keyed by entry number.
    pub entries: BTreeMap<String, JournalEntry>,
    /// Monotonic per-date sequence for entry numbers.
    pub entry_seq: BTreeMap<NaiveDate, u32>,
    /// Withholding records, keyed by ID.
    pub withholdings: BTreeMap<WithholdingId, WithholdingRecord>,
}

impl Inner {
    /// Issues the next entry number for a date: `{prefix}-{YYYYMMDD}-{seq:04}`.
    pub fn next_entry_number(&mut self, prefix: &str, date: NaiveDate) -> String {
        let seq = self.entry_seq.entry(date).or_insert(0);
        *seq += 1;
        format!("{prefix}-{}-{seq:04}", date.format("%Y%m%d"))
    }
}

/// The in-memory accounting store.
pub struct Store {
    inner: RwLock<Inner>,
    config: LedgerConfig,
    audit: Arc<dyn AuditSink>,
}

impl Store {
    /// Creates an empty store with the given configuration and no audit
    /// sink.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_audit(config, Arc::new(NoopAuditSink))
    }

    /// Creates an empty store that reports workflow transitions to `audit`.
    #[must_use]
    pub fn with_audit(config: LedgerConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            config,
            audit,
        }
    }

    /// The store's configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub(crate) fn audit(&self) -> &dyn AuditSink {
        self.audit.as_ref()
    }

    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner.read().map_err(|_| StoreError::LockPoisoned)
    }

    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner.write().map_err(|_| StoreError::LockPoisoned)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
