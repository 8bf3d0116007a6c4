//! Journal entry orchestration: create, submit, approve, post, reverse.
//!
//! The state machine itself lives in `ledgerkit-core`; this layer applies
//! the validated actions to the collections under one write lock, checks
//! entry versions for optimistic concurrency, and emits audit records.

use chrono::{NaiveDate, Utc};
use tracing::info;

use ledgerkit_core::accounts::AccountError;
use ledgerkit_core::journal::{
    AuditRecord, EntryStatus, JournalAction, JournalEngine, JournalEntry, JournalError,
    JournalLine, NewJournalEntry, build_reversal,
};
use ledgerkit_core::ledger::LineStatus;
use ledgerkit_core::posting::{ExpenseEvent, build_expense_entry};
use ledgerkit_shared::types::ActorId;

use crate::error::StoreError;
use crate::store::Store;

impl Store {
    /// Creates a draft journal entry and assigns its entry number.
    ///
    /// Drafts may be unbalanced; balance is enforced on every transition
    /// out of Draft. Account codes must exist and be active.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`/`AccountInactive` for an unknown or
    /// deactivated account code.
    pub fn create_entry(&self, input: NewJournalEntry) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        for line in &input.lines {
            let account = inner
                .accounts
                .get(&line.account_code)
                .ok_or_else(|| AccountError::AccountNotFound(line.account_code.clone()))?;
            if !account.is_active {
                return Err(AccountError::AccountInactive(line.account_code.clone()).into());
            }
        }

        let number =
            inner.next_entry_number(&self.config().numbering.entry_prefix, input.entry_date);
        let entry = JournalEntry::draft(number, input);
        info!(entry_number = %entry.entry_number, "journal entry drafted");
        inner.entries.insert(entry.entry_number.clone(), entry.clone());
        Ok(entry)
    }

    /// Fetches a journal entry by number.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`.
    pub fn get_entry(&self, entry_number: &str) -> Result<JournalEntry, StoreError> {
        let inner = self.read()?;
        inner
            .entries
            .get(entry_number)
            .cloned()
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()).into())
    }

    /// Lists all journal entries in entry-number order.
    pub fn list_entries(&self) -> Result<Vec<JournalEntry>, StoreError> {
        Ok(self.read()?.entries.values().cloned().collect())
    }

    /// Replaces the lines and description of a draft entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ConcurrentModification`, or
    /// `InvalidTransition` when the entry is no longer a draft.
    pub fn update_draft(
        &self,
        entry_number: &str,
        expected_version: i64,
        lines: Vec<JournalLine>,
        description: Option<String>,
    ) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        let entry = inner
            .entries
            .get_mut(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        Self::check_version(entry, expected_version)?;
        if !entry.status.is_editable() {
            return Err(JournalError::InvalidTransition {
                from: entry.status,
                to: EntryStatus::Draft,
            }
            .into());
        }

        entry.lines = lines;
        if let Some(description) = description {
            entry.description = description;
        }
        let totals = entry.totals();
        entry.total_debit = totals.total_debit;
        entry.total_credit = totals.total_credit;
        entry.version += 1;
        Ok(entry.clone())
    }

    /// Submits a draft entry for approval, or straight to Approved when
    /// approval is not required by configuration.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ConcurrentModification`, a validation
    /// error, or `InvalidTransition`.
    pub fn submit_entry(
        &self,
        entry_number: &str,
        expected_version: i64,
        actor: ActorId,
    ) -> Result<JournalEntry, StoreError> {
        let approval_required = self.config().approval.required;
        let mut inner = self.write()?;
        let entry = inner
            .entries
            .get_mut(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        Self::check_version(entry, expected_version)?;

        let from_status = entry.status;
        let action = JournalEngine::submit(entry, approval_required, actor)?;
        if let JournalAction::Submit {
            new_status,
            submitted_by,
            submitted_at,
            totals,
        } = action
        {
            entry.status = new_status;
            entry.total_debit = totals.total_debit;
            entry.total_credit = totals.total_credit;
            if new_status == EntryStatus::Approved {
                entry.approved_by = Some(submitted_by);
                entry.approved_at = Some(submitted_at);
            }
            entry.version += 1;
            info!(entry_number = %entry.entry_number, status = %entry.status, "journal entry submitted");
            self.audit().record(AuditRecord::new(
                entry.entry_number.clone(),
                actor,
                from_status,
                new_status,
                None,
            ));
        }
        Ok(entry.clone())
    }

    /// Approves a pending entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ConcurrentModification`, a validation
    /// error, or `InvalidTransition`.
    pub fn approve_entry(
        &self,
        entry_number: &str,
        expected_version: i64,
        actor: ActorId,
        notes: Option<String>,
    ) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        let entry = inner
            .entries
            .get_mut(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        Self::check_version(entry, expected_version)?;

        let from_status = entry.status;
        let action = JournalEngine::approve(entry, actor, notes.clone())?;
        if let JournalAction::Approve {
            new_status,
            approved_by,
            approved_at,
            approval_notes,
            totals,
        } = action
        {
            entry.status = new_status;
            entry.approved_by = Some(approved_by);
            entry.approved_at = Some(approved_at);
            entry.approval_notes = approval_notes;
            entry.total_debit = totals.total_debit;
            entry.total_credit = totals.total_credit;
            entry.version += 1;
            info!(entry_number = %entry.entry_number, "journal entry approved");
            self.audit().record(AuditRecord::new(
                entry.entry_number.clone(),
                actor,
                from_status,
                new_status,
                notes,
            ));
        }
        Ok(entry.clone())
    }

    /// Posts an approved entry: materializes its ledger lines and flips
    /// the status, atomically.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ConcurrentModification`, `NotApproved`,
    /// or a line validation error. On error nothing is written.
    pub fn post_entry(
        &self,
        entry_number: &str,
        expected_version: i64,
        actor: ActorId,
    ) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        let entry = inner
            .entries
            .get(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        Self::check_version(entry, expected_version)?;

        let from_status = entry.status;
        let action = JournalEngine::post(entry, actor)?;
        let JournalAction::Post {
            new_status,
            posted_at,
            lines,
            ..
        } = action
        else {
            return Ok(entry.clone());
        };

        Self::check_batch(&inner, &lines)?;
        inner.lines.extend(lines);
        let entry = inner
            .entries
            .get_mut(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        entry.status = new_status;
        entry.posted_at = Some(posted_at);
        entry.version += 1;
        info!(entry_number = %entry.entry_number, total_debit = %entry.total_debit, "journal entry posted");
        self.audit().record(AuditRecord::new(
            entry.entry_number.clone(),
            actor,
            from_status,
            new_status,
            None,
        ));
        Ok(entry.clone())
    }

    /// Reverses a posted entry.
    ///
    /// Builds and posts an offsetting entry with debits and credits
    /// swapped, flips the original to Reversed, and retires the original's
    /// confirmed lines, all in one atomic unit. Returns the reversal entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryNotFound`, `ConcurrentModification`,
    /// `ReasonRequired`, `NotPosted`, `AlreadyReversed`, or
    /// `CannotReverseReversal`.
    pub fn reverse_entry(
        &self,
        entry_number: &str,
        expected_version: i64,
        reversal_date: NaiveDate,
        actor: ActorId,
        reason: &str,
    ) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        let original = inner
            .entries
            .get(entry_number)
            .cloned()
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        Self::check_version(&original, expected_version)?;
        JournalEngine::reverse(&original, actor, reason)?;

        let reversal_number =
            inner.next_entry_number(&self.config().numbering.entry_prefix, reversal_date);
        let mut reversal = build_reversal(
            &original,
            reversal_number.clone(),
            reversal_date,
            actor,
            reason,
        );

        // Reversal lines land already retired: balances sum confirmed
        // lines only, so retiring both sides nets the account back to its
        // pre-posting value.
        let mut reversal_lines = JournalEngine::materialize_lines(&reversal);
        for line in &mut reversal_lines {
            line.status = LineStatus::Reversed;
        }
        Self::check_batch(&inner, &reversal_lines)?;

        for line in inner.lines.iter_mut() {
            if line.reference_number.as_deref() == Some(entry_number)
                && line.status == LineStatus::Confirmed
            {
                line.status = LineStatus::Reversed;
            }
        }
        inner.lines.extend(reversal_lines);

        let now = Utc::now();
        reversal.status = EntryStatus::Posted;
        reversal.posted_at = Some(now);
        inner
            .entries
            .insert(reversal.entry_number.clone(), reversal.clone());

        let original = inner
            .entries
            .get_mut(entry_number)
            .ok_or_else(|| JournalError::EntryNotFound(entry_number.to_string()))?;
        original.status = EntryStatus::Reversed;
        original.reversed_by = Some(reversal_number.clone());
        original.version += 1;

        info!(
            entry_number = %entry_number,
            reversal_number = %reversal_number,
            "journal entry reversed"
        );
        self.audit().record(AuditRecord::new(
            entry_number.to_string(),
            actor,
            EntryStatus::Posted,
            EntryStatus::Reversed,
            Some(reason.to_string()),
        ));
        self.audit().record(AuditRecord::new(
            reversal_number,
            actor,
            EntryStatus::Approved,
            EntryStatus::Posted,
            None,
        ));
        Ok(reversal)
    }

    /// Posts an expense event directly: the entry is created pre-approved
    /// and posted in one step, bypassing the manual approval queue.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad amount or unknown account.
    pub fn post_expense(&self, event: ExpenseEvent) -> Result<JournalEntry, StoreError> {
        let input = build_expense_entry(event)?;
        self.post_immediate(input)
    }

    /// Creates, approves, and posts an entry in one write-lock critical
    /// section. Fast path shared by the specialized posters.
    pub(crate) fn post_immediate(
        &self,
        input: NewJournalEntry,
    ) -> Result<JournalEntry, StoreError> {
        let mut inner = self.write()?;
        self.post_immediate_locked(&mut inner, input)
    }

    /// Fast-path body for callers that already hold the write lock.
    pub(crate) fn post_immediate_locked(
        &self,
        inner: &mut crate::store::Inner,
        input: NewJournalEntry,
    ) -> Result<JournalEntry, StoreError> {
        JournalEngine::validate_lines(&input.lines)?;

        let number =
            inner.next_entry_number(&self.config().numbering.entry_prefix, input.entry_date);
        let mut entry = JournalEntry::draft(number, input);
        let actor = entry.created_by;
        let now = Utc::now();
        entry.status = EntryStatus::Approved;
        entry.approved_by = Some(actor);
        entry.approved_at = Some(now);

        let action = JournalEngine::post(&entry, actor)?;
        let JournalAction::Post {
            new_status,
            posted_at,
            lines,
            ..
        } = action
        else {
            return Ok(entry);
        };

        Self::check_batch(&inner, &lines)?;
        inner.lines.extend(lines);
        entry.status = new_status;
        entry.posted_at = Some(posted_at);
        entry.version += 1;
        info!(entry_number = %entry.entry_number, "journal entry posted directly");
        inner.entries.insert(entry.entry_number.clone(), entry.clone());

        self.audit().record(AuditRecord::new(
            entry.entry_number.clone(),
            actor,
            EntryStatus::Draft,
            EntryStatus::Approved,
            None,
        ));
        self.audit().record(AuditRecord::new(
            entry.entry_number.clone(),
            actor,
            EntryStatus::Approved,
            EntryStatus::Posted,
            None,
        ));
        Ok(entry)
    }

    fn check_version(entry: &JournalEntry, expected: i64) -> Result<(), JournalError> {
        if entry.version != expected {
            return Err(JournalError::ConcurrentModification {
                entry_number: entry.entry_number.clone(),
                expected,
                actual: entry.version,
            });
        }
        Ok(())
    }
}
