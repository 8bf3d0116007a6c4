//! Withholding (TDS) record operations.
//!
//! Recording a withholding derives the record and posts its journal entry
//! in one atomic step; the record is stored as derived and never
//! recomputed.

use tracing::info;

use ledgerkit_core::journal::JournalEntry;
use ledgerkit_core::posting::{
    NewWithholding, WithholdingRecord, WithholdingStatus, build_withholding_entry,
};
use ledgerkit_shared::types::WithholdingId;

use crate::error::StoreError;
use crate::store::Store;

impl Store {
    /// Derives a withholding record and posts the TDS deduction entry
    /// (debit TDS expense, credit TDS payable) directly. Returns the
    /// record together with the posted entry.
    ///
    /// # Errors
    ///
    /// Returns a derivation error for bad input, or an account/validation
    /// error from posting. Nothing is stored on failure.
    pub fn record_withholding(
        &self,
        input: NewWithholding,
    ) -> Result<(WithholdingRecord, JournalEntry), StoreError> {
        let mut record = WithholdingRecord::derive(input)?;

        let mut inner = self.write()?;
        let entry = self.post_immediate_locked(&mut inner, build_withholding_entry(&record))?;
        record.reference = record.reference.or_else(|| Some(entry.entry_number.clone()));
        record.transition(WithholdingStatus::Deducted)?;
        info!(
            withholding_id = %record.id,
            section = %record.section,
            tds_amount = %record.tds_amount,
            "withholding recorded"
        );
        inner.withholdings.insert(record.id, record.clone());
        Ok((record, entry))
    }

    /// Fetches a withholding record by ID.
    ///
    /// # Errors
    ///
    /// Returns `WithholdingNotFound`.
    pub fn get_withholding(&self, id: WithholdingId) -> Result<WithholdingRecord, StoreError> {
        let inner = self.read()?;
        inner
            .withholdings
            .get(&id)
            .cloned()
            .ok_or(StoreError::WithholdingNotFound(id))
    }

    /// Lists withholding records, optionally restricted to one status, in
    /// creation order (IDs are time-ordered).
    pub fn list_withholdings(
        &self,
        status: Option<WithholdingStatus>,
    ) -> Result<Vec<WithholdingRecord>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .withholdings
            .values()
            .filter(|r| status.is_none_or(|s| r.status == s))
            .cloned()
            .collect())
    }

    /// Moves a withholding record to a new lifecycle status.
    ///
    /// # Errors
    ///
    /// Returns `WithholdingNotFound`, an invalid transition error, or
    /// `RecordLocked` once the tax has been deposited.
    pub fn transition_withholding(
        &self,
        id: WithholdingId,
        to: WithholdingStatus,
    ) -> Result<WithholdingRecord, StoreError> {
        let mut inner = self.write()?;
        let record = inner
            .withholdings
            .get_mut(&id)
            .ok_or(StoreError::WithholdingNotFound(id))?;
        record.transition(to)?;
        info!(withholding_id = %id, status = %record.status, "withholding status changed");
        Ok(record.clone())
    }
}
