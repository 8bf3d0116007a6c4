//! Ledger line query filters.

use chrono::NaiveDate;

use ledgerkit_core::ledger::{LedgerLine, LineStatus, TransactionKind};

/// Filter for [`Store::query_lines`](crate::Store::query_lines).
///
/// All criteria are conjunctive; an empty filter matches every line.
#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    /// Restrict to one account.
    pub account_code: Option<String>,
    /// Restrict to one transaction kind.
    pub kind: Option<TransactionKind>,
    /// Restrict to one line status.
    pub status: Option<LineStatus>,
    /// Restrict to lines tagged with a reference number.
    pub reference_number: Option<String>,
    /// Earliest transaction date (inclusive).
    pub from: Option<NaiveDate>,
    /// Latest transaction date (inclusive).
    pub to: Option<NaiveDate>,
}

impl LineFilter {
    /// An empty filter matching all lines.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one account.
    #[must_use]
    pub fn account(mut self, code: impl Into<String>) -> Self {
        self.account_code = Some(code.into());
        self
    }

    /// Restricts the filter to one transaction kind.
    #[must_use]
    pub const fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts the filter to one line status.
    #[must_use]
    pub const fn status(mut self, status: LineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to lines referencing a journal entry number.
    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference_number = Some(reference.into());
        self
    }

    /// Restricts the filter to an inclusive date range.
    #[must_use]
    pub const fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Returns true if the line satisfies every criterion.
    #[must_use]
    pub fn matches(&self, line: &LedgerLine) -> bool {
        if let Some(code) = &self.account_code {
            if &line.account_code != code {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if line.kind != kind {
                return false;
            }
        }
        if let Some(status) = self.status {
            if line.status != status {
                return false;
            }
        }
        if let Some(reference) = &self.reference_number {
            if line.reference_number.as_deref() != Some(reference.as_str()) {
                return false;
            }
        }
        if let Some(from) = self.from {
            if line.transaction_date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if line.transaction_date > to {
                return false;
            }
        }
        true
    }
}
