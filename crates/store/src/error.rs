//! The unified store error.

use thiserror::Error;

use ledgerkit_core::accounts::AccountError;
use ledgerkit_core::journal::JournalError;
use ledgerkit_core::ledger::LedgerError;
use ledgerkit_core::posting::WithholdingError;
use ledgerkit_shared::error::{CategorizedError, ErrorCategory};
use ledgerkit_shared::types::WithholdingId;

/// Errors surfaced by store operations.
///
/// Domain errors pass through unchanged so callers keep their codes and
/// categories; only storage-level failures originate here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Chart-of-accounts error.
    #[error(transparent)]
    Account(#[from] AccountError),

    /// Ledger line error.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Journal entry error.
    #[error(transparent)]
    Journal(#[from] JournalError),

    /// Withholding record error.
    #[error(transparent)]
    Withholding(#[from] WithholdingError),

    /// Withholding record not found.
    #[error("Withholding record not found: {0}")]
    WithholdingNotFound(WithholdingId),

    /// A thread panicked while holding the store lock.
    #[error("Store lock poisoned")]
    LockPoisoned,
}

impl CategorizedError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Account(e) => e.code(),
            Self::Ledger(e) => e.code(),
            Self::Journal(e) => e.code(),
            Self::Withholding(e) => e.code(),
            Self::WithholdingNotFound(_) => "WITHHOLDING_NOT_FOUND",
            Self::LockPoisoned => "LOCK_POISONED",
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Account(e) => e.category(),
            Self::Ledger(e) => e.category(),
            Self::Journal(e) => e.category(),
            Self::Withholding(e) => e.category(),
            Self::WithholdingNotFound(_) => ErrorCategory::Validation,
            Self::LockPoisoned => ErrorCategory::Storage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_pass_through() {
        let err = StoreError::from(AccountError::DuplicateAccountCode("1000".to_string()));
        assert_eq!(err.error_code(), "DUPLICATE_ACCOUNT_CODE");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_lock_poisoned_is_retryable_storage() {
        let err = StoreError::LockPoisoned;
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_concurrency_errors_stay_retryable() {
        let err = StoreError::from(JournalError::ConcurrentModification {
            entry_number: "JE-20240110-0001".to_string(),
            expected: 1,
            actual: 2,
        });
        assert_eq!(err.category(), ErrorCategory::Concurrency);
        assert!(err.is_retryable());
    }
}
