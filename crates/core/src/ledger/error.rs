//! Ledger error types.

use thiserror::Error;

use ledgerkit_shared::error::{CategorizedError, ErrorCategory};

/// Errors that can occur when appending or validating ledger lines.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Line amount cannot be negative.
    #[error("Ledger line amounts cannot be negative")]
    NegativeAmount,

    /// Line must specify either debit or credit.
    #[error("Ledger line must have exactly one nonzero side")]
    ZeroAmount,

    /// Line cannot carry both a debit and a credit amount.
    #[error("Ledger line cannot carry both a debit and a credit amount")]
    BothSidesNonzero,

    /// Attempted to mutate a confirmed line.
    #[error("Confirmed ledger line {0} is immutable")]
    ConfirmedLineImmutable(String),

    /// Duplicate line identifier supplied by the caller.
    #[error("Ledger line id {0} already exists")]
    DuplicateLineId(String),
}

impl LedgerError {
    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NegativeAmount => "NEGATIVE_AMOUNT",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::BothSidesNonzero => "BOTH_SIDES_NONZERO",
            Self::ConfirmedLineImmutable(_) => "CONFIRMED_LINE_IMMUTABLE",
            Self::DuplicateLineId(_) => "DUPLICATE_LINE_ID",
        }
    }
}

impl CategorizedError for LedgerError {
    fn error_code(&self) -> &'static str {
        self.code()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfirmedLineImmutable(_) => ErrorCategory::Invariant,
            _ => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::NegativeAmount.code(), "NEGATIVE_AMOUNT");
        assert_eq!(
            LedgerError::ConfirmedLineImmutable("x".into()).code(),
            "CONFIRMED_LINE_IMMUTABLE"
        );
    }

    #[test]
    fn test_confirmed_line_mutation_is_invariant_violation() {
        let err = LedgerError::ConfirmedLineImmutable("x".into());
        assert_eq!(err.category(), ErrorCategory::Invariant);
        assert!(!err.is_retryable());
    }
}
