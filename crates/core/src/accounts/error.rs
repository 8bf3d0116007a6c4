//! Account registry error types.

use thiserror::Error;

use ledgerkit_shared::error::{CategorizedError, ErrorCategory};

/// Errors that can occur during account registry operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateAccountCode(String),

    /// Account code is empty.
    #[error("Account code cannot be empty")]
    EmptyCode,

    /// Account name is empty.
    #[error("Account name cannot be empty")]
    EmptyName,

    /// Opening balance cannot be negative.
    #[error("Opening balance cannot be negative")]
    NegativeOpeningBalance,

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(String),

    /// Account hierarchy depth limit exceeded.
    #[error("Account hierarchy depth limit of {max} exceeded")]
    MaxDepthExceeded {
        /// The configured maximum depth.
        max: u8,
    },

    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Account is inactive and cannot accept postings.
    #[error("Account '{0}' is inactive")]
    AccountInactive(String),

    /// Account type cannot be changed because it has ledger lines.
    #[error("Cannot change account type for '{0}': account has ledger lines")]
    AccountTypeChangeNotAllowed(String),
}

impl AccountError {
    /// Returns the error code for API responses and logs.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DuplicateAccountCode(_) => "DUPLICATE_ACCOUNT_CODE",
            Self::EmptyCode => "EMPTY_ACCOUNT_CODE",
            Self::EmptyName => "EMPTY_ACCOUNT_NAME",
            Self::NegativeOpeningBalance => "NEGATIVE_OPENING_BALANCE",
            Self::ParentNotFound(_) => "PARENT_ACCOUNT_NOT_FOUND",
            Self::MaxDepthExceeded { .. } => "MAX_ACCOUNT_DEPTH_EXCEEDED",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::AccountTypeChangeNotAllowed(_) => "ACCOUNT_TYPE_CHANGE_NOT_ALLOWED",
        }
    }
}

impl CategorizedError for AccountError {
    fn error_code(&self) -> &'static str {
        self.code()
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::AccountTypeChangeNotAllowed(_) => ErrorCategory::Invariant,
            _ => ErrorCategory::Validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            AccountError::DuplicateAccountCode("1000".into()).code(),
            "DUPLICATE_ACCOUNT_CODE"
        );
        assert_eq!(
            AccountError::AccountNotFound("9999".into()).code(),
            "ACCOUNT_NOT_FOUND"
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            AccountError::DuplicateAccountCode("1000".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            AccountError::AccountTypeChangeNotAllowed("1000".into()).category(),
            ErrorCategory::Invariant
        );
        assert!(!AccountError::EmptyCode.is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AccountError::DuplicateAccountCode("1000".into()).to_string(),
            "Account code '1000' already exists"
        );
        assert_eq!(
            AccountError::MaxDepthExceeded { max: 5 }.to_string(),
            "Account hierarchy depth limit of 5 exceeded"
        );
    }
}
