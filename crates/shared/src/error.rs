//! Application-wide error taxonomy.
//!
//! Every component error maps into one of five categories. The category
//! decides how a caller should react: validation and invariant failures are
//! caller bugs or bad input, state errors carry the current state so the
//! caller can decide, concurrency errors are safe to retry after re-reading,
//! and storage errors propagate unchanged.

use serde::{Deserialize, Serialize};

/// Category of a component error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing/invalid fields, unknown account code. Rejected before any write.
    Validation,
    /// A broken business invariant (unbalanced entry, mutation of a confirmed
    /// line). Never retried automatically.
    Invariant,
    /// The operation is not legal in the entity's current state.
    State,
    /// Lost an optimistic concurrency race. Retry the whole operation.
    Concurrency,
    /// Underlying persistence failure. Nothing was committed.
    Storage,
}

impl ErrorCategory {
    /// Returns true if an operation failing with this category may be retried
    /// without re-reading anything but current state.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Concurrency | Self::Storage)
    }

    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Invariant => "invariant",
            Self::State => "state",
            Self::Concurrency => "concurrency",
            Self::Storage => "storage",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Implemented by every component error enum.
pub trait CategorizedError {
    /// Returns the stable error code for API responses and logs.
    fn error_code(&self) -> &'static str;

    /// Returns the taxonomy category for this error.
    fn category(&self) -> ErrorCategory;

    /// Returns true if this error is retryable.
    fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Concurrency.is_retryable());
        assert!(ErrorCategory::Storage.is_retryable());
        assert!(!ErrorCategory::Validation.is_retryable());
        assert!(!ErrorCategory::Invariant.is_retryable());
        assert!(!ErrorCategory::State.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::Invariant.to_string(), "invariant");
        assert_eq!(ErrorCategory::State.to_string(), "state");
        assert_eq!(ErrorCategory::Concurrency.to_string(), "concurrency");
        assert_eq!(ErrorCategory::Storage.to_string(), "storage");
    }
}
