//! Immutable double-entry ledger lines.
//!
//! A ledger line is one atomic debit or credit against a single account.
//! Lines are append-only: once confirmed, amounts never change, and
//! corrections happen through new offsetting lines.

pub mod error;
pub mod line;
pub mod validation;

pub use error::LedgerError;
pub use line::{LedgerLine, LineStatus, TransactionKind};
pub use validation::validate_line;
