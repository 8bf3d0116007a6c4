//! Specialized posting builders.
//!
//! Pre-shaped journal entries for recurring business events: direct expense
//! payments and tax withholding (TDS) deductions. Builders produce a
//! [`NewJournalEntry`](crate::journal::NewJournalEntry); the store's fast
//! path posts them without the manual approval step.

pub mod expense;
pub mod withholding;

pub use expense::{ExpenseEvent, PaymentMethod, build_expense_entry};
pub use withholding::{
    NewWithholding, TDS_EXPENSE_ACCOUNT, TDS_PAYABLE_ACCOUNT, TdsSection, WithholdingError,
    WithholdingRecord, WithholdingStatus, build_withholding_entry, deposit_due_date,
    return_due_date,
};
