//! In-memory durable-collection layer for Ledgerkit.
//!
//! [`Store`] owns the `accounts`, `ledger_lines`, `journal_entries`, and
//! `withholding_records` collections behind a single `RwLock`, so every
//! multi-collection mutation (posting, reversal) is atomic and every read
//! sees a consistent snapshot. The domain rules themselves live in
//! `ledgerkit-core`; this crate orchestrates them against state.
//!
//! # Modules
//!
//! - `store` - the store handle and shared state
//! - `query` - ledger line query filters
//! - `error` - the unified store error

pub mod error;
pub mod query;
pub mod store;

mod accounts;
mod balances;
mod journal;
mod lines;
mod withholding;

#[cfg(test)]
mod journal_props;

pub use accounts::AccountUpdate;
pub use error::StoreError;
pub use query::LineFilter;
pub use store::Store;
