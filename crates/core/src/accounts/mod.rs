//! Chart of accounts domain types and hierarchy rules.

pub mod error;
pub mod types;

pub use error::AccountError;
pub use types::{
    Account, AccountSpec, AccountType, BalanceSide, MAX_ACCOUNT_DEPTH, validate_spec,
};
