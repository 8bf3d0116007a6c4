//! Core accounting logic for Ledgerkit.
//!
//! This crate contains pure business logic with ZERO storage dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts types and hierarchy rules
//! - `ledger` - Immutable double-entry ledger lines
//! - `journal` - Journal entries and the posting state machine
//! - `reports` - Trial balance, balance sheet, and profit & loss synthesis
//! - `posting` - Specialized posters for business events

pub mod accounts;
pub mod journal;
pub mod ledger;
pub mod posting;
pub mod reports;
