//! Shared types, errors, and configuration for Ledgerkit.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The error taxonomy shared by every component
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::LedgerConfig;
pub use error::{CategorizedError, ErrorCategory};
