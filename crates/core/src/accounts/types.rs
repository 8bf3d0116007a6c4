//! Account domain types.
//!
//! Accounts form a tree (the chart of accounts) keyed by a unique code.
//! The account type is a closed enumeration so report synthesis is
//! exhaustively checked at compile time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::AccountError;

/// Maximum depth of the account hierarchy.
pub const MAX_ACCOUNT_DEPTH: u8 = 5;

/// Account type classification.
///
/// Adding a variant forces every report partition to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Resources owned (cash, receivables, inventory).
    Asset,
    /// Obligations owed (payables, loans, TDS payable).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income from primary operations.
    Revenue,
    /// Operating expenses.
    Expense,
    /// Direct cost of goods sold.
    CostOfGoodsSold,
    /// Non-operating income.
    OtherIncome,
    /// Non-operating expense.
    OtherExpense,
}

impl AccountType {
    /// Returns the side on which this account type normally carries its
    /// balance.
    ///
    /// Debit-normal accounts grow with debits; credit-normal accounts grow
    /// with credits.
    #[must_use]
    pub const fn normal_side(self) -> BalanceSide {
        match self {
            Self::Asset | Self::Expense | Self::CostOfGoodsSold | Self::OtherExpense => {
                BalanceSide::Debit
            }
            Self::Liability | Self::Equity | Self::Revenue | Self::OtherIncome => {
                BalanceSide::Credit
            }
        }
    }

    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::CostOfGoodsSold => "cost_of_goods_sold",
            Self::OtherIncome => "other_income",
            Self::OtherExpense => "other_expense",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side of the ledger a balance sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceSide {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

/// Specification for creating an account.
#[derive(Debug, Clone)]
pub struct AccountSpec {
    /// Account code (must be unique).
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Optional subtype for finer categorization.
    pub subtype: Option<String>,
    /// Parent account code for hierarchical structure.
    pub parent_code: Option<String>,
    /// Opening balance amount (non-negative).
    pub opening_balance: Decimal,
    /// Side the opening balance sits on.
    pub opening_side: BalanceSide,
}

impl AccountSpec {
    /// Creates a spec with a zero opening balance on the account's normal
    /// side.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            account_type,
            subtype: None,
            parent_code: None,
            opening_balance: Decimal::ZERO,
            opening_side: account_type.normal_side(),
        }
    }

    /// Sets the parent account code.
    #[must_use]
    pub fn with_parent(mut self, parent_code: impl Into<String>) -> Self {
        self.parent_code = Some(parent_code.into());
        self
    }

    /// Sets the opening balance.
    #[must_use]
    pub fn with_opening_balance(mut self, amount: Decimal, side: BalanceSide) -> Self {
        self.opening_balance = amount;
        self.opening_side = side;
        self
    }
}

/// An account in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique account code.
    pub code: String,
    /// Human-readable account name.
    pub name: String,
    /// Account type. Immutable once ledger lines exist for the account.
    pub account_type: AccountType,
    /// Optional subtype.
    pub subtype: Option<String>,
    /// Parent account code, if any.
    pub parent_code: Option<String>,
    /// Whether the account accepts new postings.
    pub is_active: bool,
    /// Opening balance amount.
    pub opening_balance: Decimal,
    /// Side the opening balance sits on.
    pub opening_side: BalanceSide,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Builds an account from a validated spec.
    #[must_use]
    pub fn from_spec(spec: AccountSpec) -> Self {
        Self {
            code: spec.code,
            name: spec.name,
            account_type: spec.account_type,
            subtype: spec.subtype,
            parent_code: spec.parent_code,
            is_active: true,
            opening_balance: spec.opening_balance,
            opening_side: spec.opening_side,
            created_at: Utc::now(),
        }
    }

    /// Returns the opening balance as a signed amount (debit positive,
    /// credit negative).
    #[must_use]
    pub fn signed_opening_balance(&self) -> Decimal {
        match self.opening_side {
            BalanceSide::Debit => self.opening_balance,
            BalanceSide::Credit => -self.opening_balance,
        }
    }
}

/// Validates an account spec's intrinsic fields.
///
/// Code uniqueness, parent existence, and hierarchy depth are checked by the
/// registry, which owns the collection.
///
/// # Errors
///
/// Returns an error for an empty code or name, or a negative opening balance.
pub fn validate_spec(spec: &AccountSpec) -> Result<(), AccountError> {
    if spec.code.trim().is_empty() {
        return Err(AccountError::EmptyCode);
    }
    if spec.name.trim().is_empty() {
        return Err(AccountError::EmptyName);
    }
    if spec.opening_balance < Decimal::ZERO {
        return Err(AccountError::NegativeOpeningBalance);
    }
    Ok(())
}
