//! Chart-of-accounts operations.

use tracing::{info, warn};

use ledgerkit_core::accounts::{
    Account, AccountError, AccountSpec, AccountType, MAX_ACCOUNT_DEPTH, validate_spec,
};

use crate::error::StoreError;
use crate::store::{Inner, Store};

/// Partial update for an account. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    /// New account name.
    pub name: Option<String>,
    /// New subtype.
    pub subtype: Option<String>,
    /// New account type. Rejected once the account has ledger lines.
    pub account_type: Option<AccountType>,
    /// Activate or deactivate the account.
    pub is_active: Option<bool>,
}

impl Store {
    /// Creates an account from a validated spec.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateAccountCode`, `ParentNotFound`,
    /// `MaxDepthExceeded`, or a spec validation error.
    pub fn create_account(&self, spec: AccountSpec) -> Result<Account, StoreError> {
        validate_spec(&spec)?;

        let mut inner = self.write()?;
        if inner.accounts.contains_key(&spec.code) {
            return Err(AccountError::DuplicateAccountCode(spec.code).into());
        }
        if let Some(parent_code) = &spec.parent_code {
            let depth = Self::depth_of(&inner, parent_code)?;
            if depth >= MAX_ACCOUNT_DEPTH {
                return Err(AccountError::MaxDepthExceeded {
                    max: MAX_ACCOUNT_DEPTH,
                }
                .into());
            }
        }

        let account = Account::from_spec(spec);
        info!(code = %account.code, account_type = %account.account_type, "account created");
        inner.accounts.insert(account.code.clone(), account.clone());
        Ok(account)
    }

    /// Fetches an account by code.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn get_account(&self, code: &str) -> Result<Account, StoreError> {
        let inner = self.read()?;
        inner
            .accounts
            .get(code)
            .cloned()
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()).into())
    }

    /// Lists the direct children of an account, in code order.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` when the parent does not exist.
    pub fn get_children(&self, code: &str) -> Result<Vec<Account>, StoreError> {
        let inner = self.read()?;
        if !inner.accounts.contains_key(code) {
            return Err(AccountError::AccountNotFound(code.to_string()).into());
        }
        Ok(inner
            .accounts
            .values()
            .filter(|a| a.parent_code.as_deref() == Some(code))
            .cloned()
            .collect())
    }

    /// Lists all accounts in code order.
    pub fn list_accounts(&self) -> Result<Vec<Account>, StoreError> {
        Ok(self.read()?.accounts.values().cloned().collect())
    }

    /// Applies a partial update to an account.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`, or `AccountTypeChangeNotAllowed` when a
    /// type change is requested for an account that has ledger lines.
    pub fn update_account(&self, code: &str, update: AccountUpdate) -> Result<Account, StoreError> {
        let mut inner = self.write()?;
        if update.account_type.is_some() {
            let has_lines = inner.lines.iter().any(|l| l.account_code == code);
            if has_lines {
                return Err(AccountError::AccountTypeChangeNotAllowed(code.to_string()).into());
            }
        }

        let account = inner
            .accounts
            .get_mut(code)
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()))?;

        if let Some(name) = update.name {
            account.name = name;
        }
        if let Some(subtype) = update.subtype {
            account.subtype = Some(subtype);
        }
        if let Some(account_type) = update.account_type {
            account.account_type = account_type;
        }
        if let Some(is_active) = update.is_active {
            account.is_active = is_active;
        }
        Ok(account.clone())
    }

    /// Deactivates an account. Historical behavior: allowed even with a
    /// nonzero balance, but logged so callers are on notice. Accounts are
    /// never hard-deleted once history exists.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound`.
    pub fn deactivate_account(&self, code: &str) -> Result<Account, StoreError> {
        let mut inner = self.write()?;
        let Some(account) = inner.accounts.get(code).cloned() else {
            return Err(AccountError::AccountNotFound(code.to_string()).into());
        };

        let balance = crate::balances::signed_balance(&inner, &account, None);
        if !balance.is_zero() {
            warn!(code = %code, balance = %balance, "deactivating account with nonzero balance");
        }
        info!(code = %code, "account deactivated");

        let account = inner
            .accounts
            .get_mut(code)
            .ok_or_else(|| AccountError::AccountNotFound(code.to_string()))?;
        account.is_active = false;
        Ok(account.clone())
    }

    /// Depth of an existing account: 1 for a root, parent depth + 1
    /// otherwise.
    fn depth_of(inner: &Inner, code: &str) -> Result<u8, StoreError> {
        let mut depth: u8 = 0;
        let mut current = Some(code.to_string());
        while let Some(c) = current {
            let account = inner
                .accounts
                .get(&c)
                .ok_or_else(|| AccountError::ParentNotFound(c.clone()))?;
            depth = depth.saturating_add(1);
            current = account.parent_code.clone();
        }
        Ok(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerkit_core::accounts::BalanceSide;
    use rust_decimal_macros::dec;

    fn store() -> Store {
        Store::default()
    }

    fn asset(code: &str) -> AccountSpec {
        AccountSpec::new(code, format!("Account {code}"), AccountType::Asset)
    }

    #[test]
    fn test_create_and_get() {
        let store = store();
        store.create_account(asset("1000")).unwrap();
        let account = store.get_account("1000").unwrap();
        assert_eq!(account.code, "1000");
        assert!(account.is_active);
    }

    #[test]
    fn test_duplicate_code_rejected() {
        let store = store();
        store.create_account(asset("1000")).unwrap();
        assert!(matches!(
            store.create_account(asset("1000")),
            Err(StoreError::Account(AccountError::DuplicateAccountCode(_)))
        ));
    }

    #[test]
    fn test_parent_must_exist() {
        let store = store();
        assert!(matches!(
            store.create_account(asset("1010").with_parent("1000")),
            Err(StoreError::Account(AccountError::ParentNotFound(_)))
        ));
    }

    #[test]
    fn test_max_depth_enforced() {
        let store = store();
        store.create_account(asset("1")).unwrap();
        let mut parent = "1".to_string();
        for level in 2..=5 {
            let code = format!("{parent}{level}");
            store
                .create_account(asset(&code).with_parent(parent.clone()))
                .unwrap();
            parent = code;
        }
        // Level 6 exceeds the maximum depth of 5.
        assert!(matches!(
            store.create_account(asset("123456").with_parent(parent)),
            Err(StoreError::Account(AccountError::MaxDepthExceeded { .. }))
        ));
    }

    #[test]
    fn test_get_children() {
        let store = store();
        store.create_account(asset("1000")).unwrap();
        store
            .create_account(asset("1010").with_parent("1000"))
            .unwrap();
        store
            .create_account(asset("1020").with_parent("1000"))
            .unwrap();
        store.create_account(asset("2000")).unwrap();

        let children = store.get_children("1000").unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].code, "1010");
        assert_eq!(children[1].code, "1020");
    }

    #[test]
    fn test_deactivate_with_opening_balance_allowed() {
        let store = store();
        store
            .create_account(
                asset("1000").with_opening_balance(dec!(500), BalanceSide::Debit),
            )
            .unwrap();
        let account = store.deactivate_account("1000").unwrap();
        assert!(!account.is_active);
    }

    #[test]
    fn test_type_change_allowed_until_lines_exist() {
        let store = store();
        store.create_account(asset("1000")).unwrap();
        let update = AccountUpdate {
            account_type: Some(AccountType::Expense),
            ..AccountUpdate::default()
        };
        let account = store.update_account("1000", update).unwrap();
        assert_eq!(account.account_type, AccountType::Expense);
    }
}
