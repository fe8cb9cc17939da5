//! In-memory stores
//!
//! HashMap-backed implementations of the repository ports. Single unit of
//! work, no locking: the caller owns the store exclusively.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::aggregate::{Account, Customer, Transaction};
use crate::domain::{ClienteId, CuentaId, TransaccionId};

use super::{AccountStore, CustomerStore, StoreError, TransactionStore};

/// In-memory [`AccountStore`].
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: HashMap<CuentaId, Account>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountStore for MemoryAccountStore {
    fn get(&self, id: &CuentaId) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(id).cloned())
    }

    fn put(&mut self, account: Account) -> Result<(), StoreError> {
        self.accounts.insert(account.id().clone(), account);
        Ok(())
    }

    fn exists_by_number(&self, number: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.keys().any(|id| id.as_str() == number))
    }

    fn list_by_owner(&self, owner: &ClienteId) -> Result<Vec<Account>, StoreError> {
        let mut owned: Vec<Account> = self
            .accounts
            .values()
            .filter(|account| account.owner_id() == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(owned)
    }
}

/// In-memory [`CustomerStore`].
#[derive(Debug, Default)]
pub struct MemoryCustomerStore {
    customers: HashMap<ClienteId, Customer>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for MemoryCustomerStore {
    fn get(&self, id: &ClienteId) -> Result<Option<Customer>, StoreError> {
        Ok(self.customers.get(id).cloned())
    }

    fn put(&mut self, customer: Customer) -> Result<(), StoreError> {
        self.customers.insert(customer.id().clone(), customer);
        Ok(())
    }

    fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.customers.values().any(|c| c.email() == email))
    }
}

/// In-memory [`TransactionStore`].
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: HashMap<TransaccionId, Transaction>,
}

impl MemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryTransactionStore {
    fn get(&self, id: &TransaccionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.get(id).cloned())
    }

    fn put(&mut self, transaction: Transaction) -> Result<(), StoreError> {
        self.transactions
            .insert(transaction.id().clone(), transaction);
        Ok(())
    }

    fn list_by_account(
        &self,
        account_id: &CuentaId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        let mut matching: Vec<Transaction> = self
            .transactions
            .values()
            .filter(|txn| {
                let touches = txn.source_account_id() == Some(account_id)
                    || txn.destination_account_id() == Some(account_id);
                touches && txn.created_at() >= from && txn.created_at() <= to
            })
            .cloned()
            .collect();
        matching.sort_by_key(|txn| txn.created_at());
        Ok(matching)
    }

    fn list_by_reference(&self, reference: &str) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .values()
            .filter(|txn| txn.reference() == reference)
            .cloned()
            .collect())
    }
}
