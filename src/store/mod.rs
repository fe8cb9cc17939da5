//! Store module
//!
//! Repository ports the orchestration layer implements against its storage
//! technology. The domain only depends on these traits; the in-memory
//! implementations back the test suite.
//!
//! Calls are synchronous: the core has no suspension points, and the
//! transactional boundary (locking, freshness of balances) belongs to the
//! implementing layer.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::{MemoryAccountStore, MemoryCustomerStore, MemoryTransactionStore};

use chrono::{DateTime, Utc};

use crate::aggregate::{Account, Customer, Transaction};
use crate::domain::{ClienteId, CuentaId, TransaccionId};

/// Persistence port for accounts.
pub trait AccountStore {
    /// Fetch an account by id.
    fn get(&self, id: &CuentaId) -> Result<Option<Account>, StoreError>;

    /// Persist an account, replacing any previous state under the same id.
    fn put(&mut self, account: Account) -> Result<(), StoreError>;

    /// Whether an account exists under the given account number.
    fn exists_by_number(&self, number: &str) -> Result<bool, StoreError>;

    /// All accounts owned by the given customer.
    fn list_by_owner(&self, owner: &ClienteId) -> Result<Vec<Account>, StoreError>;
}

/// Persistence port for customers.
pub trait CustomerStore {
    /// Fetch a customer by id.
    fn get(&self, id: &ClienteId) -> Result<Option<Customer>, StoreError>;

    /// Persist a customer, replacing any previous state under the same id.
    fn put(&mut self, customer: Customer) -> Result<(), StoreError>;

    /// Whether a customer is registered under the given email.
    fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;
}

/// Persistence port for transactions.
pub trait TransactionStore {
    /// Fetch a transaction by id.
    fn get(&self, id: &TransaccionId) -> Result<Option<Transaction>, StoreError>;

    /// Persist a transaction, replacing any previous state under the same
    /// id. The stored representation must round-trip amount, currency, and
    /// status exactly.
    fn put(&mut self, transaction: Transaction) -> Result<(), StoreError>;

    /// Transactions touching the account (as source or destination) whose
    /// `created_at` lies within `[from, to]`.
    fn list_by_account(
        &self,
        account_id: &CuentaId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Transactions carrying the given reference.
    fn list_by_reference(&self, reference: &str) -> Result<Vec<Transaction>, StoreError>;
}
