//! Aggregate module
//!
//! The mutable aggregates of the ledger. Each is an owned struct with
//! private fields; commands take `&mut self`, validate every precondition
//! first, and only then mutate, so no failure leaves an aggregate
//! half-updated. The persistence boundary owns an aggregate exclusively
//! for the duration of a unit of work.

pub mod account;
pub mod customer;
pub mod transaction;

pub use account::Account;
pub use customer::{Customer, MAX_ACCOUNTS};
pub use transaction::{ReversalPolicy, Transaction, TransactionStatus, TransactionType};
