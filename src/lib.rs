//! banca_core Library
//!
//! Core ledger domain model for a retail bank: money-safe arithmetic,
//! account balance mutation, and transaction lifecycle tracking. The
//! orchestration and persistence layers sit outside this crate and talk
//! to it through the aggregates and the [`store`] port traits.

pub mod aggregate;
pub mod domain;
pub mod store;

pub mod config;
mod error;

pub use config::Config;
pub use error::{AppError, AppResult};

pub use aggregate::{
    Account, Customer, ReversalPolicy, Transaction, TransactionStatus, TransactionType,
    MAX_ACCOUNTS,
};
pub use domain::{
    ClienteId, CuentaId, Currency, DomainError, ExchangeRate, Money, TransaccionId,
};
