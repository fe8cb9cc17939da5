//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

use super::currency::Currency;
use crate::aggregate::transaction::TransactionStatus;

/// Business rule violations and domain invariant failures.
///
/// These are independent of whatever storage or transport wraps the core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Negative, zero-where-positive-required, or otherwise unusable amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Arithmetic result exceeded the representable range
    #[error("Amount arithmetic overflowed")]
    Overflow,

    /// Two-currency operation with mismatched currencies
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        expected: Currency,
        found: Currency,
    },

    /// Balance or amount too small to cover a subtraction
    #[error("Insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Exchange rate does not start from the money's currency
    #[error("Rate mismatch: rate converts from {rate_source}, money is in {money_currency}")]
    RateMismatch {
        rate_source: Currency,
        money_currency: Currency,
    },

    /// Exchange rate must be strictly positive
    #[error("Invalid exchange rate: {0}")]
    InvalidRate(Decimal),

    /// Exchange rate between a currency and itself
    #[error("Exchange rate source and target are both {0}")]
    SameCurrency(Currency),

    /// Operation on a deactivated account
    #[error("Account {0} is not active")]
    AccountInactive(String),

    /// Transfer where source and destination are the same account
    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    /// Closing an account that still holds funds
    #[error("Account cannot be closed with non-zero balance {balance}")]
    NonZeroBalance { balance: Decimal },

    /// Transaction lifecycle misuse. Well-formed callers never trigger
    /// this; treat it as an orchestration bug.
    #[error("Illegal state transition: cannot {attempted} a {from:?} transaction")]
    IllegalStateTransition {
        from: TransactionStatus,
        attempted: &'static str,
    },

    /// Transaction intent fails the shape rules for its type
    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    /// Identifier does not match its required pattern
    #[error("Invalid format: expected {expected}, got {value:?}")]
    InvalidFormat {
        expected: &'static str,
        value: String,
    },

    /// Email is blank or missing '@'
    #[error("Invalid email: {0:?}")]
    InvalidEmail(String),

    /// Customer already holds the maximum number of accounts
    #[error("Account limit reached: customer may hold at most {limit} accounts")]
    AccountLimitReached { limit: usize },

    /// Account already linked to the customer
    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    /// Account not linked to the customer
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Operation on a deactivated customer
    #[error("Customer is not active")]
    CustomerInactive,
}

impl DomainError {
    /// Create an insufficient funds error.
    pub fn insufficient_funds(required: Decimal, available: Decimal) -> Self {
        Self::InsufficientFunds {
            required,
            available,
        }
    }

    /// Create a currency mismatch error.
    pub fn currency_mismatch(expected: Currency, found: Currency) -> Self {
        Self::CurrencyMismatch { expected, found }
    }

    /// Check if this is a client error: the caller can correct the input
    /// and retry. Covers the arithmetic, lifecycle-precondition, and
    /// input-validation classes.
    pub fn is_client_error(&self) -> bool {
        !self.is_orchestration_error()
    }

    /// Check if this indicates a bug in the calling orchestration rather
    /// than bad input. Log these at a higher severity.
    pub fn is_orchestration_error(&self) -> bool {
        matches!(self, Self::IllegalStateTransition { .. })
    }
}
