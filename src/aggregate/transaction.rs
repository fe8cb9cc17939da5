//! Transaction Aggregate
//!
//! An immutable record of a single monetary movement plus its mutable
//! lifecycle status. The intent (type, accounts, amount, description) is
//! fixed and shape-checked once at construction; only the status moves,
//! and only along Pending → Completed | Rejected and Completed → Reverted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CuentaId, DomainError, Money, TransaccionId};

/// Kinds of monetary movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
    ServicePayment,
    Fee,
    Interest,
    Reversal,
}

impl TransactionType {
    /// Type name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Transfer => "transfer",
            TransactionType::ServicePayment => "service_payment",
            TransactionType::Fee => "fee",
            TransactionType::Interest => "interest",
            TransactionType::Reversal => "reversal",
        }
    }

    /// A commission-style charge; never eligible for reversal.
    pub fn is_commission(&self) -> bool {
        matches!(self, TransactionType::Fee)
    }

    fn requires_source(&self) -> bool {
        matches!(self, TransactionType::Withdrawal | TransactionType::Transfer)
    }

    fn forbids_source(&self) -> bool {
        matches!(self, TransactionType::Deposit)
    }

    fn requires_destination(&self) -> bool {
        matches!(self, TransactionType::Deposit | TransactionType::Transfer)
    }

    fn forbids_destination(&self) -> bool {
        matches!(self, TransactionType::Withdrawal)
    }
}

/// Lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Rejected,
    Reverted,
}

/// How long after creation a completed transaction stays revertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReversalPolicy {
    window: Duration,
}

impl ReversalPolicy {
    /// Policy with a window of the given number of days.
    pub fn days(days: i64) -> Self {
        Self {
            window: Duration::days(days),
        }
    }

    /// The reversal window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for ReversalPolicy {
    fn default() -> Self {
        Self::days(30)
    }
}

/// Transaction aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawTransaction", try_from = "RawTransaction")]
pub struct Transaction {
    id: TransaccionId,
    transaction_type: TransactionType,
    source_account_id: Option<CuentaId>,
    destination_account_id: Option<CuentaId>,
    amount: Money,
    description: String,
    created_at: DateTime<Utc>,
    reference: String,
    status: TransactionStatus,
}

/// Wire shape. Deserialization re-runs the amount and shape checks, so a
/// persisted record cannot bypass the construct-once rules; status,
/// timestamp, and reference are restored as stored.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Transaction")]
struct RawTransaction {
    id: TransaccionId,
    transaction_type: TransactionType,
    source_account_id: Option<CuentaId>,
    destination_account_id: Option<CuentaId>,
    amount: Money,
    description: String,
    created_at: DateTime<Utc>,
    reference: String,
    status: TransactionStatus,
}

impl From<Transaction> for RawTransaction {
    fn from(txn: Transaction) -> Self {
        Self {
            id: txn.id,
            transaction_type: txn.transaction_type,
            source_account_id: txn.source_account_id,
            destination_account_id: txn.destination_account_id,
            amount: txn.amount,
            description: txn.description,
            created_at: txn.created_at,
            reference: txn.reference,
            status: txn.status,
        }
    }
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = DomainError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        if !raw.amount.is_positive() {
            return Err(DomainError::InvalidAmount(
                "transaction amount must be strictly positive".to_string(),
            ));
        }
        Transaction::validate_shape(
            raw.transaction_type,
            raw.source_account_id.as_ref(),
            raw.destination_account_id.as_ref(),
        )?;

        Ok(Self {
            id: raw.id,
            transaction_type: raw.transaction_type,
            source_account_id: raw.source_account_id,
            destination_account_id: raw.destination_account_id,
            amount: raw.amount,
            description: raw.description,
            created_at: raw.created_at,
            reference: raw.reference,
            status: raw.status,
        })
    }
}

impl Transaction {
    /// Create a new transaction in `Pending` state, stamped with the
    /// current time.
    ///
    /// # Errors
    /// - `DomainError::InvalidAmount` if the amount is not strictly positive
    /// - `DomainError::InvalidTransaction` if the source/destination shape
    ///   does not match the transaction type
    /// - `DomainError::SameAccountTransfer` for a transfer onto itself
    pub fn new(
        id: TransaccionId,
        transaction_type: TransactionType,
        source_account_id: Option<CuentaId>,
        destination_account_id: Option<CuentaId>,
        amount: Money,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount(
                "transaction amount must be strictly positive".to_string(),
            ));
        }

        Self::validate_shape(
            transaction_type,
            source_account_id.as_ref(),
            destination_account_id.as_ref(),
        )?;

        let reference = Self::derive_reference(&id);
        Ok(Self {
            id,
            transaction_type,
            source_account_id,
            destination_account_id,
            amount,
            description: description.into(),
            created_at: Utc::now(),
            reference,
            status: TransactionStatus::Pending,
        })
    }

    /// Mark the transaction completed. Legal only from `Pending`.
    pub fn complete(&mut self) -> Result<(), DomainError> {
        match self.status {
            TransactionStatus::Pending => {
                self.status = TransactionStatus::Completed;
                tracing::debug!(
                    reference = %self.reference,
                    kind = self.transaction_type.as_str(),
                    "transaction completed"
                );
                Ok(())
            }
            from => Err(self.illegal_transition(from, "complete")),
        }
    }

    /// Reject the transaction. Legal only from `Pending`. The reason is
    /// logged, not persisted.
    pub fn reject(&mut self, reason: &str) -> Result<(), DomainError> {
        match self.status {
            TransactionStatus::Pending => {
                self.status = TransactionStatus::Rejected;
                tracing::warn!(
                    reference = %self.reference,
                    kind = self.transaction_type.as_str(),
                    reason,
                    "transaction rejected"
                );
                Ok(())
            }
            from => Err(self.illegal_transition(from, "reject")),
        }
    }

    /// Revert a completed transaction. Legal only from `Completed`.
    pub fn revert(&mut self) -> Result<(), DomainError> {
        match self.status {
            TransactionStatus::Completed => {
                self.status = TransactionStatus::Reverted;
                tracing::debug!(reference = %self.reference, "transaction reverted");
                Ok(())
            }
            from => Err(self.illegal_transition(from, "revert")),
        }
    }

    /// Whether the transaction could be reverted as of `now`: completed,
    /// not a commission charge, and younger than the policy window.
    /// Read-only; this is not a transition.
    pub fn is_reversible_at(&self, now: DateTime<Utc>, policy: &ReversalPolicy) -> bool {
        self.status == TransactionStatus::Completed
            && !self.transaction_type.is_commission()
            && now - self.created_at < policy.window()
    }

    /// [`Transaction::is_reversible_at`] against the current time.
    pub fn is_reversible(&self, policy: &ReversalPolicy) -> bool {
        self.is_reversible_at(Utc::now(), policy)
    }

    fn illegal_transition(&self, from: TransactionStatus, attempted: &'static str) -> DomainError {
        let err = DomainError::IllegalStateTransition { from, attempted };
        tracing::error!(reference = %self.reference, %err, "transaction lifecycle misuse");
        err
    }

    fn validate_shape(
        transaction_type: TransactionType,
        source: Option<&CuentaId>,
        destination: Option<&CuentaId>,
    ) -> Result<(), DomainError> {
        let kind = transaction_type.as_str();

        if transaction_type.requires_source() && source.is_none() {
            return Err(DomainError::InvalidTransaction(format!(
                "{kind} requires a source account"
            )));
        }
        if transaction_type.forbids_source() && source.is_some() {
            return Err(DomainError::InvalidTransaction(format!(
                "{kind} must not carry a source account"
            )));
        }
        if transaction_type.requires_destination() && destination.is_none() {
            return Err(DomainError::InvalidTransaction(format!(
                "{kind} requires a destination account"
            )));
        }
        if transaction_type.forbids_destination() && destination.is_some() {
            return Err(DomainError::InvalidTransaction(format!(
                "{kind} must not carry a destination account"
            )));
        }
        if transaction_type == TransactionType::Transfer && source == destination {
            return Err(DomainError::SameAccountTransfer);
        }
        Ok(())
    }

    /// Reference derived from the identifier: non-empty and stable for the
    /// life of the transaction.
    fn derive_reference(id: &TransaccionId) -> String {
        format!("REF-{}", id.digits())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &TransaccionId {
        &self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn source_account_id(&self) -> Option<&CuentaId> {
        self.source_account_id.as_ref()
    }

    pub fn destination_account_id(&self) -> Option<&CuentaId> {
        self.destination_account_id.as_ref()
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }
}
