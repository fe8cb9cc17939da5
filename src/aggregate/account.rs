//! Account Aggregate
//!
//! A bank account holding a currency-typed balance and an active flag.
//! Every mutation validates all preconditions before touching state, so a
//! failed operation never leaves the aggregate (or a transfer peer)
//! half-updated.

use serde::{Deserialize, Serialize};

use crate::domain::{ClienteId, CuentaId, Currency, DomainError, Money};

/// Account aggregate.
///
/// The currency is fixed at opening and always matches the balance's
/// currency. Accounts are never deleted, only deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawAccount", try_from = "RawAccount")]
pub struct Account {
    id: CuentaId,
    owner_id: ClienteId,
    currency: Currency,
    balance: Money,
    active: bool,
}

/// Wire shape. Deserialization re-checks that the currency field, the
/// balance, and the id's account-type code all agree.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Account")]
struct RawAccount {
    id: CuentaId,
    owner_id: ClienteId,
    currency: Currency,
    balance: Money,
    active: bool,
}

impl From<Account> for RawAccount {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            owner_id: account.owner_id,
            currency: account.currency,
            balance: account.balance,
            active: account.active,
        }
    }
}

impl TryFrom<RawAccount> for Account {
    type Error = DomainError;

    fn try_from(raw: RawAccount) -> Result<Self, Self::Error> {
        if raw.balance.currency() != raw.currency {
            return Err(DomainError::currency_mismatch(
                raw.currency,
                raw.balance.currency(),
            ));
        }
        if raw.currency != raw.id.currency() {
            return Err(DomainError::currency_mismatch(raw.id.currency(), raw.currency));
        }
        Ok(Self {
            id: raw.id,
            owner_id: raw.owner_id,
            currency: raw.currency,
            balance: raw.balance,
            active: raw.active,
        })
    }
}

impl Account {
    /// Open a new account with zero balance.
    ///
    /// The currency comes from the account-type code embedded in the id.
    pub fn open(id: CuentaId, owner_id: ClienteId) -> Self {
        let currency = id.currency();
        Self {
            id,
            owner_id,
            currency,
            balance: Money::zero(currency),
            active: true,
        }
    }

    /// Open a new account with a starting balance.
    ///
    /// # Errors
    /// `DomainError::CurrencyMismatch` if the balance is not in the
    /// account's currency.
    pub fn open_with_balance(
        id: CuentaId,
        owner_id: ClienteId,
        balance: Money,
    ) -> Result<Self, DomainError> {
        let currency = id.currency();
        if balance.currency() != currency {
            return Err(DomainError::currency_mismatch(currency, balance.currency()));
        }
        Ok(Self {
            id,
            owner_id,
            currency,
            balance,
            active: true,
        })
    }

    /// Credit money to the account.
    ///
    /// # Errors
    /// `AccountInactive`, `CurrencyMismatch`, or `InvalidAmount` (amount
    /// must be strictly positive).
    pub fn deposit(&mut self, money: &Money) -> Result<(), DomainError> {
        self.ensure_can_move(money)?;
        self.balance = self.balance.add(money)?;

        tracing::debug!(account = %self.id, amount = %money, "deposit applied");
        Ok(())
    }

    /// Debit money from the account.
    ///
    /// # Errors
    /// Same preconditions as [`Account::deposit`], plus
    /// `InsufficientFunds` if the balance does not cover the amount.
    pub fn withdraw(&mut self, money: &Money) -> Result<(), DomainError> {
        self.ensure_can_move(money)?;
        if self.balance.lt(money)? {
            return Err(DomainError::insufficient_funds(
                money.amount(),
                self.balance.amount(),
            ));
        }
        self.balance = self.balance.subtract(money)?;

        tracing::debug!(account = %self.id, amount = %money, "withdrawal applied");
        Ok(())
    }

    /// Move money from this account to `destination` as one operation.
    ///
    /// Everything is validated before either side mutates: both accounts
    /// active, destination distinct, all three currencies matching, and
    /// sufficient source balance. On any failure neither balance changes.
    pub fn transfer_to(
        &mut self,
        money: &Money,
        destination: &mut Account,
    ) -> Result<(), DomainError> {
        if self.id == destination.id {
            return Err(DomainError::SameAccountTransfer);
        }
        self.ensure_can_move(money)?;
        if !destination.active {
            return Err(DomainError::AccountInactive(
                destination.id.as_str().to_string(),
            ));
        }
        if destination.currency != self.currency {
            return Err(DomainError::currency_mismatch(
                self.currency,
                destination.currency,
            ));
        }
        if self.balance.lt(money)? {
            return Err(DomainError::insufficient_funds(
                money.amount(),
                self.balance.amount(),
            ));
        }

        // Compute both sides before assigning either
        let debited = self.balance.subtract(money)?;
        let credited = destination.balance.add(money)?;
        self.balance = debited;
        destination.balance = credited;

        tracing::debug!(
            from = %self.id,
            to = %destination.id,
            amount = %money,
            "transfer applied"
        );
        Ok(())
    }

    /// Close the account.
    ///
    /// # Errors
    /// `DomainError::NonZeroBalance` unless the balance is zero.
    pub fn close(&mut self) -> Result<(), DomainError> {
        if !self.balance.is_zero() {
            return Err(DomainError::NonZeroBalance {
                balance: self.balance.amount(),
            });
        }
        self.active = false;
        tracing::debug!(account = %self.id, "account closed");
        Ok(())
    }

    /// Administrative override: mark the account active. No balance
    /// precondition.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Administrative override: mark the account inactive. No balance
    /// precondition.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn ensure_can_move(&self, money: &Money) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::AccountInactive(self.id.as_str().to_string()));
        }
        if money.currency() != self.currency {
            return Err(DomainError::currency_mismatch(
                self.currency,
                money.currency(),
            ));
        }
        if !money.is_positive() {
            return Err(DomainError::InvalidAmount(
                "movement amount must be strictly positive".to_string(),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &CuentaId {
        &self.id
    }

    pub fn owner_id(&self) -> &ClienteId {
        &self.owner_id
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn balance(&self) -> &Money {
        &self.balance
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
