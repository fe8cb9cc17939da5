//! Customer Aggregate
//!
//! Account-ownership bookkeeping for a customer: a validated email, an
//! active flag, and the ordered list of accounts the customer holds.

use serde::{Deserialize, Serialize};

use crate::domain::{ClienteId, CuentaId, DomainError};

/// Maximum number of accounts a customer may hold.
pub const MAX_ACCOUNTS: usize = 5;

/// Customer aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawCustomer", try_from = "RawCustomer")]
pub struct Customer {
    id: ClienteId,
    name: String,
    email: String,
    active: bool,
    account_ids: Vec<CuentaId>,
}

/// Wire shape. Deserialization re-runs the email, limit, and uniqueness
/// checks that `add_account` enforces incrementally.
#[derive(Serialize, Deserialize)]
#[serde(rename = "Customer")]
struct RawCustomer {
    id: ClienteId,
    name: String,
    email: String,
    active: bool,
    account_ids: Vec<CuentaId>,
}

impl From<Customer> for RawCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            active: customer.active,
            account_ids: customer.account_ids,
        }
    }
}

impl TryFrom<RawCustomer> for Customer {
    type Error = DomainError;

    fn try_from(raw: RawCustomer) -> Result<Self, Self::Error> {
        Customer::validate_email(&raw.email)?;
        if raw.account_ids.len() > MAX_ACCOUNTS {
            return Err(DomainError::AccountLimitReached {
                limit: MAX_ACCOUNTS,
            });
        }
        for (i, id) in raw.account_ids.iter().enumerate() {
            if raw.account_ids[..i].contains(id) {
                return Err(DomainError::DuplicateAccount(id.as_str().to_string()));
            }
        }
        Ok(Self {
            id: raw.id,
            name: raw.name,
            email: raw.email,
            active: raw.active,
            account_ids: raw.account_ids,
        })
    }
}

impl Customer {
    /// Create a new active customer with no accounts.
    ///
    /// # Errors
    /// `DomainError::InvalidEmail` if the email is blank or missing `@`.
    pub fn new(
        id: ClienteId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let email = email.into();
        Self::validate_email(&email)?;

        Ok(Self {
            id,
            name: name.into(),
            email,
            active: true,
            account_ids: Vec::new(),
        })
    }

    /// Link an account to the customer.
    ///
    /// # Errors
    /// Checked in this order: `CustomerInactive`, `AccountLimitReached`,
    /// `DuplicateAccount`.
    pub fn add_account(&mut self, account_id: CuentaId) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::CustomerInactive);
        }
        if self.account_ids.len() >= MAX_ACCOUNTS {
            return Err(DomainError::AccountLimitReached {
                limit: MAX_ACCOUNTS,
            });
        }
        if self.account_ids.contains(&account_id) {
            return Err(DomainError::DuplicateAccount(
                account_id.as_str().to_string(),
            ));
        }

        self.account_ids.push(account_id);
        Ok(())
    }

    /// Unlink an account from the customer.
    ///
    /// # Errors
    /// `DomainError::AccountNotFound` if the account is not linked.
    pub fn remove_account(&mut self, account_id: &CuentaId) -> Result<(), DomainError> {
        let position = self
            .account_ids
            .iter()
            .position(|id| id == account_id)
            .ok_or_else(|| DomainError::AccountNotFound(account_id.as_str().to_string()))?;

        self.account_ids.remove(position);
        Ok(())
    }

    /// Change the customer's email. Validated like construction.
    pub fn update_email(&mut self, email: impl Into<String>) -> Result<(), DomainError> {
        let email = email.into();
        Self::validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    /// Mark the customer active.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Mark the customer inactive. Callers are responsible for forbidding
    /// deactivation while accounts remain open.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    fn validate_email(email: &str) -> Result<(), DomainError> {
        if email.trim().is_empty() || !email.contains('@') {
            return Err(DomainError::InvalidEmail(email.to_string()));
        }
        Ok(())
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn id(&self) -> &ClienteId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Read-only view of the linked accounts, in insertion order.
    pub fn account_ids(&self) -> &[CuentaId] {
        &self.account_ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cliente() -> ClienteId {
        ClienteId::parse("CLI-01230001").unwrap()
    }

    fn cuenta(seq: usize) -> CuentaId {
        CuentaId::parse(&format!("ARG017000100{seq:011}23")).unwrap()
    }

    fn customer() -> Customer {
        Customer::new(cliente(), "Ana García", "ana@example.com").unwrap()
    }

    #[test]
    fn test_new_customer_is_active_and_empty() {
        let c = customer();

        assert!(c.is_active());
        assert!(c.account_ids().is_empty());
        assert_eq!(c.email(), "ana@example.com");
        assert_eq!(c.name(), "Ana García");
    }

    #[test]
    fn test_invalid_email_rejected_at_construction() {
        for bad in ["", "   ", "ana.example.com"] {
            let result = Customer::new(cliente(), "Ana", bad);
            assert!(
                matches!(result, Err(DomainError::InvalidEmail(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_validated_on_every_update() {
        let mut c = customer();

        c.update_email("ana.garcia@example.com").unwrap();
        assert_eq!(c.email(), "ana.garcia@example.com");

        let result = c.update_email("not-an-email");
        assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
        assert_eq!(c.email(), "ana.garcia@example.com");
    }

    #[test]
    fn test_account_limit_is_five() {
        let mut c = customer();

        for seq in 1..=MAX_ACCOUNTS {
            c.add_account(cuenta(seq)).unwrap();
        }
        assert_eq!(c.account_ids().len(), MAX_ACCOUNTS);

        let result = c.add_account(cuenta(6));
        assert!(matches!(
            result,
            Err(DomainError::AccountLimitReached { limit: MAX_ACCOUNTS })
        ));
    }

    #[test]
    fn test_duplicate_account_rejected() {
        let mut c = customer();
        c.add_account(cuenta(1)).unwrap();

        let result = c.add_account(cuenta(1));
        assert!(matches!(result, Err(DomainError::DuplicateAccount(_))));
        assert_eq!(c.account_ids().len(), 1);
    }

    #[test]
    fn test_inactive_customer_cannot_add_accounts() {
        let mut c = customer();
        c.deactivate();

        let result = c.add_account(cuenta(1));
        assert!(matches!(result, Err(DomainError::CustomerInactive)));

        c.activate();
        c.add_account(cuenta(1)).unwrap();
    }

    #[test]
    fn test_inactive_check_precedes_limit_and_duplicate() {
        let mut c = customer();
        for seq in 1..=MAX_ACCOUNTS {
            c.add_account(cuenta(seq)).unwrap();
        }
        c.deactivate();

        // would also be a duplicate and over the limit
        let result = c.add_account(cuenta(1));
        assert!(matches!(result, Err(DomainError::CustomerInactive)));
    }

    #[test]
    fn test_remove_account() {
        let mut c = customer();
        c.add_account(cuenta(1)).unwrap();
        c.add_account(cuenta(2)).unwrap();

        c.remove_account(&cuenta(1)).unwrap();
        assert_eq!(c.account_ids(), &[cuenta(2)]);

        let result = c.remove_account(&cuenta(1));
        assert!(matches!(result, Err(DomainError::AccountNotFound(_))));
    }

    #[test]
    fn test_deserialization_revalidates_accounts_and_email() {
        let mut c = customer();
        c.add_account(cuenta(1)).unwrap();

        // duplicate account injected into a persisted record must not load
        let mut value = serde_json::to_value(&c).unwrap();
        value["account_ids"] =
            serde_json::json!([cuenta(1).as_str(), cuenta(1).as_str()]);
        let dup: Result<Customer, _> = serde_json::from_value(value.clone());
        assert!(dup.is_err());

        value["account_ids"] = serde_json::json!([cuenta(1).as_str()]);
        value["email"] = serde_json::json!("not-an-email");
        let bad_email: Result<Customer, _> = serde_json::from_value(value);
        assert!(bad_email.is_err());

        let json = serde_json::to_string(&c).unwrap();
        let back: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut c = customer();
        for seq in [3, 1, 2] {
            c.add_account(cuenta(seq)).unwrap();
        }

        assert_eq!(c.account_ids(), &[cuenta(3), cuenta(1), cuenta(2)]);
    }
}
