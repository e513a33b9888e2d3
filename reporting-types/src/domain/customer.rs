//! Customer domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Account, CustomerId, Transaction};
use crate::error::DomainError;

/// A customer of the reporting service.
///
/// Customers are the root records: accounts and transactions hang off them
/// through their `customer_id` foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// When the customer was created
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer.
    ///
    /// # Validation
    /// - Name cannot be empty
    pub fn new(name: String, email: String) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "Customer name cannot be empty".into(),
            ));
        }

        Ok(Self {
            id: CustomerId::new(),
            name,
            email,
            created_at: Utc::now(),
        })
    }

    /// Creates a customer with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: CustomerId,
        name: String,
        email: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }
}

/// A customer with its accounts and transactions eagerly loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAggregate {
    pub customer: Customer,
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
}

impl CustomerAggregate {
    /// Returns true when the customer owns at least one account.
    pub fn has_accounts(&self) -> bool {
        !self.accounts.is_empty()
    }
}
