//! Account domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, CustomerId};

/// An account owned by exactly one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// External account number
    pub account_number: String,
    /// When the account was opened
    pub opened_at: DateTime<Utc>,
}

impl Account {
    /// Opens a new account for a customer.
    pub fn open(customer_id: CustomerId, account_number: String) -> Self {
        Self {
            id: AccountId::new(),
            customer_id,
            account_number,
            opened_at: Utc::now(),
        }
    }

    /// Creates an account with all fields specified (for database reconstruction).
    pub fn from_parts(
        id: AccountId,
        customer_id: CustomerId,
        account_number: String,
        opened_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            account_number,
            opened_at,
        }
    }
}
