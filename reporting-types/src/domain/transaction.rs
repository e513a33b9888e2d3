//! Transaction domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AccountId, CustomerId, TransactionId};

/// A recorded transaction on a customer's account.
///
/// Transactions are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Account the transaction was booked on
    pub account_id: AccountId,
    /// Booking date
    pub date: DateTime<Utc>,
    /// Amount in smallest currency unit
    pub amount: i64,
    /// Free-form description
    pub description: Option<String>,
}

impl Transaction {
    /// Records a new transaction.
    pub fn record(
        customer_id: CustomerId,
        account_id: AccountId,
        date: DateTime<Utc>,
        amount: i64,
        description: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            customer_id,
            account_id,
            date,
            amount,
            description,
        }
    }

    /// Returns true when the transaction date falls inside the inclusive range.
    /// A missing bound leaves that side open.
    pub fn is_within(&self, from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> bool {
        from.is_none_or(|from| self.date >= from) && to.is_none_or(|to| self.date <= to)
    }
}
