//! Commission domain model.

use serde::{Deserialize, Serialize};

use super::{CommissionId, TransactionId};

/// A commission charged on a transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commission {
    pub id: CommissionId,
    pub transaction_id: TransactionId,
    /// Amount in smallest currency unit
    pub amount: i64,
}

impl Commission {
    /// Charges a commission on a transaction.
    pub fn charge(transaction_id: TransactionId, amount: i64) -> Self {
        Self {
            id: CommissionId::new(),
            transaction_id,
            amount,
        }
    }
}
