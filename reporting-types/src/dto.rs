//! Transport models for requests and responses.
//!
//! Every model serializes with camelCase field names.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{AccountId, CommissionId, CustomerId, TransactionId};

// ─────────────────────────────────────────────────────────────────────────────
// Customer models
// ─────────────────────────────────────────────────────────────────────────────

/// Request to add a new customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Summary view of a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerModel {
    pub id: CustomerId,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Full view of a customer with its accounts and transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FullCustomerModel {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub accounts: Vec<AccountModel>,
    pub transactions: Vec<TransactionModel>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Account models
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountModel {
    pub id: AccountId,
    pub customer_id: CustomerId,
    #[schema(example = "DE89370400440532013000")]
    pub account_number: String,
    pub opened_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Transaction models
// ─────────────────────────────────────────────────────────────────────────────

/// A transaction as returned by the search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionModel {
    pub id: TransactionId,
    pub customer_id: CustomerId,
    pub account_id: AccountId,
    pub date: DateTime<Utc>,
    /// Amount in smallest currency unit (e.g., cents)
    #[schema(example = 1250)]
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Date range applied to a customer's transactions. Both bounds are inclusive
/// and optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSearchFilter {
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Commission models
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComissionModel {
    pub id: CommissionId,
    pub transaction_id: TransactionId,
    /// Amount in smallest currency unit
    #[schema(example = 25)]
    pub amount: i64,
}

/// Optional criteria for listing commissions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ComissionQuery {
    pub customer_id: Option<CustomerId>,
    pub account_id: Option<AccountId>,
    pub date_start: Option<DateTime<Utc>>,
    pub date_end: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Error body returned for every failed request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[schema(example = 404)]
    pub status_code: u16,
    #[schema(example = "Customer 6f1c2a9e-3b4d-4e5f-8a7b-1c2d3e4f5a6b not found")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_filter_accepts_camel_case() {
        let filter: TransactionSearchFilter = serde_json::from_str(
            r#"{"dateFrom": "2024-01-01T00:00:00Z", "dateTo": "2024-02-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(filter.date_from.is_some());
        assert!(filter.date_to.is_some());
    }

    #[test]
    fn test_search_filter_bounds_optional() {
        let filter: TransactionSearchFilter = serde_json::from_str("{}").unwrap();
        assert!(filter.date_from.is_none());
        assert!(filter.date_to.is_none());
    }

    #[test]
    fn test_error_body_shape() {
        let body = ErrorBody {
            status_code: 404,
            message: "Customer 1 not found".into(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["statusCode"], 404);
        assert_eq!(json["message"], "Customer 1 not found");
    }
}
