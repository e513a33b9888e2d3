//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use axum::Json;
use utoipa::OpenApi;

use reporting_types::domain::{AccountId, CommissionId, CustomerId, TransactionId};
use reporting_types::dto::{
    AccountModel, ComissionModel, ComissionQuery, CustomerModel, ErrorBody, FullCustomerModel,
    NewCustomer, TransactionModel, TransactionSearchFilter,
};

// Dummy functions to generate path documentation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Add a customer
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "customers",
    request_body = NewCustomer,
    responses(
        (status = 201, description = "Customer created", body = CustomerModel),
        (status = 400, description = "Invalid request", body = ErrorBody)
    )
)]
async fn add_customer() {}

/// Get customer by ID
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "customers",
    params(
        ("id" = CustomerId, Path, description = "Customer ID (UUID)")
    ),
    responses(
        (status = 200, description = "Customer details", body = CustomerModel),
        (status = 404, description = "Customer not found", body = ErrorBody)
    )
)]
async fn get_customer() {}

/// Get customer with accounts and transactions
#[utoipa::path(
    get,
    path = "/api/customers/{id}/full",
    tag = "customers",
    params(
        ("id" = CustomerId, Path, description = "Customer ID (UUID)")
    ),
    responses(
        (status = 200, description = "Customer with accounts and transactions", body = FullCustomerModel),
        (status = 404, description = "Customer not found or has no accounts", body = ErrorBody)
    )
)]
async fn get_full_customer() {}

/// Get the customer owning an account
#[utoipa::path(
    get,
    path = "/api/customers/by-account",
    tag = "customers",
    params(
        ("accountId" = AccountId, Query, description = "Account ID (UUID)")
    ),
    responses(
        (status = 200, description = "Owning customer", body = CustomerModel),
        (status = 404, description = "Account or customer not found", body = ErrorBody)
    )
)]
async fn get_customer_by_account() {}

/// Get the customer owning a transaction
#[utoipa::path(
    get,
    path = "/api/customers/by-transaction",
    tag = "customers",
    params(
        ("transactionId" = TransactionId, Query, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Owning customer", body = CustomerModel),
        (status = 404, description = "Transaction or customer not found", body = ErrorBody)
    )
)]
async fn get_customer_by_transaction() {}

/// Search a customer's transactions by date range
#[utoipa::path(
    post,
    path = "/api/transactions/by-customer",
    tag = "transactions",
    params(
        ("customerId" = CustomerId, Query, description = "Customer ID (UUID)")
    ),
    request_body = TransactionSearchFilter,
    responses(
        (status = 200, description = "Matching transactions, oldest first", body = Vec<TransactionModel>),
        (status = 404, description = "Customer not found", body = ErrorBody)
    )
)]
async fn search_by_customer() {}

/// List the transactions of an account
#[utoipa::path(
    post,
    path = "/api/transactions/by-account",
    tag = "transactions",
    params(
        ("accountId" = AccountId, Query, description = "Account ID (UUID)")
    ),
    responses(
        (status = 200, description = "Transactions booked on the account", body = Vec<TransactionModel>)
    )
)]
async fn search_by_account() {}

/// Get commission by ID
#[utoipa::path(
    get,
    path = "/api/commissions/{id}",
    tag = "commissions",
    params(
        ("id" = CommissionId, Path, description = "Commission ID (UUID)")
    ),
    responses(
        (status = 200, description = "Commission details", body = ComissionModel),
        (status = 404, description = "Commission not found", body = ErrorBody)
    )
)]
async fn get_comission() {}

/// Get the commission charged on a transaction
#[utoipa::path(
    get,
    path = "/api/commissions/by-transaction",
    tag = "commissions",
    params(
        ("transactionId" = TransactionId, Query, description = "Transaction ID (UUID)")
    ),
    responses(
        (status = 200, description = "Commission details", body = ComissionModel),
        (status = 404, description = "Transaction or commission not found", body = ErrorBody)
    )
)]
async fn get_comission_by_transaction() {}

/// List commissions
#[utoipa::path(
    get,
    path = "/api/commissions",
    tag = "commissions",
    params(ComissionQuery),
    responses(
        (status = 200, description = "Commissions matching every supplied filter", body = Vec<ComissionModel>)
    )
)]
async fn list_comissions() {}

/// OpenAPI documentation for the Reporting API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reporting Service API",
        version = "1.0.0",
        description = "Read access to customers, accounts, transactions and commissions.\n\nMissing entities answer 404 with `{statusCode, message}`; every other failure answers 400 with a generic message.",
        license(name = "MIT"),
    ),
    paths(
        health,
        add_customer,
        get_customer,
        get_full_customer,
        get_customer_by_account,
        get_customer_by_transaction,
        search_by_customer,
        search_by_account,
        get_comission,
        get_comission_by_transaction,
        list_comissions,
    ),
    components(
        schemas(
            NewCustomer,
            CustomerModel,
            FullCustomerModel,
            AccountModel,
            TransactionModel,
            TransactionSearchFilter,
            ComissionModel,
            ErrorBody,
            CustomerId,
            AccountId,
            TransactionId,
            CommissionId,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer lookups and registration"),
        (name = "transactions", description = "Transaction search"),
        (name = "commissions", description = "Commission lookups"),
    )
)]
pub struct ApiDoc;

/// Serves the generated document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/customers",
            "/api/customers/{id}",
            "/api/customers/{id}/full",
            "/api/customers/by-account",
            "/api/customers/by-transaction",
            "/api/transactions/by-customer",
            "/api/transactions/by-account",
            "/api/commissions",
            "/api/commissions/{id}",
            "/api/commissions/by-transaction",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
