//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
};
use serde::Deserialize;

use reporting_types::{
    AccountId, AppError, ComissionQuery, CommissionId, CustomerId, NewCustomer,
    ReportingRepository, TransactionId, TransactionSearchFilter,
};

use super::error::ApiError;
use crate::{ComissionService, CustomerService, TransactionService};

/// Application state shared across handlers.
///
/// All services share one repository handle.
pub struct AppState<R: ReportingRepository> {
    pub customers: CustomerService<Arc<R>, Arc<R>, Arc<R>>,
    pub transactions: TransactionService<Arc<R>, Arc<R>>,
    pub comissions: ComissionService<Arc<R>, Arc<R>>,
}

impl<R: ReportingRepository> AppState<R> {
    /// Wires every service to the given repository.
    pub fn new(repo: R) -> Self {
        let repo = Arc::new(repo);
        Self {
            customers: CustomerService::new(repo.clone(), repo.clone(), repo.clone()),
            transactions: TransactionService::new(repo.clone(), repo.clone()),
            comissions: ComissionService::new(repo.clone(), repo),
        }
    }
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} ID: {}", what, raw)).into())
}

// ─────────────────────────────────────────────────────────────────────────────
// Query strings
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerIdParam {
    pub customer_id: CustomerId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdParam {
    pub account_id: AccountId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIdParam {
    pub transaction_id: TransactionId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Service endpoints
// ─────────────────────────────────────────────────────────────────────────────

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Any route not registered on the router.
pub async fn fallback(uri: Uri) -> ApiError {
    AppError::NotFound(format!("No route for {}", uri.path())).into()
}

/// A known route called with a method it does not serve.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    AppError::BadRequest(format!("{} not allowed on {}", method, uri.path())).into()
}

// ─────────────────────────────────────────────────────────────────────────────
// Customers
// ─────────────────────────────────────────────────────────────────────────────

/// Add a customer.
#[tracing::instrument(skip_all)]
pub async fn add_customer<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    body: Result<Json<NewCustomer>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = body?;
    let customer = state.customers.add_customer(req).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Get customer by ID.
#[tracing::instrument(skip_all)]
pub async fn get_customer<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let customer_id: CustomerId = parse_id(&id, "customer")?;
    let customer = state.customers.get_customer_by_id(customer_id).await?;
    Ok(Json(customer))
}

/// Get customer by ID with accounts and transactions.
#[tracing::instrument(skip_all)]
pub async fn get_full_customer<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let customer_id: CustomerId = parse_id(&id, "customer")?;
    let customer = state.customers.get_full_customer_by_id(customer_id).await?;
    Ok(Json(customer))
}

/// Get the customer owning an account.
#[tracing::instrument(skip_all)]
pub async fn get_customer_by_account<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<AccountIdParam>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let customer = state
        .customers
        .get_customer_by_account_id(params.account_id)
        .await?;
    Ok(Json(customer))
}

/// Get the customer owning a transaction.
#[tracing::instrument(skip_all)]
pub async fn get_customer_by_transaction<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<TransactionIdParam>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let customer = state
        .customers
        .get_customer_by_transaction_id(params.transaction_id)
        .await?;
    Ok(Json(customer))
}

// ─────────────────────────────────────────────────────────────────────────────
// Transactions
// ─────────────────────────────────────────────────────────────────────────────

/// Search a customer's transactions by date range.
#[tracing::instrument(skip_all)]
pub async fn search_by_customer<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<CustomerIdParam>, QueryRejection>,
    body: Result<Json<TransactionSearchFilter>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let Json(filter) = body?;
    let transactions = state
        .transactions
        .search_transaction(params.customer_id, filter)
        .await?;
    Ok(Json(transactions))
}

/// List the transactions of an account.
#[tracing::instrument(skip_all)]
pub async fn search_by_account<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<AccountIdParam>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let transactions = state
        .transactions
        .search_transaction_by_account(params.account_id)
        .await?;
    Ok(Json(transactions))
}

// ─────────────────────────────────────────────────────────────────────────────
// Commissions
// ─────────────────────────────────────────────────────────────────────────────

/// Get commission by ID.
#[tracing::instrument(skip_all)]
pub async fn get_comission<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let commission_id: CommissionId = parse_id(&id, "commission")?;
    let commission = state.comissions.get_comission_by_id(commission_id).await?;
    Ok(Json(commission))
}

/// Get the commission charged on a transaction.
#[tracing::instrument(skip_all)]
pub async fn get_comission_by_transaction<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<TransactionIdParam>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let commission = state
        .comissions
        .get_comission_by_transaction_id(params.transaction_id)
        .await?;
    Ok(Json(commission))
}

/// List commissions by optional customer, account and date range.
#[tracing::instrument(skip_all)]
pub async fn list_comissions<R: ReportingRepository>(
    State(state): State<Arc<AppState<R>>>,
    params: Result<Query<ComissionQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = params?;
    let commissions = state.comissions.get_comissions(query).await?;
    Ok(Json(commissions))
}
