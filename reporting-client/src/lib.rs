//! # Reporting Client SDK
//!
//! A typed Rust client for the Reporting API.

use chrono::{DateTime, Utc};
use reporting_types::{
    AccountId, ComissionModel, ComissionQuery, CommissionId, CustomerId, CustomerModel,
    FullCustomerModel, NewCustomer, TransactionId, TransactionModel, TransactionSearchFilter,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// True when the server reported a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND.as_u16())
    }
}

/// Reporting API client.
pub struct ReportingClient {
    base_url: String,
    http: Client,
}

impl ReportingClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Adds a new customer.
    pub async fn add_customer(&self, name: &str, email: &str) -> Result<CustomerModel, ClientError> {
        let req = NewCustomer {
            name: name.to_string(),
            email: email.to_string(),
        };
        self.send(self.http.post(self.url("/api/customers")).json(&req))
            .await
    }

    /// Gets a customer by ID.
    pub async fn get_customer(&self, id: CustomerId) -> Result<CustomerModel, ClientError> {
        self.send(self.http.get(self.url(&format!("/api/customers/{}", id))))
            .await
    }

    /// Gets a customer with its accounts and transactions.
    pub async fn get_full_customer(
        &self,
        id: CustomerId,
    ) -> Result<FullCustomerModel, ClientError> {
        self.send(
            self.http
                .get(self.url(&format!("/api/customers/{}/full", id))),
        )
        .await
    }

    /// Gets the customer owning an account.
    pub async fn get_customer_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<CustomerModel, ClientError> {
        self.send(
            self.http
                .get(self.url("/api/customers/by-account"))
                .query(&[("accountId", account_id.to_string())]),
        )
        .await
    }

    /// Gets the customer owning a transaction.
    pub async fn get_customer_by_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<CustomerModel, ClientError> {
        self.send(
            self.http
                .get(self.url("/api/customers/by-transaction"))
                .query(&[("transactionId", transaction_id.to_string())]),
        )
        .await
    }

    /// Lists a customer's transactions inside an optional date range.
    pub async fn search_transactions(
        &self,
        customer_id: CustomerId,
        date_from: Option<DateTime<Utc>>,
        date_to: Option<DateTime<Utc>>,
    ) -> Result<Vec<TransactionModel>, ClientError> {
        let filter = TransactionSearchFilter { date_from, date_to };
        self.send(
            self.http
                .post(self.url("/api/transactions/by-customer"))
                .query(&[("customerId", customer_id.to_string())])
                .json(&filter),
        )
        .await
    }

    /// Lists the transactions of an account.
    pub async fn transactions_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionModel>, ClientError> {
        self.send(
            self.http
                .post(self.url("/api/transactions/by-account"))
                .query(&[("accountId", account_id.to_string())]),
        )
        .await
    }

    /// Gets a commission by ID.
    pub async fn get_commission(&self, id: CommissionId) -> Result<ComissionModel, ClientError> {
        self.send(self.http.get(self.url(&format!("/api/commissions/{}", id))))
            .await
    }

    /// Gets the commission charged on a transaction.
    pub async fn get_commission_by_transaction(
        &self,
        transaction_id: TransactionId,
    ) -> Result<ComissionModel, ClientError> {
        self.send(
            self.http
                .get(self.url("/api/commissions/by-transaction"))
                .query(&[("transactionId", transaction_id.to_string())]),
        )
        .await
    }

    /// Lists commissions matching every supplied filter.
    pub async fn list_commissions(
        &self,
        query: &ComissionQuery,
    ) -> Result<Vec<ComissionModel>, ClientError> {
        self.send(self.http.get(self.url("/api/commissions")).query(query))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = req.send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(ClientError::Api {
                status: status.as_u16(),
                message: error_message(body),
            })
        }
    }
}

/// Pulls `message` out of an error body, falling back to the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ReportingClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = ReportingClient::new("http://localhost:3000/");
        assert_eq!(client.url("/health"), "http://localhost:3000/health");
    }

    #[test]
    fn test_error_message_from_body() {
        let body = r#"{"statusCode":404,"message":"Customer 42 not found"}"#;
        assert_eq!(error_message(body.to_string()), "Customer 42 not found");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("bad gateway".into()), "bad gateway");
    }

    #[test]
    fn test_is_not_found() {
        let err = ClientError::Api {
            status: 404,
            message: "Commission 1 not found".into(),
        };
        assert!(err.is_not_found());

        let err = ClientError::Api {
            status: 400,
            message: "Something went wrong".into(),
        };
        assert!(!err.is_not_found());
    }
}
