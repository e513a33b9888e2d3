//! Repository port traits.
//!
//! A single generic `Repository<E>` covers get-by-id, predicate find and
//! insert for every entity. Adapters (Postgres, SQLite, in-memory) implement
//! it once per entity they store.

use std::sync::Arc;

use async_trait::async_trait;

use super::filter::{AccountFilter, CommissionFilter, CustomerFilter, TransactionFilter};
use crate::domain::{
    Account, AccountId, Commission, CommissionId, Customer, CustomerAggregate, CustomerId,
    Transaction, TransactionId,
};
use crate::error::RepoError;

/// Binds an entity to its identifier and query filter types.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Copy + Send + Sync + std::fmt::Display + 'static;
    type Filter: Default + Send + Sync + 'static;

    /// Human-readable entity name, used in lookup failures.
    const NAME: &'static str;
}

impl Entity for Customer {
    type Id = CustomerId;
    type Filter = CustomerFilter;
    const NAME: &'static str = "Customer";
}

impl Entity for Account {
    type Id = AccountId;
    type Filter = AccountFilter;
    const NAME: &'static str = "Account";
}

impl Entity for Transaction {
    type Id = TransactionId;
    type Filter = TransactionFilter;
    const NAME: &'static str = "Transaction";
}

impl Entity for Commission {
    type Id = CommissionId;
    type Filter = CommissionFilter;
    const NAME: &'static str = "Commission";
}

/// Generic data access over one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync + 'static {
    /// Gets an entity by ID.
    async fn get_by_id(&self, id: E::Id) -> Result<Option<E>, RepoError>;

    /// Finds every entity matching the filter. An empty filter matches all rows.
    async fn find(&self, filter: E::Filter) -> Result<Vec<E>, RepoError>;

    /// Persists a new entity and returns it as stored.
    async fn add_and_return(&self, entity: E) -> Result<E, RepoError>;
}

/// Customer storage with eager loading of owned records.
#[async_trait]
pub trait CustomerRepository: Repository<Customer> {
    /// Gets a customer together with its accounts and transactions.
    async fn get_full_customer(&self, id: CustomerId)
    -> Result<Option<CustomerAggregate>, RepoError>;
}

/// A single store serving every entity of the service.
pub trait ReportingRepository:
    CustomerRepository + Repository<Account> + Repository<Transaction> + Repository<Commission>
{
}

impl<T> ReportingRepository for T where
    T: CustomerRepository
        + Repository<Account>
        + Repository<Transaction>
        + Repository<Commission>
{
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared handles
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl<E, R> Repository<E> for Arc<R>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    async fn get_by_id(&self, id: E::Id) -> Result<Option<E>, RepoError> {
        (**self).get_by_id(id).await
    }

    async fn find(&self, filter: E::Filter) -> Result<Vec<E>, RepoError> {
        (**self).find(filter).await
    }

    async fn add_and_return(&self, entity: E) -> Result<E, RepoError> {
        (**self).add_and_return(entity).await
    }
}

#[async_trait]
impl<R> CustomerRepository for Arc<R>
where
    R: CustomerRepository + ?Sized,
{
    async fn get_full_customer(
        &self,
        id: CustomerId,
    ) -> Result<Option<CustomerAggregate>, RepoError> {
        (**self).get_full_customer(id).await
    }
}
