//! Persisted entities of the reporting service.

mod id;

pub mod account;
pub mod commission;
pub mod customer;
pub mod transaction;

pub use account::Account;
pub use commission::Commission;
pub use customer::{Customer, CustomerAggregate};
pub use id::{AccountId, CommissionId, CustomerId, TransactionId};
pub use transaction::Transaction;
