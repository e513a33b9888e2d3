//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The service layer depends on these traits, not concrete implementations.

mod filter;
mod repository;

pub use filter::{AccountFilter, CommissionFilter, CustomerFilter, TransactionFilter};
pub use repository::{CustomerRepository, Entity, ReportingRepository, Repository};
