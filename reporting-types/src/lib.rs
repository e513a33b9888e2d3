//! # Reporting Types
//!
//! Entities, transport models and port traits for the reporting service.
//! This crate has ZERO external IO dependencies - only data structures,
//! mapping functions, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Persisted entities (Customer, Account, Transaction, Commission)
//! - `ports/` - Repository traits and query filters that adapters must honour
//! - `dto/` - Transport models for API boundaries
//! - `mapping/` - Entity to model conversions
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod mapping;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Account, AccountId, Commission, CommissionId, Customer, CustomerAggregate, CustomerId,
    Transaction, TransactionId,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{
    AccountFilter, CommissionFilter, CustomerFilter, CustomerRepository, Entity,
    ReportingRepository, Repository, TransactionFilter,
};
