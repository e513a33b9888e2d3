//! Reporting Application Services
//!
//! Orchestrate lookups through the repository ports, enforce existence
//! invariants and map entities to transport models.
//! Contains NO infrastructure logic - pure business orchestration.
//!
//! Every service is generic over the repositories it needs, injected through
//! `new`. Any `Arc` of a `ReportingRepository` satisfies all of them.

mod comission;
mod customer;
mod transaction;

pub use comission::ComissionService;
pub use customer::CustomerService;
pub use transaction::TransactionService;
