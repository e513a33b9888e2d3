//! # Reporting Hex
//!
//! Application services and HTTP adapter for the reporting service.
//!
//! ## Architecture
//!
//! - `service/` - Application services (lookup chains, existence checks, mapping)
//! - `inbound/` - HTTP adapter (Axum server, error translation)
//! - `openapi` - OpenAPI document served by the adapter
//!
//! Services are generic over the repository ports, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::{ComissionService, CustomerService, TransactionService};
