//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod error;
mod handlers;
mod server;

pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use handlers::AppState;
pub use server::{HttpServer, serve};
