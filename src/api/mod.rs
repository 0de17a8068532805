//! HTTP API module
//!
//! Thin axum wrappers around the field-mapping core.
//! Run with `cellmap serve` or `cellmap-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
