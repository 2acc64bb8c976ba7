//! Ladle Web - JSON API Server
//!
//! HTTP surface for the Ladle recipe service: a thin axum layer that maps
//! routes onto operations of the shared in-memory recipe store.

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]

pub mod handlers;
pub mod server;

// Re-export main types
pub use server::{AppState, router, run_server};
