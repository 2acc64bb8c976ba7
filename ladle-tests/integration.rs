//! Integration tests for Ladle
//!
//! These tests drive the full HTTP surface through the router in-process
//! and exercise the recipe store under concurrent callers.

#[path = "integration/http_api.rs"]
mod http_api;

#[path = "integration/store_concurrency.rs"]
mod store_concurrency;
