//! Ladle Core - Recipe domain model and in-memory store
//!
//! This crate provides the building blocks for the Ladle recipe service:
//! wire types, the concurrency-safe recipe store, configuration, and
//! tracing setup.

pub mod config;
pub mod recipe;
pub mod store;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::LadleConfig;
pub use recipe::{Ingredient, Recipe, RecipeDto, RecipeId};
pub use store::{RecipeStore, StoreError};

/// Errors that can bubble up from any Ladle subsystem.
#[derive(Debug, thiserror::Error)]
pub enum LadleError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LadleError>;
