//! Persistence layer for the application state snapshot.
//!
//! # Responsibility
//! - Define the load/save contract the store depends on.
//! - Keep SQL and JSON encoding details out of the store.

pub mod state_repo;
