//! Domain model for trips, budgets, packing lists and memories.
//!
//! # Invariants
//! - Expenses, packing items, memories and activities carry random UUIDv4 ids.
//! - All dates are timezone-free calendar dates.

pub mod budget;
pub mod memory;
pub mod packing;
pub mod state;
pub mod trip;
pub mod validation;
