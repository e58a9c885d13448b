//! State store and its use-case mutators.
//!
//! # Responsibility
//! - Validate raw form input before any state change.
//! - Keep render and storage concerns behind the store's commit step.

pub mod budget;
pub mod itinerary;
pub mod memories;
pub mod packing;
pub mod store;
