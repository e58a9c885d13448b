//! Application state aggregate root.
//!
//! # Invariants
//! - Holds at most one trip; generating an itinerary replaces it.
//! - Deserialization is a shallow merge over defaults: a top-level key missing
//!   from the snapshot keeps its default value.

use crate::model::budget::Budget;
use crate::model::memory::Memory;
use crate::model::packing::PackingItem;
use crate::model::trip::{ItineraryDay, Trip};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppState {
    pub current_trip: Option<Trip>,
    pub itinerary: Vec<ItineraryDay>,
    pub budget: Budget,
    pub packing_list: Vec<PackingItem>,
    pub memories: Vec<Memory>,
    pub dark_mode: bool,
}

impl AppState {
    /// Checks invariants that a hand-edited or corrupted snapshot could break.
    ///
    /// Returns a description of the first violation found.
    pub fn check_integrity(&self) -> Result<(), String> {
        for (index, day) in self.itinerary.iter().enumerate() {
            let expected = index + 1;
            if day.day as usize != expected {
                return Err(format!(
                    "itinerary day at position {expected} is numbered {}",
                    day.day
                ));
            }
            if let Some(activity) = day
                .activities
                .iter()
                .find(|activity| !activity.cost.is_finite() || activity.cost < 0.0)
            {
                return Err(format!(
                    "activity {} on day {} has invalid cost",
                    activity.id, day.day
                ));
            }
        }
        if !self.budget.total.is_finite() || self.budget.total < 0.0 {
            return Err("budget total must be a non-negative number".to_string());
        }
        if let Some(expense) = self
            .budget
            .expenses
            .iter()
            .find(|expense| !expense.amount.is_finite() || expense.amount <= 0.0)
        {
            return Err(format!("expense {} has non-positive amount", expense.id));
        }
        if let Some(item) = self.packing_list.iter().find(|item| item.quantity == 0) {
            return Err(format!("packing item {} has zero quantity", item.id));
        }
        Ok(())
    }

    /// Clears every session-scoped photo reference.
    pub fn strip_photos(&mut self) {
        for memory in &mut self.memories {
            memory.photo = None;
        }
    }
}
