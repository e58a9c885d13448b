//! Trip and itinerary model.
//!
//! # Invariants
//! - `ItineraryDay::day` values form the contiguous sequence `1..=N` in list order.
//! - `Activity::cost` is finite and non-negative.
//! - Activities are addressed by `ActivityId`, never by list position.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one planned activity.
pub type ActivityId = Uuid;

/// The planned journey. At most one exists per application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Head count as typed on the form; `None` when left blank.
    #[serde(default)]
    pub travelers: Option<u32>,
    /// Free-text companion names.
    #[serde(default)]
    pub traveler_names: String,
}

impl Trip {
    /// Companion line for headers: names when given, otherwise the head count.
    pub fn companions(&self) -> String {
        if !self.traveler_names.is_empty() {
            return self.traveler_names.clone();
        }
        self.travelers
            .map(|count| count.to_string())
            .unwrap_or_default()
    }
}

/// One calendar day of the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based position in the itinerary.
    pub day: u32,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

impl ItineraryDay {
    /// Creates an empty day with the default title.
    pub fn new(day: u32, date: NaiveDate) -> Self {
        Self {
            day,
            date,
            title: default_day_title(day),
            activities: Vec::new(),
        }
    }
}

/// Title given to generated and appended days.
pub fn default_day_title(day: u32) -> String {
    format!("Day {day} Activities")
}

/// Rewrites day numbers so they match list order starting at 1.
pub fn renumber_days(days: &mut [ItineraryDay]) {
    for (index, day) in days.iter_mut().enumerate() {
        day.day = u32::try_from(index + 1).unwrap_or(u32::MAX);
    }
}

/// A single planned event within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub cost: f64,
}

impl Activity {
    /// Creates an activity with a fresh random identifier.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        cost: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            location: location.into(),
            cost,
        }
    }
}
