//! Raw form input for every mutator, as typed by the traveler.
//!
//! Forms hold unparsed strings; parsing and validation happen in the store so
//! that a failure never leaves state half-written.

use crate::dates::{format_iso_date, next_day};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Names of the fixed input fields on the page.
pub mod fields {
    pub const TRIP_NAME: &str = "tripName";
    pub const DESTINATION: &str = "destination";
    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const TRAVELERS: &str = "travelers";
    pub const TRAVELER_NAMES: &str = "travelerNames";
    pub const TOTAL_BUDGET: &str = "totalBudget";
    pub const EXPENSE_DATE: &str = "expenseDate";
    pub const EXPENSE_CATEGORY: &str = "expenseCategory";
    pub const EXPENSE_DESCRIPTION: &str = "expenseDescription";
    pub const EXPENSE_AMOUNT: &str = "expenseAmount";
    pub const ITEM_CATEGORY: &str = "itemCategory";
    pub const ITEM_NAME: &str = "itemName";
    pub const ITEM_QUANTITY: &str = "itemQuantity";
    pub const ITEM_PACKED: &str = "itemPacked";
    pub const MEMORY_DATE: &str = "memoryDate";
    pub const MEMORY_TITLE: &str = "memoryTitle";
    pub const MEMORY_CONTENT: &str = "memoryContent";
    pub const MEMORY_PHOTO: &str = "memoryPhoto";

    /// Fields that carry the `required` marker on the page.
    pub const REQUIRED: &[&str] = &[
        TRIP_NAME,
        DESTINATION,
        START_DATE,
        END_DATE,
        MEMORY_DATE,
        MEMORY_TITLE,
        MEMORY_CONTENT,
    ];

    /// Title input paired with one itinerary day.
    pub fn day_title(day: u32) -> String {
        format!("day-title-{day}")
    }

    pub fn activity_title(day: u32) -> String {
        format!("activity-title-{day}")
    }

    pub fn activity_description(day: u32) -> String {
        format!("activity-desc-{day}")
    }

    pub fn activity_location(day: u32) -> String {
        format!("activity-location-{day}")
    }

    pub fn activity_cost(day: u32) -> String {
        format!("activity-cost-{day}")
    }
}

/// Current values of named inputs, the way a page would report them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: BTreeMap<String, String>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of `name`, or an empty string for an absent field.
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Checkbox state: `true`, `on`, `yes` and `1` count as checked.
    pub fn checked(&self, name: &str) -> bool {
        matches!(
            self.get(name).trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        )
    }

    /// Clears the listed inputs, as done after a successful submit.
    pub fn clear(&mut self, names: &[&str]) {
        for name in names {
            self.values.remove(*name);
        }
    }
}

/// Visual state of an input after it loses focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Valid,
    Error,
}

/// Blur check: a required field left blank is marked as errored.
pub fn field_state(fields: &FieldValues, name: &str) -> FieldState {
    if fields::REQUIRED.contains(&name) && fields.get(name).trim().is_empty() {
        FieldState::Error
    } else {
        FieldState::Valid
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripForm {
    pub name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub travelers: String,
    pub traveler_names: String,
}

impl TripForm {
    pub fn from_fields(values: &FieldValues) -> Self {
        Self {
            name: values.get(fields::TRIP_NAME).to_string(),
            destination: values.get(fields::DESTINATION).to_string(),
            start_date: values.get(fields::START_DATE).to_string(),
            end_date: values.get(fields::END_DATE).to_string(),
            travelers: values.get(fields::TRAVELERS).to_string(),
            traveler_names: values.get(fields::TRAVELER_NAMES).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityForm {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Blank or unparseable means a cost of 0.
    pub cost: String,
}

impl ActivityForm {
    /// Reads the activity inputs rendered for `day`.
    pub fn from_fields(values: &FieldValues, day: u32) -> Self {
        Self {
            title: values.get(&fields::activity_title(day)).to_string(),
            description: values.get(&fields::activity_description(day)).to_string(),
            location: values.get(&fields::activity_location(day)).to_string(),
            cost: values.get(&fields::activity_cost(day)).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub date: String,
    /// One of the fixed category labels; blank means `Other`.
    pub category: String,
    pub description: String,
    pub amount: String,
}

impl ExpenseForm {
    pub fn from_fields(values: &FieldValues) -> Self {
        Self {
            date: values.get(fields::EXPENSE_DATE).to_string(),
            category: values.get(fields::EXPENSE_CATEGORY).to_string(),
            description: values.get(fields::EXPENSE_DESCRIPTION).to_string(),
            amount: values.get(fields::EXPENSE_AMOUNT).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackingItemForm {
    pub category: String,
    pub name: String,
    pub quantity: String,
    pub packed: bool,
}

impl PackingItemForm {
    pub fn from_fields(values: &FieldValues) -> Self {
        Self {
            category: values.get(fields::ITEM_CATEGORY).to_string(),
            name: values.get(fields::ITEM_NAME).to_string(),
            quantity: values.get(fields::ITEM_QUANTITY).to_string(),
            packed: values.checked(fields::ITEM_PACKED),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryForm {
    pub date: String,
    pub title: String,
    pub content: String,
    /// Local image file picked for this memory.
    pub photo: Option<PathBuf>,
}

impl MemoryForm {
    pub fn from_fields(values: &FieldValues) -> Self {
        let photo = values.get(fields::MEMORY_PHOTO).trim();
        Self {
            date: values.get(fields::MEMORY_DATE).to_string(),
            title: values.get(fields::MEMORY_TITLE).to_string(),
            content: values.get(fields::MEMORY_CONTENT).to_string(),
            photo: (!photo.is_empty()).then(|| PathBuf::from(photo)),
        }
    }
}

/// Pre-filled date inputs for a fresh page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub expense_date: NaiveDate,
    pub memory_date: NaiveDate,
}

impl FormDefaults {
    /// Trip runs today through tomorrow; expense and memory dates are today.
    pub fn for_today(today: NaiveDate) -> Self {
        Self {
            start_date: today,
            end_date: next_day(today),
            expense_date: today,
            memory_date: today,
        }
    }

    /// Writes the defaults into `values`, leaving other fields untouched.
    pub fn apply(&self, values: &mut FieldValues) {
        values.set(fields::START_DATE, format_iso_date(self.start_date));
        values.set(fields::END_DATE, format_iso_date(self.end_date));
        values.set(fields::EXPENSE_DATE, format_iso_date(self.expense_date));
        values.set(fields::MEMORY_DATE, format_iso_date(self.memory_date));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_read_as_empty() {
        let values = FieldValues::new().with(fields::TRIP_NAME, "Lisbon");
        let form = TripForm::from_fields(&values);
        assert_eq!(form.name, "Lisbon");
        assert_eq!(form.destination, "");
    }

    #[test]
    fn checkbox_values_are_lenient() {
        let values = FieldValues::new()
            .with(fields::ITEM_PACKED, "on")
            .with(fields::ITEM_NAME, "Socks");
        assert!(PackingItemForm::from_fields(&values).packed);
        assert!(!FieldValues::new().checked(fields::ITEM_PACKED));
    }

    #[test]
    fn activity_form_reads_day_scoped_inputs() {
        let values = FieldValues::new()
            .with(fields::activity_title(2), "Museum")
            .with(fields::activity_cost(2), "12.5")
            .with(fields::activity_title(1), "Beach");
        let form = ActivityForm::from_fields(&values, 2);
        assert_eq!(form.title, "Museum");
        assert_eq!(form.cost, "12.5");
    }

    #[test]
    fn blank_required_field_is_marked_on_blur() {
        let values = FieldValues::new().with(fields::TRIP_NAME, "  ");
        assert_eq!(field_state(&values, fields::TRIP_NAME), FieldState::Error);
        assert_eq!(field_state(&values, fields::TRAVELERS), FieldState::Valid);
    }

    #[test]
    fn defaults_fill_today_and_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let mut values = FieldValues::new();
        FormDefaults::for_today(today).apply(&mut values);
        assert_eq!(values.get(fields::START_DATE), "2024-12-31");
        assert_eq!(values.get(fields::END_DATE), "2025-01-01");
        assert_eq!(values.get(fields::MEMORY_DATE), "2024-12-31");
    }

    #[test]
    fn memory_form_ignores_blank_photo() {
        let values = FieldValues::new().with(fields::MEMORY_PHOTO, " ");
        assert_eq!(MemoryForm::from_fields(&values).photo, None);
    }
}
