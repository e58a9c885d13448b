//! User-facing validation failures.
//!
//! Every variant maps to one blocking notification shown to the traveler.
//! A mutator that returns one of these has not touched state.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Trip name, destination, start or end date is blank.
    MissingTripDetails,
    /// A date field does not hold a `YYYY-MM-DD` calendar date.
    InvalidDate { field: &'static str, value: String },
    /// Trip end date precedes its start date.
    EndBeforeStart,
    /// Trip spans more calendar days than an itinerary may hold.
    TripTooLong { days: u32, max: u32 },
    /// Traveler count is present but not a non-negative integer.
    InvalidTravelerCount(String),
    /// Operation needs an existing trip.
    NoTrip,
    /// Activity title is blank.
    MissingActivityTitle,
    /// Activity cost parsed to a negative number.
    NegativeActivityCost,
    /// Budget total is not a positive number.
    InvalidBudgetAmount,
    /// Expense added before any budget total was set.
    BudgetNotSet,
    /// Expense date, description or amount is missing or invalid.
    InvalidExpense,
    /// Expense category is not one of the fixed labels.
    UnknownExpenseCategory(String),
    /// Packing item name is blank or quantity is not a positive integer.
    InvalidPackingItem,
    /// Memory date, title or content is blank.
    IncompleteMemory,
    /// Story requested with no memories recorded.
    NoMemories,
}

impl ValidationError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingTripDetails => "missing_trip_details",
            Self::InvalidDate { .. } => "invalid_date",
            Self::EndBeforeStart => "end_before_start",
            Self::TripTooLong { .. } => "trip_too_long",
            Self::InvalidTravelerCount(_) => "invalid_traveler_count",
            Self::NoTrip => "no_trip",
            Self::MissingActivityTitle => "missing_activity_title",
            Self::NegativeActivityCost => "negative_activity_cost",
            Self::InvalidBudgetAmount => "invalid_budget_amount",
            Self::BudgetNotSet => "budget_not_set",
            Self::InvalidExpense => "invalid_expense",
            Self::UnknownExpenseCategory(_) => "unknown_expense_category",
            Self::InvalidPackingItem => "invalid_packing_item",
            Self::IncompleteMemory => "incomplete_memory",
            Self::NoMemories => "no_memories",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTripDetails => write!(f, "Please fill in all required trip details."),
            Self::InvalidDate { field, value } => {
                write!(f, "Please enter a valid date for {field} (got `{value}`).")
            }
            Self::EndBeforeStart => write!(f, "The end date cannot be before the start date."),
            Self::TripTooLong { days, max } => write!(
                f,
                "A trip can last at most {max} days (these dates span {days})."
            ),
            Self::InvalidTravelerCount(value) => {
                write!(f, "Please enter a valid number of travelers (got `{value}`).")
            }
            Self::NoTrip => write!(f, "Please create a trip first."),
            Self::MissingActivityTitle => {
                write!(f, "Please enter at least a title for the activity.")
            }
            Self::NegativeActivityCost => write!(f, "Activity cost cannot be negative."),
            Self::InvalidBudgetAmount => write!(f, "Please enter a valid budget amount."),
            Self::BudgetNotSet => write!(f, "Please set a budget first."),
            Self::InvalidExpense => write!(f, "Please fill in all expense details correctly."),
            Self::UnknownExpenseCategory(value) => {
                write!(f, "Unknown expense category `{value}`.")
            }
            Self::InvalidPackingItem => {
                write!(f, "Please enter a valid item name and quantity.")
            }
            Self::IncompleteMemory => write!(
                f,
                "Please fill in date, title, and content for your memory."
            ),
            Self::NoMemories => write!(
                f,
                "Please add some memories first to generate a story."
            ),
        }
    }
}

impl Error for ValidationError {}
