//! Section renderers.
//!
//! # Responsibility
//! - Turn state into markup fragments, one per page container.
//! - Declare, next to the markup, which element triggers which action.
//!
//! # Invariants
//! - Renderers are pure: same state in, same markup and bindings out.
//! - Every piece of traveler-provided text is HTML-escaped.
//! - Every interactive element emitted carries an `id` matching exactly one
//!   binding of the same fragment.

pub mod budget;
pub mod itinerary;
pub mod memories;
pub mod packing;
pub mod print;
pub mod story;

use crate::model::budget::ExpenseId;
use crate::model::memory::MemoryId;
use crate::model::packing::{CategoryFilter, PackingItemId};
use crate::model::trip::ActivityId;

/// Page container a fragment is installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    ThemeToggle,
    ItineraryDays,
    BudgetSummary,
    ExpenseList,
    CategoryTabs,
    ItemsList,
    PackingProgress,
    MemoriesList,
    StoryContent,
}

impl Container {
    /// Element id of the container on the page.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::ThemeToggle => "themeToggle",
            Self::ItineraryDays => "itineraryDays",
            Self::BudgetSummary => "budgetSummary",
            Self::ExpenseList => "expenseList",
            Self::CategoryTabs => "categoryTabs",
            Self::ItemsList => "itemsList",
            Self::PackingProgress => "packingProgressBar",
            Self::MemoriesList => "memoriesList",
            Self::StoryContent => "storyContent",
        }
    }
}

/// Action triggered by an element created during a render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundAction {
    DeleteDay(u32),
    /// Reads the day's paired title input.
    SaveDayTitle(u32),
    /// Reads the day's activity inputs.
    AddActivity(u32),
    DeleteActivity { day: u32, activity: ActivityId },
    DeleteExpense(ExpenseId),
    TogglePacked(PackingItemId),
    DeletePackingItem(PackingItemId),
    SelectCategory(CategoryFilter),
    DeleteMemory(MemoryId),
}

/// Element id paired with the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub target: String,
    pub action: BoundAction,
}

/// Rendered markup plus the handlers for the elements inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub markup: String,
    pub bindings: Vec<Binding>,
}

impl Fragment {
    /// Markup with no interactive elements.
    pub fn static_markup(markup: String) -> Self {
        Self {
            markup,
            bindings: Vec::new(),
        }
    }

    pub(crate) fn bind(&mut self, target: impl Into<String>, action: BoundAction) {
        self.bindings.push(Binding {
            target: target.into(),
            action,
        });
    }

    /// Action bound to `target`, if any.
    pub fn action_for(&self, target: &str) -> Option<&BoundAction> {
        self.bindings
            .iter()
            .find(|binding| binding.target == target)
            .map(|binding| &binding.action)
    }
}

/// Renders the theme toggle icon: sun while dark, moon while light.
pub fn render_theme_toggle(dark_mode: bool) -> Fragment {
    let icon = if dark_mode { "fa-sun" } else { "fa-moon" };
    Fragment::static_markup(format!(r#"<i class="fas {icon}"></i>"#))
}

/// Class applied to the page body for the current theme.
pub fn body_class(dark_mode: bool) -> &'static str {
    if dark_mode {
        "dark-mode"
    } else {
        ""
    }
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `$1234.50` style amount.
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// `70.0%` style percentage.
pub fn format_percent(percentage: f64) -> String {
    format!("{percentage:.1}%")
}
