//! Budget ledger model and derived summary values.
//!
//! # Invariants
//! - `Budget::total == 0.0` means no budget has been set.
//! - Every stored `Expense::amount` is strictly positive.
//! - Summary values are derived on demand and never stored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one expense entry.
pub type ExpenseId = Uuid;

/// Percentage at which the progress bar turns yellow.
pub const WARNING_THRESHOLD_PERCENT: f64 = 75.0;
/// Percentage above which the progress bar turns red.
pub const DANGER_THRESHOLD_PERCENT: f64 = 90.0;

/// Total allowance plus its ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Budget {
    pub total: f64,
    pub expenses: Vec<Expense>,
}

impl Budget {
    /// Whether a positive total has been set.
    pub fn is_set(&self) -> bool {
        self.total > 0.0
    }

    /// Computes spent/remaining/percentage for display.
    pub fn summary(&self) -> BudgetSummary {
        let spent: f64 = self.expenses.iter().map(|expense| expense.amount).sum();
        let percentage_used = if self.total > 0.0 {
            spent / self.total * 100.0
        } else {
            0.0
        };
        BudgetSummary {
            total: self.total,
            spent,
            remaining: self.total - spent,
            percentage_used,
        }
    }
}

/// Fixed expense category label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Accommodation,
    Transportation,
    Food,
    Activities,
    Shopping,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Accommodation,
        ExpenseCategory::Transportation,
        ExpenseCategory::Food,
        ExpenseCategory::Activities,
        ExpenseCategory::Shopping,
        ExpenseCategory::Other,
    ];

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Accommodation => "Accommodation",
            Self::Transportation => "Transportation",
            Self::Food => "Food",
            Self::Activities => "Activities",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(needle))
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One recorded spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub description: String,
    pub amount: f64,
}

/// Derived budget figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetSummary {
    pub total: f64,
    pub spent: f64,
    pub remaining: f64,
    pub percentage_used: f64,
}

impl BudgetSummary {
    pub fn band(&self) -> ProgressBand {
        ProgressBand::for_percentage(self.percentage_used)
    }

    /// Progress bar width in percent, capped at 100.
    pub fn bar_width(&self) -> f64 {
        self.percentage_used.clamp(0.0, 100.0)
    }
}

/// Color band of the budget progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    Green,
    Yellow,
    Red,
}

impl ProgressBand {
    /// Green below 75%, yellow from 75% through 90%, red above 90%.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage > DANGER_THRESHOLD_PERCENT {
            Self::Red
        } else if percentage >= WARNING_THRESHOLD_PERCENT {
            Self::Yellow
        } else {
            Self::Green
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Green => "#28a745",
            Self::Yellow => "#ffc107",
            Self::Red => "#dc3545",
        }
    }
}
