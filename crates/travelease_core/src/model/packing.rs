//! Packing list model, category filter and progress.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of one packing item.
pub type PackingItemId = Uuid;

/// One thing to bring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingItem {
    pub id: PackingItemId,
    /// Free-text grouping, e.g. `clothes` or `documents`.
    pub category: String,
    pub name: String,
    /// Always at least 1.
    pub quantity: u32,
    pub packed: bool,
}

/// Distinct categories in order of first appearance.
pub fn categories(items: &[PackingItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|category| category == &item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}

/// Which items the list view shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    pub fn matches(&self, item: &PackingItem) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => &item.category == category,
        }
    }

    /// Items visible under this filter, in list order.
    pub fn apply<'a>(&self, items: &'a [PackingItem]) -> Vec<&'a PackingItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Packed versus total item counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackingProgress {
    pub packed: usize,
    pub total: usize,
}

impl PackingProgress {
    pub fn of(items: &[PackingItem]) -> Self {
        Self {
            packed: items.iter().filter(|item| item.packed).count(),
            total: items.len(),
        }
    }

    /// Packed share in percent; 0 for an empty list.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.packed as f64 / self.total as f64 * 100.0
        }
    }
}
