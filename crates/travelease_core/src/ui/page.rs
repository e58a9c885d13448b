//! Rendered page: one fragment per container plus view-only state.

use crate::model::packing::{CategoryFilter, PackingItem, PackingProgress};
use crate::model::state::AppState;
use crate::render::budget::{render_budget_summary, render_expense_list};
use crate::render::itinerary::render_itinerary;
use crate::render::memories::render_memories;
use crate::render::packing::{
    mark_active_tab, render_category_tabs, render_items_list, render_packing_progress,
};
use crate::render::{body_class, render_theme_toggle, BoundAction, Container, Fragment};
use crate::service::store::Section;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct Page {
    containers: BTreeMap<Container, Fragment>,
    dark_mode: bool,
    active_category: CategoryFilter,
}

impl Page {
    /// Page as first shown: theme always, other sections only with content.
    pub fn initial(state: &AppState) -> Self {
        let mut page = Self::default();
        page.render(Section::Theme, state);
        if state.current_trip.is_some() {
            page.render(Section::Itinerary, state);
        }
        if state.budget.is_set() {
            page.render(Section::Budget, state);
        }
        if !state.packing_list.is_empty() {
            page.render(Section::Packing, state);
        }
        if !state.memories.is_empty() {
            page.render(Section::Memories, state);
        }
        page
    }

    /// Replaces the container's content and its bindings.
    pub fn install(&mut self, container: Container, fragment: Fragment) {
        self.containers.insert(container, fragment);
    }

    pub fn fragment(&self, container: Container) -> Option<&Fragment> {
        self.containers.get(&container)
    }

    /// Container markup; empty when nothing was rendered into it yet.
    pub fn markup(&self, container: Container) -> &str {
        self.fragment(container)
            .map(|fragment| fragment.markup.as_str())
            .unwrap_or("")
    }

    /// Action bound to the element `target`, searching every container.
    pub fn binding(&self, target: &str) -> Option<&BoundAction> {
        self.containers
            .values()
            .find_map(|fragment| fragment.action_for(target))
    }

    pub fn body_class(&self) -> &'static str {
        body_class(self.dark_mode)
    }

    pub fn active_category(&self) -> &CategoryFilter {
        &self.active_category
    }

    /// Full re-render of every container belonging to `section`.
    pub fn render(&mut self, section: Section, state: &AppState) {
        match section {
            Section::Theme => {
                self.dark_mode = state.dark_mode;
                self.install(Container::ThemeToggle, render_theme_toggle(state.dark_mode));
            }
            Section::Itinerary => {
                self.install(Container::ItineraryDays, render_itinerary(&state.itinerary));
            }
            Section::Budget => {
                let summary = state.budget.summary();
                self.install(Container::BudgetSummary, render_budget_summary(&summary));
                self.install(
                    Container::ExpenseList,
                    render_expense_list(&state.budget.expenses),
                );
            }
            Section::Packing => self.render_packing(&state.packing_list),
            Section::Memories => {
                self.install(Container::MemoriesList, render_memories(&state.memories));
            }
        }
    }

    /// Switches the packing filter. Only the item list is re-rendered; the
    /// tab bar keeps its elements and just moves the `active` class.
    pub fn select_category(&mut self, filter: CategoryFilter, items: &[PackingItem]) {
        if let Some(tabs) = self.containers.get_mut(&Container::CategoryTabs) {
            mark_active_tab(tabs, &filter);
        }
        self.active_category = filter;
        self.install(
            Container::ItemsList,
            render_items_list(items, &self.active_category),
        );
    }

    /// Back to "All Items" after the list itself changed.
    pub fn reset_packing_filter(&mut self, items: &[PackingItem]) {
        self.active_category = CategoryFilter::All;
        self.render_packing_lists(items);
    }

    fn render_packing(&mut self, items: &[PackingItem]) {
        // A filter whose last item was deleted falls back to all items.
        if let CategoryFilter::Category(category) = &self.active_category {
            if !items.iter().any(|item| &item.category == category) {
                self.active_category = CategoryFilter::All;
            }
        }
        self.render_packing_lists(items);
        self.install(
            Container::PackingProgress,
            render_packing_progress(&PackingProgress::of(items)),
        );
    }

    fn render_packing_lists(&mut self, items: &[PackingItem]) {
        let tabs = render_category_tabs(items, &self.active_category);
        let list = render_items_list(items, &self.active_category);
        self.install(Container::CategoryTabs, tabs);
        self.install(Container::ItemsList, list);
    }
}
