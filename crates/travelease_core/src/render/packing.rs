//! Packing section renderer: category tabs, filtered item list and progress.

use crate::model::packing::{categories, CategoryFilter, PackingItem, PackingProgress};
use crate::render::{escape_html, format_percent, BoundAction, Fragment};
use crate::text::capitalize_first;

/// "All Items" tab plus one tab per distinct category.
///
/// The tab matching `active` carries the `active` class.
pub fn render_category_tabs(items: &[PackingItem], active: &CategoryFilter) -> Fragment {
    let mut fragment = Fragment::default();
    push_tab(&mut fragment, "category-tab-all", "all", "All Items", CategoryFilter::All, active);
    for (index, category) in categories(items).into_iter().enumerate() {
        let label = capitalize_first(&category);
        push_tab(
            &mut fragment,
            &format!("category-tab-{index}"),
            &category,
            &label,
            CategoryFilter::Category(category.clone()),
            active,
        );
    }
    fragment
}

fn push_tab(
    fragment: &mut Fragment,
    target: &str,
    category: &str,
    label: &str,
    filter: CategoryFilter,
    active: &CategoryFilter,
) {
    let class = if &filter == active {
        "category-tab active"
    } else {
        "category-tab"
    };
    fragment.markup.push_str(&format!(
        r#"<button class="{class}" id="{target}" data-category="{category}">{label}</button>
"#,
        category = escape_html(category),
        label = escape_html(label),
    ));
    fragment.bind(target, BoundAction::SelectCategory(filter));
}

/// Moves the `active` class within already rendered tabs onto the tab bound
/// to `active`. Tab bindings are left untouched.
pub fn mark_active_tab(tabs: &mut Fragment, active: &CategoryFilter) {
    let Some(target) = tabs.bindings.iter().find_map(|binding| match &binding.action {
        BoundAction::SelectCategory(filter) if filter == active => Some(binding.target.clone()),
        _ => None,
    }) else {
        return;
    };
    let markup = tabs
        .markup
        .replace(r#"class="category-tab active""#, r#"class="category-tab""#);
    tabs.markup = markup.replace(
        &format!(r#"class="category-tab" id="{target}""#),
        &format!(r#"class="category-tab active" id="{target}""#),
    );
}

/// Items visible under `filter`, each with a packed checkbox and delete control.
pub fn render_items_list(items: &[PackingItem], filter: &CategoryFilter) -> Fragment {
    let mut fragment = Fragment::default();
    for item in filter.apply(items) {
        let toggle_id = format!("toggle-item-{}", item.id);
        let delete_id = format!("delete-item-{}", item.id);
        let (row_class, checked) = if item.packed {
            ("packing-item packed", " checked")
        } else {
            ("packing-item", "")
        };
        fragment.markup.push_str(&format!(
            r#"<div class="{row_class}">
<label class="checkbox-label">
<input type="checkbox" id="{toggle_id}" data-id="{id}"{checked}>
<span class="checkmark"></span>
</label>
<div class="item-info">
<div class="item-name">{name}</div>
<div class="item-quantity">Qty: {quantity}</div>
<div class="item-category">{category}</div>
</div>
<button class="btn-icon delete-item" id="{delete_id}" data-id="{id}"><i class="fas fa-trash"></i></button>
</div>
"#,
            id = item.id,
            name = escape_html(&item.name),
            quantity = item.quantity,
            category = escape_html(&item.category),
        ));
        fragment.bind(toggle_id, BoundAction::TogglePacked(item.id));
        fragment.bind(delete_id, BoundAction::DeletePackingItem(item.id));
    }
    fragment
}

/// Packed-share bar and its percentage label.
pub fn render_packing_progress(progress: &PackingProgress) -> Fragment {
    let percentage = progress.percentage();
    Fragment::static_markup(format!(
        r#"<div class="progress-bar" id="packingProgress" style="width: {percentage:.1}%;"></div>
<span id="packingPercentage">{label}</span>
<span class="packing-count">{packed} of {total} packed</span>
"#,
        label = format_percent(percentage),
        packed = progress.packed,
        total = progress.total,
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        mark_active_tab, render_category_tabs, render_items_list, render_packing_progress,
    };
    use crate::model::packing::{CategoryFilter, PackingItem, PackingProgress};
    use crate::render::BoundAction;
    use uuid::Uuid;

    fn item(category: &str, name: &str, packed: bool) -> PackingItem {
        PackingItem {
            id: Uuid::new_v4(),
            category: category.to_string(),
            name: name.to_string(),
            quantity: 2,
            packed,
        }
    }

    #[test]
    fn tabs_list_all_then_each_category_once() {
        let items = vec![
            item("clothes", "Shirt", false),
            item("documents", "Passport", true),
            item("clothes", "Socks", false),
        ];
        let fragment = render_category_tabs(&items, &CategoryFilter::All);
        assert_eq!(fragment.bindings.len(), 3);
        assert!(fragment
            .markup
            .contains(r#"class="category-tab active" id="category-tab-all""#));
        assert!(fragment.markup.contains(">Clothes</button>"));
        assert!(fragment.markup.contains(">Documents</button>"));
        assert_eq!(
            fragment.action_for("category-tab-1"),
            Some(&BoundAction::SelectCategory(CategoryFilter::Category(
                "documents".to_string()
            )))
        );
    }

    #[test]
    fn active_class_moves_without_rebuilding_bindings() {
        let items = vec![item("clothes", "Shirt", false), item("documents", "Passport", false)];
        let mut tabs = render_category_tabs(&items, &CategoryFilter::All);
        let bindings = tabs.bindings.clone();

        mark_active_tab(&mut tabs, &CategoryFilter::Category("documents".to_string()));
        assert_eq!(tabs.markup.matches("category-tab active").count(), 1);
        assert!(tabs
            .markup
            .contains(r#"class="category-tab active" id="category-tab-1""#));
        assert_eq!(tabs.bindings, bindings);

        let before = tabs.markup.clone();
        mark_active_tab(&mut tabs, &CategoryFilter::Category("snacks".to_string()));
        assert_eq!(tabs.markup, before);
    }

    #[test]
    fn item_list_honors_filter_and_packed_state() {
        let passport = item("documents", "Passport", true);
        let items = vec![item("clothes", "Shirt", false), passport.clone()];
        let fragment =
            render_items_list(&items, &CategoryFilter::Category("documents".to_string()));
        assert!(fragment.markup.contains("Passport"));
        assert!(!fragment.markup.contains("Shirt"));
        assert!(fragment.markup.contains("packing-item packed"));
        assert!(fragment.markup.contains(" checked>"));
        assert_eq!(
            fragment.action_for(&format!("toggle-item-{}", passport.id)),
            Some(&BoundAction::TogglePacked(passport.id))
        );
    }

    #[test]
    fn progress_label_uses_one_decimal() {
        let progress = PackingProgress { packed: 1, total: 3 };
        let markup = render_packing_progress(&progress).markup;
        assert!(markup.contains("33.3%"));
        assert!(markup.contains("1 of 3 packed"));
    }
}
