use std::collections::VecDeque;
use std::io::Write;
use travelease_core::forms::{fields, FieldValues, FormDefaults};
use travelease_core::model::packing::CategoryFilter;
use travelease_core::render::Container;
use travelease_core::ui::app::{BUDGET_SET, ITINERARY_SAVED, MEMORY_SAVED};
use travelease_core::{App, Control, MemoryStateRepository, Outcome, Prompt};

/// Records alerts and answers confirmations from a queue (default: yes).
#[derive(Default)]
struct ScriptedPrompt {
    alerts: Vec<String>,
    questions: Vec<String>,
    answers: VecDeque<bool>,
}

impl Prompt for ScriptedPrompt {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(true)
    }
}

fn trip_fields() -> FieldValues {
    FieldValues::new()
        .with(fields::TRIP_NAME, "Kyoto")
        .with(fields::DESTINATION, "Japan")
        .with(fields::START_DATE, "2024-06-01")
        .with(fields::END_DATE, "2024-06-03")
        .with(fields::TRAVELER_NAMES, "Mei & Sam")
}

#[test]
fn day_and_activity_controls_round_trip_through_bindings() {
    let mut prompt = ScriptedPrompt::default();
    let mut app = App::start(MemoryStateRepository::new(), &mut prompt).unwrap();
    let mut values = trip_fields();

    assert_eq!(
        app.submit(Control::GenerateItinerary, &mut values).unwrap(),
        Outcome::Applied
    );
    assert!(app
        .page()
        .markup(Container::ItineraryDays)
        .contains("Day 3 - June 3, 2024"));

    values.set(fields::activity_title(2), "Fushimi Inari");
    values.set(fields::activity_cost(2), "0");
    assert_eq!(
        app.activate("add-activity-2", &mut values).unwrap(),
        Outcome::Applied
    );
    assert_eq!(values.get(&fields::activity_title(2)), "");
    let activity_id = app.store().state().itinerary[1].activities[0].id;

    values.set(fields::day_title(1), "Arrival");
    app.activate("save-title-1", &mut values).unwrap();
    assert_eq!(app.store().state().itinerary[0].title, "Arrival");

    assert_eq!(
        app.activate("delete-day-1", &mut values).unwrap(),
        Outcome::Applied
    );
    let days = &app.store().state().itinerary;
    assert_eq!(days.len(), 2);
    assert_eq!(days[0].activities[0].id, activity_id);

    let delete_activity = format!("delete-activity-{activity_id}");
    assert!(app.page().binding(&delete_activity).is_some());
    app.activate(&delete_activity, &mut values).unwrap();
    assert!(app.store().state().itinerary[0].activities.is_empty());
    assert!(app.page().binding(&delete_activity).is_none());

    assert_eq!(
        app.submit(Control::SaveItinerary, &mut values).unwrap(),
        Outcome::Applied
    );
    drop(app);
    assert_eq!(prompt.alerts, vec![ITINERARY_SAVED.to_string()]);
    assert_eq!(
        prompt.questions,
        vec!["Are you sure you want to delete this day?".to_string()]
    );
}

#[test]
fn declined_confirmation_cancels_delete() {
    let mut prompt = ScriptedPrompt {
        answers: VecDeque::from([false]),
        ..ScriptedPrompt::default()
    };
    let mut app = App::start(MemoryStateRepository::new(), &mut prompt).unwrap();
    let mut values = FieldValues::new()
        .with(fields::ITEM_NAME, "Umbrella")
        .with(fields::ITEM_QUANTITY, "1");
    app.submit(Control::AddPackingItem, &mut values).unwrap();
    assert_eq!(values.get(fields::ITEM_NAME), "");
    assert_eq!(values.get(fields::ITEM_QUANTITY), "1");

    let id = app.store().state().packing_list[0].id;
    let target = format!("delete-item-{id}");
    assert_eq!(
        app.activate(&target, &mut values).unwrap(),
        Outcome::Cancelled
    );
    assert_eq!(app.store().state().packing_list.len(), 1);
    assert_eq!(
        app.activate(&target, &mut values).unwrap(),
        Outcome::Applied
    );
    assert!(app.store().state().packing_list.is_empty());
}

#[test]
fn category_tab_filters_items_without_touching_storage() {
    let repo = MemoryStateRepository::new();
    let mut app = App::start(&repo, ScriptedPrompt::default()).unwrap();
    for (category, name) in [("clothes", "Jacket"), ("documents", "Passport")] {
        let mut values = FieldValues::new()
            .with(fields::ITEM_CATEGORY, category)
            .with(fields::ITEM_NAME, name)
            .with(fields::ITEM_QUANTITY, "1");
        app.submit(Control::AddPackingItem, &mut values).unwrap();
    }
    let stored = repo.blob();

    let mut values = FieldValues::new();
    app.activate("category-tab-1", &mut values).unwrap();
    {
        let page = app.page();
        let items = page.markup(Container::ItemsList);
        assert!(items.contains("Passport"));
        assert!(!items.contains("Jacket"));
        assert!(page
            .markup(Container::CategoryTabs)
            .contains(r#"class="category-tab active" id="category-tab-1""#));
    }
    assert_eq!(repo.blob(), stored);

    let passport = app.store().state().packing_list[1].id;
    app.activate(&format!("toggle-item-{passport}"), &mut values)
        .unwrap();
    assert!(app
        .page()
        .markup(Container::PackingProgress)
        .contains("50.0%"));
    assert!(!app.page().markup(Container::ItemsList).contains("Jacket"));
}

fn add_item(app: &mut App<MemoryStateRepository, ScriptedPrompt>, category: &str, name: &str) {
    let mut values = FieldValues::new()
        .with(fields::ITEM_CATEGORY, category)
        .with(fields::ITEM_NAME, name)
        .with(fields::ITEM_QUANTITY, "1");
    app.submit(Control::AddPackingItem, &mut values).unwrap();
}

#[test]
fn adding_or_deleting_an_item_returns_to_all_items() {
    let mut app = App::start(MemoryStateRepository::new(), ScriptedPrompt::default()).unwrap();
    add_item(&mut app, "clothes", "Jacket");
    add_item(&mut app, "documents", "Passport");

    let mut values = FieldValues::new();
    app.activate("category-tab-1", &mut values).unwrap();
    assert!(!app.page().markup(Container::ItemsList).contains("Jacket"));

    add_item(&mut app, "clothes", "Scarf");
    {
        let page = app.page();
        assert_eq!(page.active_category(), &CategoryFilter::All);
        let items = page.markup(Container::ItemsList);
        assert!(items.contains("Scarf"));
        assert!(items.contains("Jacket"));
        assert!(page
            .markup(Container::CategoryTabs)
            .contains(r#"class="category-tab active" id="category-tab-all""#));
    }

    app.activate("category-tab-1", &mut values).unwrap();
    let passport = app.store().state().packing_list[1].id;
    app.activate(&format!("toggle-item-{passport}"), &mut values)
        .unwrap();
    assert_eq!(
        app.page().active_category(),
        &CategoryFilter::Category("documents".to_string())
    );

    let scarf = app.store().state().packing_list[2].id;
    app.activate(&format!("delete-item-{scarf}"), &mut values)
        .unwrap();
    assert_eq!(app.page().active_category(), &CategoryFilter::All);
    assert!(app.page().markup(Container::ItemsList).contains("Jacket"));
}

#[test]
fn budget_and_expense_flow_renders_summary() {
    let mut prompt = ScriptedPrompt::default();
    let mut app = App::start(MemoryStateRepository::new(), &mut prompt).unwrap();
    let mut values = FieldValues::new().with(fields::TOTAL_BUDGET, "500");
    app.submit(Control::SetBudget, &mut values).unwrap();

    for amount in ["100", "250"] {
        values.set(fields::EXPENSE_DATE, "2024-06-02");
        values.set(fields::EXPENSE_CATEGORY, "Transportation");
        values.set(fields::EXPENSE_DESCRIPTION, "Shinkansen");
        values.set(fields::EXPENSE_AMOUNT, amount);
        assert_eq!(
            app.submit(Control::AddExpense, &mut values).unwrap(),
            Outcome::Applied
        );
        assert_eq!(values.get(fields::EXPENSE_AMOUNT), "");
    }

    let summary = app.page().markup(Container::BudgetSummary).to_string();
    assert!(summary.contains(r#"<p id="summaryRemaining">$150.00</p>"#));
    assert!(summary.contains(r#"<p id="summaryPercentage">70.0%</p>"#));

    let first = app.store().state().budget.expenses[0].id;
    app.activate(&format!("delete-expense-{first}"), &mut values)
        .unwrap();
    assert!(app
        .page()
        .markup(Container::BudgetSummary)
        .contains(r#"<p id="summarySpent">$250.00</p>"#));
    drop(app);
    assert_eq!(prompt.alerts, vec![BUDGET_SET.to_string()]);
}

#[test]
fn story_renders_header_and_sorted_memories_with_live_photo() {
    let mut photo = tempfile::NamedTempFile::new().unwrap();
    photo.write_all(b"png").unwrap();

    let mut prompt = ScriptedPrompt::default();
    let mut app = App::start(MemoryStateRepository::new(), &mut prompt).unwrap();

    let mut values = FieldValues::new();
    assert!(matches!(
        app.submit(Control::GenerateStory, &mut values).unwrap(),
        Outcome::Rejected(_)
    ));
    assert!(app.page().fragment(Container::StoryContent).is_none());

    let mut values = trip_fields();
    app.submit(Control::GenerateItinerary, &mut values).unwrap();
    for (date, title, with_photo) in [
        ("2024-06-03", "Gion at night", false),
        ("2024-06-01", "Arrival", true),
    ] {
        values.set(fields::MEMORY_DATE, date);
        values.set(fields::MEMORY_TITLE, title);
        values.set(fields::MEMORY_CONTENT, "Unforgettable.");
        if with_photo {
            values.set(fields::MEMORY_PHOTO, photo.path().to_string_lossy());
        }
        app.submit(Control::SaveMemory, &mut values).unwrap();
        assert_eq!(values.get(fields::MEMORY_PHOTO), "");
    }
    assert_eq!(app.photos().live_count(), 1);

    app.submit(Control::GenerateStory, &mut values).unwrap();
    let story = app.page().markup(Container::StoryContent).to_string();
    assert!(story.contains("<h2>Kyoto</h2>"));
    assert!(story.contains("<strong>Travel Companions:</strong> Mei &amp; Sam"));
    assert!(story.contains("June 1, 2024 to June 3, 2024"));
    let arrival = story.find("Arrival").unwrap();
    let gion = story.find("Gion at night").unwrap();
    assert!(arrival < gion);
    assert!(story.contains(r#"<img src="blob:travelease/"#));

    assert_eq!(app.shutdown(), 1);
    assert_eq!(app.photos().live_count(), 0);
    drop(app);
    assert_eq!(
        prompt.alerts,
        vec![
            "Please create a trip first.".to_string(),
            MEMORY_SAVED.to_string(),
            MEMORY_SAVED.to_string(),
        ]
    );
}

#[test]
fn startup_renders_saved_sections_and_theme() {
    let repo = MemoryStateRepository::new();
    {
        let mut app = App::start(&repo, ScriptedPrompt::default()).unwrap();
        let mut values = trip_fields();
        FormDefaults::for_today(chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
            .apply(&mut values);
        values.set(fields::START_DATE, "2024-06-01");
        values.set(fields::END_DATE, "2024-06-02");
        app.submit(Control::GenerateItinerary, &mut values).unwrap();
        app.submit(Control::ToggleTheme, &mut values).unwrap();
        assert!(app.page().markup(Container::ThemeToggle).contains("fa-sun"));
    }

    let app = App::start(&repo, ScriptedPrompt::default()).unwrap();
    let page = app.page();
    assert_eq!(page.body_class(), "dark-mode");
    assert!(page.markup(Container::ItineraryDays).contains("Day 2 - June 2, 2024"));
    assert!(page.fragment(Container::BudgetSummary).is_none());
    assert!(page.fragment(Container::MemoriesList).is_none());
}

#[test]
fn print_document_requires_trip_and_lists_days() {
    let mut app = App::start(MemoryStateRepository::new(), ScriptedPrompt::default()).unwrap();
    let mut values = trip_fields();
    app.submit(Control::GenerateItinerary, &mut values).unwrap();

    let Outcome::Printed(document) = app.submit(Control::PrintItinerary, &mut values).unwrap()
    else {
        panic!("expected a print document");
    };
    assert_eq!(document.title, "Kyoto - Itinerary");
    assert!(document.html.contains("Day 3 - June 3, 2024"));
    assert!(document.html.contains("<strong>Travelers:</strong> Mei &amp; Sam"));
}
