//! Application controller wiring store, page, prompt and photo handles.

use crate::forms::{
    fields, ActivityForm, ExpenseForm, FieldValues, MemoryForm, PackingItemForm, TripForm,
};
use crate::model::budget::ExpenseId;
use crate::model::memory::MemoryId;
use crate::model::packing::{CategoryFilter, PackingItemId};
use crate::model::trip::ActivityId;
use crate::model::validation::ValidationError;
use crate::photos::PhotoRegistry;
use crate::render::print::{render_print_document, PrintDocument};
use crate::render::story::render_story;
use crate::render::{BoundAction, Container};
use crate::repo::state_repo::StateRepository;
use crate::service::store::{StoreError, StoreResult, TravelStore};
use crate::ui::page::Page;
use crate::ui::Prompt;
use log::{info, warn};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub const ITINERARY_SAVED: &str = "Itinerary saved successfully!";
pub const BUDGET_SET: &str = "Budget set successfully!";
pub const MEMORY_SAVED: &str = "Memory saved successfully!";

const CONFIRM_DELETE_DAY: &str = "Are you sure you want to delete this day?";
const CONFIRM_DELETE_EXPENSE: &str = "Are you sure you want to delete this expense?";
const CONFIRM_DELETE_ITEM: &str = "Are you sure you want to delete this item?";
const CONFIRM_DELETE_MEMORY: &str = "Are you sure you want to delete this memory?";

/// Every operation the page can request.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateTrip(TripForm),
    AddDay,
    DeleteDay(u32),
    RenameDay { day: u32, title: String },
    AddActivity { day: u32, form: ActivityForm },
    DeleteActivity { day: u32, activity: ActivityId },
    SaveItinerary,
    PrintItinerary,
    SetBudget(String),
    AddExpense(ExpenseForm),
    DeleteExpense(ExpenseId),
    AddPackingItem(PackingItemForm),
    TogglePacked(PackingItemId),
    DeletePackingItem(PackingItemId),
    SelectCategory(CategoryFilter),
    SaveMemory(MemoryForm),
    DeleteMemory(MemoryId),
    GenerateStory,
    ToggleTheme,
}

/// Fixed buttons that exist on the page independent of any render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    GenerateItinerary,
    AddDay,
    SaveItinerary,
    PrintItinerary,
    SetBudget,
    AddExpense,
    AddPackingItem,
    SaveMemory,
    GenerateStory,
    ToggleTheme,
}

/// What happened to a dispatched command.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    /// Target no longer exists; nothing changed.
    Ignored,
    /// Traveler declined the confirmation.
    Cancelled,
    /// Input was rejected; carries the message already shown.
    Rejected(String),
    /// Print view ready to hand to the platform.
    Printed(PrintDocument),
}

impl Outcome {
    fn applied_if(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::Ignored
        }
    }
}

pub struct App<R: StateRepository, P: Prompt> {
    store: TravelStore<R>,
    prompt: P,
    photos: PhotoRegistry,
    page: Rc<RefCell<Page>>,
}

impl<R: StateRepository, P: Prompt> App<R, P> {
    /// Loads state, renders the initial page and subscribes the page to changes.
    pub fn start(repo: R, prompt: P) -> StoreResult<Self> {
        let mut store = TravelStore::open(repo)?;
        let page = Rc::new(RefCell::new(Page::initial(store.state())));
        let hook = Rc::clone(&page);
        store.subscribe(move |section, state| hook.borrow_mut().render(section, state));

        info!("event=app_start module=ui status=ok");
        Ok(Self {
            store,
            prompt,
            photos: PhotoRegistry::new(),
            page,
        })
    }

    pub fn store(&self) -> &TravelStore<R> {
        &self.store
    }

    pub fn page(&self) -> Ref<'_, Page> {
        self.page.borrow()
    }

    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    pub fn photos(&self) -> &PhotoRegistry {
        &self.photos
    }

    /// Runs `command`, alerting the traveler on rejected input.
    ///
    /// Only storage failures are returned as errors.
    pub fn dispatch(&mut self, command: Command) -> StoreResult<Outcome> {
        match self.run(command) {
            Ok(outcome) => Ok(outcome),
            Err(err) if err.is_user_error() => {
                let message = err.to_string();
                self.prompt.alert(&message);
                Ok(Outcome::Rejected(message))
            }
            Err(err) => Err(err),
        }
    }

    /// Handles a click on the rendered element `target`.
    ///
    /// Inputs paired with the element are read from `values` and cleared on
    /// success. An unknown target is ignored.
    pub fn activate(&mut self, target: &str, values: &mut FieldValues) -> StoreResult<Outcome> {
        let Some(action) = self.page.borrow().binding(target).cloned() else {
            return Ok(Outcome::Ignored);
        };

        let activity_day = match action {
            BoundAction::AddActivity(day) => Some(day),
            _ => None,
        };
        let command = match action {
            BoundAction::DeleteDay(day) => Command::DeleteDay(day),
            BoundAction::SaveDayTitle(day) => Command::RenameDay {
                day,
                title: values.get(&fields::day_title(day)).to_string(),
            },
            BoundAction::AddActivity(day) => Command::AddActivity {
                day,
                form: ActivityForm::from_fields(values, day),
            },
            BoundAction::DeleteActivity { day, activity } => {
                Command::DeleteActivity { day, activity }
            }
            BoundAction::DeleteExpense(id) => Command::DeleteExpense(id),
            BoundAction::TogglePacked(id) => Command::TogglePacked(id),
            BoundAction::DeletePackingItem(id) => Command::DeletePackingItem(id),
            BoundAction::SelectCategory(filter) => Command::SelectCategory(filter),
            BoundAction::DeleteMemory(id) => Command::DeleteMemory(id),
        };

        let outcome = self.dispatch(command)?;
        if let (Some(day), Outcome::Applied) = (activity_day, &outcome) {
            let inputs = [
                fields::activity_title(day),
                fields::activity_description(day),
                fields::activity_location(day),
                fields::activity_cost(day),
            ];
            for input in &inputs {
                values.clear(&[input.as_str()]);
            }
        }
        Ok(outcome)
    }

    /// Handles a fixed page button, reading and resetting its form fields.
    pub fn submit(&mut self, control: Control, values: &mut FieldValues) -> StoreResult<Outcome> {
        let command = match control {
            Control::GenerateItinerary => Command::CreateTrip(TripForm::from_fields(values)),
            Control::AddDay => Command::AddDay,
            Control::SaveItinerary => Command::SaveItinerary,
            Control::PrintItinerary => Command::PrintItinerary,
            Control::SetBudget => Command::SetBudget(values.get(fields::TOTAL_BUDGET).to_string()),
            Control::AddExpense => Command::AddExpense(ExpenseForm::from_fields(values)),
            Control::AddPackingItem => Command::AddPackingItem(PackingItemForm::from_fields(values)),
            Control::SaveMemory => Command::SaveMemory(MemoryForm::from_fields(values)),
            Control::GenerateStory => Command::GenerateStory,
            Control::ToggleTheme => Command::ToggleTheme,
        };

        let outcome = self.dispatch(command)?;
        if outcome == Outcome::Applied {
            match control {
                Control::AddExpense => {
                    values.clear(&[fields::EXPENSE_DESCRIPTION, fields::EXPENSE_AMOUNT]);
                }
                Control::AddPackingItem => {
                    values.clear(&[fields::ITEM_NAME]);
                    values.set(fields::ITEM_QUANTITY, "1");
                }
                Control::SaveMemory => {
                    values.clear(&[
                        fields::MEMORY_TITLE,
                        fields::MEMORY_CONTENT,
                        fields::MEMORY_PHOTO,
                    ]);
                }
                _ => {}
            }
        }
        Ok(outcome)
    }

    /// Releases every outstanding photo handle. Returns how many were live.
    pub fn shutdown(&mut self) -> usize {
        let released = self.photos.release_all();
        info!("event=app_shutdown module=ui status=ok photos_released={released}");
        released
    }

    fn reset_packing_filter(&mut self) {
        self.page
            .borrow_mut()
            .reset_packing_filter(&self.store.state().packing_list);
    }

    fn run(&mut self, command: Command) -> StoreResult<Outcome> {
        match command {
            Command::CreateTrip(form) => {
                self.store.generate_itinerary(&form)?;
                Ok(Outcome::Applied)
            }
            Command::AddDay => {
                self.store.add_day()?;
                Ok(Outcome::Applied)
            }
            Command::DeleteDay(day) => {
                if !self.prompt.confirm(CONFIRM_DELETE_DAY) {
                    return Ok(Outcome::Cancelled);
                }
                Ok(Outcome::applied_if(self.store.delete_day(day)?))
            }
            Command::RenameDay { day, title } => {
                Ok(Outcome::applied_if(self.store.rename_day(day, &title)?))
            }
            Command::AddActivity { day, form } => {
                Ok(Outcome::applied_if(self.store.add_activity(day, &form)?.is_some()))
            }
            Command::DeleteActivity { day, activity } => {
                Ok(Outcome::applied_if(self.store.delete_activity(day, activity)?))
            }
            Command::SaveItinerary => {
                self.store.save_itinerary()?;
                self.prompt.alert(ITINERARY_SAVED);
                Ok(Outcome::Applied)
            }
            Command::PrintItinerary => self.print_itinerary(),
            Command::SetBudget(raw) => {
                self.store.set_budget(&raw)?;
                self.prompt.alert(BUDGET_SET);
                Ok(Outcome::Applied)
            }
            Command::AddExpense(form) => {
                self.store.add_expense(&form)?;
                Ok(Outcome::Applied)
            }
            Command::DeleteExpense(id) => {
                if !self.prompt.confirm(CONFIRM_DELETE_EXPENSE) {
                    return Ok(Outcome::Cancelled);
                }
                Ok(Outcome::applied_if(self.store.delete_expense(id)?))
            }
            Command::AddPackingItem(form) => {
                self.store.add_packing_item(&form)?;
                self.reset_packing_filter();
                Ok(Outcome::Applied)
            }
            Command::TogglePacked(id) => {
                Ok(Outcome::applied_if(self.store.toggle_packed(id)?.is_some()))
            }
            Command::DeletePackingItem(id) => {
                if !self.prompt.confirm(CONFIRM_DELETE_ITEM) {
                    return Ok(Outcome::Cancelled);
                }
                let deleted = self.store.delete_packing_item(id)?;
                if deleted {
                    self.reset_packing_filter();
                }
                Ok(Outcome::applied_if(deleted))
            }
            Command::SelectCategory(filter) => {
                self.page
                    .borrow_mut()
                    .select_category(filter, &self.store.state().packing_list);
                Ok(Outcome::Applied)
            }
            Command::SaveMemory(form) => {
                self.store.save_memory(&form, &mut self.photos)?;
                self.prompt.alert(MEMORY_SAVED);
                Ok(Outcome::Applied)
            }
            Command::DeleteMemory(id) => {
                if !self.prompt.confirm(CONFIRM_DELETE_MEMORY) {
                    return Ok(Outcome::Cancelled);
                }
                Ok(Outcome::applied_if(
                    self.store.delete_memory(id, &mut self.photos)?,
                ))
            }
            Command::GenerateStory => {
                let fragment = render_story(&self.store.story()?);
                self.page
                    .borrow_mut()
                    .install(Container::StoryContent, fragment);
                Ok(Outcome::Applied)
            }
            Command::ToggleTheme => {
                self.store.toggle_theme()?;
                Ok(Outcome::Applied)
            }
        }
    }

    fn print_itinerary(&self) -> StoreResult<Outcome> {
        let state = self.store.state();
        let Some(trip) = state.current_trip.as_ref() else {
            warn!("event=itinerary_print module=ui status=rejected reason=no_trip");
            return Err(StoreError::Validation(ValidationError::NoTrip));
        };
        let document = render_print_document(trip, &state.itinerary);
        info!(
            "event=itinerary_print module=ui status=ok days={}",
            state.itinerary.len()
        );
        Ok(Outcome::Printed(document))
    }
}

#[cfg(test)]
mod tests {
    use super::{App, Command, Control, Outcome, BUDGET_SET};
    use crate::forms::{fields, FieldValues};
    use crate::model::validation::ValidationError;
    use crate::render::Container;
    use crate::repo::state_repo::MemoryStateRepository;
    use crate::ui::Prompt;

    #[derive(Default)]
    struct Recorder {
        alerts: Vec<String>,
        confirms: usize,
        answer: bool,
    }

    impl Prompt for Recorder {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, _question: &str) -> bool {
            self.confirms += 1;
            self.answer
        }
    }

    #[test]
    fn rejected_input_alerts_once_and_keeps_state() {
        let mut app = App::start(MemoryStateRepository::new(), Recorder::default()).unwrap();
        let outcome = app.dispatch(Command::AddDay).unwrap();
        let message = ValidationError::NoTrip.to_string();
        assert_eq!(outcome, Outcome::Rejected(message.clone()));
        assert_eq!(app.prompt().alerts, vec![message]);
        assert!(app.store().repository().blob().is_none());
    }

    #[test]
    fn set_budget_shows_notice_and_renders_summary() {
        let mut app = App::start(MemoryStateRepository::new(), Recorder::default()).unwrap();
        let mut values = FieldValues::new().with(fields::TOTAL_BUDGET, "750");
        assert_eq!(
            app.submit(Control::SetBudget, &mut values).unwrap(),
            Outcome::Applied
        );
        assert_eq!(app.prompt().alerts, vec![BUDGET_SET.to_string()]);
        assert!(app
            .page()
            .markup(Container::BudgetSummary)
            .contains("$750.00"));
    }

    #[test]
    fn print_without_trip_is_rejected() {
        let mut app = App::start(MemoryStateRepository::new(), Recorder::default()).unwrap();
        assert_eq!(
            app.dispatch(Command::PrintItinerary).unwrap(),
            Outcome::Rejected("Please create a trip first.".to_string())
        );
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut app = App::start(MemoryStateRepository::new(), Recorder::default()).unwrap();
        let mut values = FieldValues::new();
        assert_eq!(
            app.activate("delete-day-9", &mut values).unwrap(),
            Outcome::Ignored
        );
        assert_eq!(app.prompt().confirms, 0);
    }
}
