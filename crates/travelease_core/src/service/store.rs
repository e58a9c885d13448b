//! Application state store.
//!
//! # Responsibility
//! - Own the single `AppState` aggregate and its repository.
//! - Run every mutation as validate, mutate, notify renderers, persist.
//! - Fan out change notifications to subscribed render hooks.
//!
//! # Invariants
//! - A mutator that returns `StoreError::Validation` or `StoreError::Photo`
//!   has not modified state, notified anyone, or written storage.
//! - After a successful mutation, storage holds the full current state.
//! - Stale references (unknown id or day) are ignored, not reported.

use crate::model::state::AppState;
use crate::model::validation::ValidationError;
use crate::photos::PhotoError;
use crate::repo::state_repo::{RepoError, StateRepository};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Page section affected by a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Theme,
    Itinerary,
    Budget,
    Packing,
    Memories,
}

/// Store operation failure.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected; shown to the traveler as-is.
    Validation(ValidationError),
    /// Picked photo could not be registered.
    Photo(PhotoError),
    /// Snapshot load or save failed.
    Repo(RepoError),
}

impl StoreError {
    /// The validation failure, when this error is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the traveler can fix this by correcting input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Photo(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Photo(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Photo(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<PhotoError> for StoreError {
    fn from(value: PhotoError) -> Self {
        Self::Photo(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Render hook invoked after each successful mutation.
pub type Listener = Box<dyn FnMut(Section, &AppState)>;

/// Single owner of application state.
pub struct TravelStore<R: StateRepository> {
    repo: R,
    state: AppState,
    listeners: Vec<Listener>,
}

impl<R: StateRepository> TravelStore<R> {
    /// Loads the stored snapshot, or starts from defaults when none exists.
    pub fn open(repo: R) -> StoreResult<Self> {
        let state = match repo.load_state() {
            Ok(state) => state.unwrap_or_default(),
            Err(err) => {
                error!(
                    "event=store_open module=store status=error error_code=load_failed error={}",
                    err
                );
                return Err(err.into());
            }
        };
        info!(
            "event=store_open module=store status=ok has_trip={} days={} expenses={} items={} memories={}",
            state.current_trip.is_some(),
            state.itinerary.len(),
            state.budget.expenses.len(),
            state.packing_list.len(),
            state.memories.len()
        );
        Ok(Self {
            repo,
            state,
            listeners: Vec::new(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Registers a render hook called with the affected section.
    pub fn subscribe(&mut self, listener: impl FnMut(Section, &AppState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Writes the current state to storage without notifying anyone.
    pub fn persist(&self) -> StoreResult<()> {
        self.repo.save_state(&self.state).map_err(|err| {
            error!(
                "event=state_save module=store status=error error_code=save_failed error={}",
                err
            );
            StoreError::from(err)
        })
    }

    /// Flips the dark-mode flag and returns the new value.
    pub fn toggle_theme(&mut self) -> StoreResult<bool> {
        self.state.dark_mode = !self.state.dark_mode;
        self.commit(Section::Theme)?;
        Ok(self.state.dark_mode)
    }

    pub(crate) fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Notifies render hooks for `section`, then persists.
    pub(crate) fn commit(&mut self, section: Section) -> StoreResult<()> {
        for listener in &mut self.listeners {
            listener(section, &self.state);
        }
        self.persist()
    }

    /// Logs and returns a validation failure for `operation`.
    pub(crate) fn reject<T>(operation: &'static str, err: ValidationError) -> StoreResult<T> {
        warn!(
            "event={} module=store status=rejected reason={}",
            operation,
            err.code()
        );
        Err(StoreError::Validation(err))
    }
}
