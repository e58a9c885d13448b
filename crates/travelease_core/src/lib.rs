//! Core domain logic for TravelEase.
//! This crate is the single source of truth for trip planning invariants.

pub mod dates;
pub mod db;
pub mod forms;
pub mod logging;
pub mod model;
pub mod photos;
pub mod render;
pub mod repo;
pub mod service;
pub mod text;
pub mod ui;

pub use forms::{FieldValues, FormDefaults};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::state::AppState;
pub use model::validation::ValidationError;
pub use photos::{PhotoError, PhotoRegistry};
pub use repo::state_repo::{
    MemoryStateRepository, RepoError, RepoResult, SqliteStateRepository, StateRepository,
    STORAGE_KEY,
};
pub use service::store::{Section, StoreError, StoreResult, TravelStore};
pub use ui::{App, Command, Control, Outcome, Page, Prompt};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
