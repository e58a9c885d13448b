//! Runtime configuration for the CLI.
//!
//! Each setting resolves from its command-line flag, then its environment
//! variable, then a platform default.

use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "TRAVELEASE_DB_PATH";
pub const LOG_DIR_ENV: &str = "TRAVELEASE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "TRAVELEASE_LOG_LEVEL";

const APP_DIR_NAME: &str = "travelease";
const DB_FILE_NAME: &str = "travelease.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Always absolute.
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn resolve(overrides: ConfigOverrides) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir());
        Self::resolve_with(
            overrides,
            |name| std::env::var(name).ok(),
            dirs::data_dir(),
            &cwd,
        )
    }

    fn resolve_with(
        overrides: ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
        data_dir: Option<PathBuf>,
        cwd: &Path,
    ) -> Self {
        let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());
        let app_dir = data_dir
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME);

        let db_path = overrides
            .db_path
            .or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| app_dir.join(DB_FILE_NAME));
        let log_dir = overrides
            .log_dir
            .or_else(|| lookup(LOG_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| app_dir.join(LOG_DIR_NAME));
        let log_level = overrides
            .log_level
            .or_else(|| lookup(LOG_LEVEL_ENV))
            .unwrap_or_else(|| travelease_core::default_log_level().to_string());

        Self {
            db_path,
            log_dir: absolutize(log_dir, cwd),
            log_level,
        }
    }
}

fn absolutize(path: PathBuf, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
