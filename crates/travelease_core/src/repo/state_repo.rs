//! Whole-state snapshot repository and its SQLite and in-memory backends.
//!
//! # Responsibility
//! - Persist the full `AppState` as one JSON blob under a fixed storage key.
//! - Read it back merged over defaults.
//!
//! # Invariants
//! - Writes always replace the whole snapshot; there are no partial updates.
//! - Read paths reject snapshots that break model invariants instead of
//!   silently repairing them.
//! - Session photo references are never written.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::state::AppState;
use log::{debug, error};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key under which the snapshot lives.
pub const STORAGE_KEY: &str = "travelEaseData";

pub type RepoResult<T> = Result<T, RepoError>;

/// Snapshot persistence error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Snapshot could not be encoded to JSON.
    Encode(serde_json::Error),
    /// Stored blob is not valid snapshot JSON.
    Decode(serde_json::Error),
    /// Stored blob decoded but violates a model invariant.
    InvalidData(String),
    /// Connection has not been migrated to the version this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode state snapshot: {err}"),
            Self::Decode(err) => write!(f, "stored state snapshot is not valid JSON: {err}"),
            Self::InvalidData(message) => write!(f, "invalid stored state snapshot: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "storage schema is at version {actual_version}, expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) | Self::Decode(err) => Some(err),
            Self::InvalidData(_) | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Load/save contract for the whole-state snapshot.
pub trait StateRepository {
    /// Returns the stored snapshot, or `None` when nothing was saved yet.
    fn load_state(&self) -> RepoResult<Option<AppState>>;
    /// Replaces the stored snapshot with `state`.
    fn save_state(&self, state: &AppState) -> RepoResult<()>;
}

/// Encodes a snapshot the way every backend stores it.
pub fn encode_snapshot(state: &AppState) -> RepoResult<String> {
    serde_json::to_string(state).map_err(RepoError::Encode)
}

/// Decodes and integrity-checks a stored snapshot.
pub fn decode_snapshot(raw: &str) -> RepoResult<AppState> {
    let state: AppState = serde_json::from_str(raw).map_err(RepoError::Decode)?;
    state.check_integrity().map_err(RepoError::InvalidData)?;
    Ok(state)
}

/// SQLite-backed snapshot repository over the `local_storage` table.
pub struct SqliteStateRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateRepository<'conn> {
    /// Wraps a connection opened through `db::open_db*`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }
}

impl StateRepository for SqliteStateRepository<'_> {
    fn load_state(&self) -> RepoResult<Option<AppState>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [STORAGE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            debug!("event=state_load module=repo status=ok found=false");
            return Ok(None);
        };

        match decode_snapshot(&raw) {
            Ok(state) => {
                debug!(
                    "event=state_load module=repo status=ok found=true bytes={}",
                    raw.len()
                );
                Ok(Some(state))
            }
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error error_code=snapshot_invalid error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save_state(&self, state: &AppState) -> RepoResult<()> {
        let raw = encode_snapshot(state)?;
        self.conn.execute(
            "INSERT INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![STORAGE_KEY, raw],
        )?;
        debug!(
            "event=state_save module=repo status=ok bytes={}",
            raw.len()
        );
        Ok(())
    }
}

/// Snapshot repository that keeps the encoded blob in memory.
///
/// Goes through the same JSON encoding as the SQLite backend, so a reload
/// observes exactly what a real save would have stored.
#[derive(Debug, Default)]
pub struct MemoryStateRepository {
    blob: RefCell<Option<String>>,
}

impl MemoryStateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with a raw stored blob.
    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(raw.into())),
        }
    }

    /// Currently stored blob, if any.
    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl StateRepository for MemoryStateRepository {
    fn load_state(&self) -> RepoResult<Option<AppState>> {
        self.blob
            .borrow()
            .as_deref()
            .map(decode_snapshot)
            .transpose()
    }

    fn save_state(&self, state: &AppState) -> RepoResult<()> {
        let raw = encode_snapshot(state)?;
        *self.blob.borrow_mut() = Some(raw);
        Ok(())
    }
}

impl<R: StateRepository + ?Sized> StateRepository for &R {
    fn load_state(&self) -> RepoResult<Option<AppState>> {
        (**self).load_state()
    }

    fn save_state(&self, state: &AppState) -> RepoResult<()> {
        (**self).save_state(state)
    }
}
