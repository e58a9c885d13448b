//! Travel memories and their session-scoped photo references.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one memory entry.
pub type MemoryId = Uuid;

/// URL-like handle to a photo registered for the current session only.
///
/// The handle is meaningless after the session ends, so it is never written
/// to the persisted snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoRef(String);

impl PhotoRef {
    pub(crate) fn new(handle: String) -> Self {
        Self(handle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhotoRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A dated journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub id: MemoryId,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
    #[serde(skip)]
    pub photo: Option<PhotoRef>,
}

/// Memories ordered by ascending date; equal dates keep insertion order.
pub fn chronological(memories: &[Memory]) -> Vec<&Memory> {
    let mut sorted: Vec<&Memory> = memories.iter().collect();
    sorted.sort_by_key(|memory| memory.date);
    sorted
}
