//! Session-scoped photo references.
//!
//! # Responsibility
//! - Turn a picked local image file into a `PhotoRef` handle for rendering.
//! - Release handles when their memory is deleted and at session teardown.
//!
//! # Invariants
//! - A handle resolves only while it is registered in this registry.
//! - Dropping the registry releases every outstanding handle.

use crate::model::memory::PhotoRef;
use log::{debug, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const PHOTO_REF_PREFIX: &str = "blob:travelease/";

#[derive(Debug)]
pub enum PhotoError {
    /// Picked path does not exist or cannot be inspected.
    Unreadable { path: PathBuf, source: std::io::Error },
    /// Picked path exists but is not a regular file.
    NotAFile(PathBuf),
}

impl Display for PhotoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable { path, source } => {
                write!(f, "cannot read photo `{}`: {source}", path.display())
            }
            Self::NotAFile(path) => write!(f, "photo `{}` is not a file", path.display()),
        }
    }
}

impl Error for PhotoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            Self::NotAFile(_) => None,
        }
    }
}

/// Live photo handles for the current session.
#[derive(Debug, Default)]
pub struct PhotoRegistry {
    live: BTreeMap<PhotoRef, PathBuf>,
}

impl PhotoRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `path` and returns a fresh handle for it.
    ///
    /// # Errors
    /// - `Unreadable` when the file metadata cannot be read.
    /// - `NotAFile` for directories and other non-regular entries.
    pub fn acquire(&mut self, path: &Path) -> Result<PhotoRef, PhotoError> {
        let metadata = std::fs::metadata(path).map_err(|source| PhotoError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(PhotoError::NotAFile(path.to_path_buf()));
        }

        let handle = PhotoRef::new(format!("{PHOTO_REF_PREFIX}{}", Uuid::new_v4()));
        self.live.insert(handle.clone(), path.to_path_buf());
        debug!(
            "event=photo_acquire module=photos status=ok live={}",
            self.live.len()
        );
        Ok(handle)
    }

    /// Local file behind a live handle.
    pub fn resolve(&self, photo: &PhotoRef) -> Option<&Path> {
        self.live.get(photo).map(PathBuf::as_path)
    }

    /// Releases one handle. Returns `false` when it was not live.
    pub fn release(&mut self, photo: &PhotoRef) -> bool {
        let released = self.live.remove(photo).is_some();
        debug!(
            "event=photo_release module=photos status=ok released={} live={}",
            released,
            self.live.len()
        );
        released
    }

    /// Releases every outstanding handle and returns how many there were.
    pub fn release_all(&mut self) -> usize {
        let count = self.live.len();
        self.live.clear();
        if count > 0 {
            info!("event=photo_release_all module=photos status=ok released={count}");
        }
        count
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Drop for PhotoRegistry {
    fn drop(&mut self) {
        self.release_all();
    }
}
