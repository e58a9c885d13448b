//! Memory journal mutators and trip story generation.
//!
//! # Invariants
//! - A memory's photo handle is released exactly when the memory is removed,
//!   or at session teardown.
//! - A rejected save never leaves a registered photo behind.

use crate::dates::parse_iso_date;
use crate::forms::{fields, MemoryForm};
use crate::model::memory::{chronological, Memory, MemoryId};
use crate::model::trip::Trip;
use crate::model::validation::ValidationError;
use crate::photos::PhotoRegistry;
use crate::repo::state_repo::StateRepository;
use crate::service::store::{Section, StoreError, StoreResult, TravelStore};
use crate::text::{normalize_block, normalize_line};
use log::{info, warn};
use uuid::Uuid;

/// Read-only narrative view: trip header plus memories in date order.
#[derive(Debug, Clone, PartialEq)]
pub struct Story<'a> {
    pub trip: &'a Trip,
    pub memories: Vec<&'a Memory>,
}

impl<R: StateRepository> TravelStore<R> {
    /// Saves a memory, registering its photo with `photos` when one was picked.
    pub fn save_memory(
        &mut self,
        form: &MemoryForm,
        photos: &mut PhotoRegistry,
    ) -> StoreResult<MemoryId> {
        let mut memory = match parse_memory(form) {
            Ok(memory) => memory,
            Err(err) => return Self::reject("memory_save", err),
        };

        if let Some(path) = form.photo.as_deref() {
            match photos.acquire(path) {
                Ok(photo) => memory.photo = Some(photo),
                Err(err) => {
                    warn!("event=memory_save module=store status=rejected reason=photo_unreadable");
                    return Err(StoreError::Photo(err));
                }
            }
        }

        let id = memory.id;
        let has_photo = memory.photo.is_some();
        self.state_mut().memories.push(memory);
        self.commit(Section::Memories)?;

        info!("event=memory_save module=store status=ok memory_id={id} has_photo={has_photo}");
        Ok(id)
    }

    /// Removes a memory and releases its photo. Returns `false` when stale.
    ///
    /// Callers obtain traveler confirmation before calling.
    pub fn delete_memory(&mut self, id: MemoryId, photos: &mut PhotoRegistry) -> StoreResult<bool> {
        let memories = &mut self.state_mut().memories;
        let Some(position) = memories.iter().position(|memory| memory.id == id) else {
            return Ok(false);
        };
        let removed = memories.remove(position);
        if let Some(photo) = removed.photo.as_ref() {
            photos.release(photo);
        }
        self.commit(Section::Memories)?;

        info!("event=memory_delete module=store status=ok memory_id={id}");
        Ok(true)
    }

    /// Builds the trip story. Requires a trip and at least one memory.
    pub fn story(&self) -> StoreResult<Story<'_>> {
        let state = self.state();
        let Some(trip) = state.current_trip.as_ref() else {
            return Self::reject("story_generate", ValidationError::NoTrip);
        };
        if state.memories.is_empty() {
            return Self::reject("story_generate", ValidationError::NoMemories);
        }

        info!(
            "event=story_generate module=store status=ok memories={}",
            state.memories.len()
        );
        Ok(Story {
            trip,
            memories: chronological(&state.memories),
        })
    }
}

fn parse_memory(form: &MemoryForm) -> Result<Memory, ValidationError> {
    let title = normalize_line(&form.title);
    let content = normalize_block(&form.content);
    if form.date.trim().is_empty() || title.is_empty() || content.is_empty() {
        return Err(ValidationError::IncompleteMemory);
    }
    let date = parse_iso_date(fields::MEMORY_DATE, &form.date)?;

    Ok(Memory {
        id: Uuid::new_v4(),
        date,
        title,
        content,
        photo: None,
    })
}

#[cfg(test)]
mod tests {
    use super::parse_memory;
    use crate::forms::MemoryForm;
    use crate::model::validation::ValidationError;

    #[test]
    fn memory_requires_date_title_and_content() {
        let mut form = MemoryForm {
            date: "2024-06-02".to_string(),
            title: "Sunset".to_string(),
            content: "  ".to_string(),
            photo: None,
        };
        assert_eq!(parse_memory(&form), Err(ValidationError::IncompleteMemory));

        form.content = "Watched it from the castle.\n".to_string();
        let memory = parse_memory(&form).unwrap();
        assert_eq!(memory.content, "Watched it from the castle.");
    }
}
