//! Packing list mutators.

use crate::forms::PackingItemForm;
use crate::model::packing::{PackingItem, PackingItemId, PackingProgress};
use crate::model::validation::ValidationError;
use crate::repo::state_repo::StateRepository;
use crate::service::store::{Section, StoreResult, TravelStore};
use crate::text::normalize_line;
use log::info;
use uuid::Uuid;

/// Category assigned when the category input is left blank.
pub const DEFAULT_PACKING_CATEGORY: &str = "other";

impl<R: StateRepository> TravelStore<R> {
    /// Adds an item with a positive integer quantity.
    pub fn add_packing_item(&mut self, form: &PackingItemForm) -> StoreResult<PackingItemId> {
        let item = match parse_item(form) {
            Ok(item) => item,
            Err(err) => return Self::reject("packing_add", err),
        };

        let id = item.id;
        let items = &mut self.state_mut().packing_list;
        items.push(item);
        let count = items.len();
        self.commit(Section::Packing)?;

        info!("event=packing_add module=store status=ok item_id={id} items={count}");
        Ok(id)
    }

    /// Flips the packed flag. Returns the new flag, or `None` when stale.
    pub fn toggle_packed(&mut self, id: PackingItemId) -> StoreResult<Option<bool>> {
        let Some(item) = self
            .state_mut()
            .packing_list
            .iter_mut()
            .find(|item| item.id == id)
        else {
            return Ok(None);
        };
        item.packed = !item.packed;
        let packed = item.packed;
        self.commit(Section::Packing)?;

        info!("event=packing_toggle module=store status=ok item_id={id} packed={packed}");
        Ok(Some(packed))
    }

    /// Removes an item. Returns `false` when stale.
    ///
    /// Callers obtain traveler confirmation before calling.
    pub fn delete_packing_item(&mut self, id: PackingItemId) -> StoreResult<bool> {
        let items = &mut self.state_mut().packing_list;
        let before = items.len();
        items.retain(|item| item.id != id);
        if items.len() == before {
            return Ok(false);
        }
        self.commit(Section::Packing)?;

        info!("event=packing_delete module=store status=ok item_id={id}");
        Ok(true)
    }

    pub fn packing_progress(&self) -> PackingProgress {
        PackingProgress::of(&self.state().packing_list)
    }
}

fn parse_item(form: &PackingItemForm) -> Result<PackingItem, ValidationError> {
    let name = normalize_line(&form.name);
    let quantity = form
        .quantity
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|quantity| *quantity > 0)
        .and_then(|quantity| u32::try_from(quantity).ok());
    let Some(quantity) = quantity.filter(|_| !name.is_empty()) else {
        return Err(ValidationError::InvalidPackingItem);
    };

    let category = normalize_line(&form.category);
    Ok(PackingItem {
        id: Uuid::new_v4(),
        category: if category.is_empty() {
            DEFAULT_PACKING_CATEGORY.to_string()
        } else {
            category
        },
        name,
        quantity,
        packed: form.packed,
    })
}
