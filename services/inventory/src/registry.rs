//! In-memory item registry

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::{InventoryError, InventoryResult};
use crate::item::{Attachment, Item, ItemId, ItemUpdate, NewItem};

#[derive(Debug, Default)]
struct Inventory {
    items: BTreeMap<ItemId, Item>,
    next_id: ItemId,
}

/// Process-wide store of inventory items.
///
/// Ids are handed out sequentially from zero and never reused, even after
/// the item they named is removed. Clones share the same underlying store;
/// every operation runs under a single lock.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<Mutex<Inventory>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new item under the next free id.
    pub fn register(&self, item: NewItem) -> ItemId {
        let mut inventory = self.inner.lock();
        let id = inventory.next_id;
        inventory.next_id += 1;
        inventory.items.insert(id, item.into_item(id));
        tracing::debug!(id, "registered item");
        id
    }

    /// Snapshot of every item, ordered by id
    pub fn list(&self) -> BTreeMap<ItemId, Item> {
        self.inner.lock().items.clone()
    }

    /// Look up one item
    pub fn get(&self, id: ItemId) -> InventoryResult<Item> {
        self.inner
            .lock()
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))
    }

    /// Apply a partial update to an existing item
    pub fn update(&self, id: ItemId, update: ItemUpdate) -> InventoryResult<()> {
        let mut inventory = self.inner.lock();
        let item = inventory
            .items
            .get_mut(&id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))?;
        item.apply(update);
        tracing::debug!(id, "updated item");
        Ok(())
    }

    /// Remove an item, returning it so its photo can be cleaned up
    pub fn remove(&self, id: ItemId) -> InventoryResult<Item> {
        let item = self
            .inner
            .lock()
            .items
            .remove(&id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))?;
        tracing::debug!(id, "removed item");
        Ok(item)
    }

    /// The photo attached to an item
    pub fn photo(&self, id: ItemId) -> InventoryResult<Attachment> {
        self.get(id)?.photo.ok_or(InventoryError::PhotoNotFound(id))
    }

    /// Set or clear an item's photo, returning the one it replaced
    pub fn replace_photo(
        &self,
        id: ItemId,
        photo: Option<Attachment>,
    ) -> InventoryResult<Option<Attachment>> {
        let mut inventory = self.inner.lock();
        let item = inventory
            .items
            .get_mut(&id)
            .ok_or_else(|| InventoryError::ItemNotFound(id.to_string()))?;
        tracing::debug!(id, attached = photo.is_some(), "replaced photo");
        Ok(std::mem::replace(&mut item.photo, photo))
    }

    /// Check that an item exists
    pub fn contains(&self, id: ItemId) -> bool {
        self.inner.lock().items.contains_key(&id)
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    /// True when no items are stored
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
