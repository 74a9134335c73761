//! Inventory records

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::{InventoryError, InventoryResult};

/// Identifier assigned to an item at registration.
pub type ItemId = u64;

/// A stored photo, referenced by its location in the [`UploadStore`](crate::UploadStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attachment {
    #[serde(skip)]
    pub(crate) path: Utf8PathBuf,
    /// Filename supplied by the client
    pub file_name: String,
    /// Size of the stored file in bytes
    pub size: u64,
}

impl Attachment {
    /// Where the upload store keeps this file
    pub fn path(&self) -> &camino::Utf8Path {
        &self.path
    }
}

/// One inventory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    /// Registry-assigned identifier
    pub id: ItemId,
    /// Display name, never empty
    pub name: String,
    /// Free-form description
    pub description: Option<String>,
    /// Attached photo, if any
    pub photo: Option<Attachment>,
}

/// A validated item waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) photo: Option<Attachment>,
}

impl NewItem {
    /// Validate the fields of a new item.
    ///
    /// The name is required; an empty description is treated as absent.
    pub fn new(name: Option<String>, description: Option<String>) -> InventoryResult<Self> {
        let name = non_empty(name).ok_or(InventoryError::Validation("inventory_name"))?;
        Ok(Self {
            name,
            description: non_empty(description),
            photo: None,
        })
    }

    /// Attach a stored photo
    pub fn with_photo(mut self, photo: Option<Attachment>) -> Self {
        self.photo = photo;
        self
    }

    pub(crate) fn into_item(self, id: ItemId) -> Item {
        Item {
            id,
            name: self.name,
            description: self.description,
            photo: self.photo,
        }
    }
}

/// Partial update of an item's text fields.
///
/// Empty strings count as "not provided", so an update can never clear a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemUpdate {
    /// Replacement name
    #[serde(default, rename = "inventory_name", alias = "name")]
    pub name: Option<String>,
    /// Replacement description
    #[serde(default)]
    pub description: Option<String>,
}

impl Item {
    /// Overwrite every field the update actually carries.
    pub fn apply(&mut self, update: ItemUpdate) {
        if let Some(name) = non_empty(update.name) {
            self.name = name;
        }

        if let Some(description) = non_empty(update.description) {
            self.description = Some(description);
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
