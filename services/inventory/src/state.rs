//! Shared handler state

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::{InventoryError, InventoryResult};
use crate::item::{Attachment, ItemId};
use crate::registry::Registry;
use crate::uploads::{Upload, UploadStore};

/// Handles shared by every route
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pub registry: Registry,
    pub uploads: UploadStore,
}

impl AppState {
    /// Store an optional upload, returning the reference the item should keep.
    pub async fn store(&self, photo: Option<Upload>) -> InventoryResult<Option<Attachment>> {
        match photo {
            Some(upload) => Ok(Some(self.uploads.save(upload).await?)),
            None => Ok(None),
        }
    }

    /// Drop a superseded photo from the upload store.
    pub async fn discard(&self, photo: Option<Attachment>) {
        if let Some(photo) = photo {
            self.uploads.discard(photo).await;
        }
    }
}

/// Parse an id taken from the path.
///
/// Only the canonical decimal form names an item, so `00` and `+0` are not
/// aliases for `0`.
pub(crate) fn parse_id(raw: &str) -> InventoryResult<ItemId> {
    match raw.parse::<ItemId>() {
        Ok(id) if id.to_string() == raw => Ok(id),
        _ => Err(InventoryError::ItemNotFound(raw.to_string())),
    }
}

/// The item id from an `{id}` path segment.
///
/// A segment which does not decode, or is not an id, names no item.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ItemPath(pub ItemId);

impl<S> FromRequestParts<S> for ItemPath
where
    S: Send + Sync,
{
    type Rejection = InventoryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        parse_id(&raw).map(ItemPath)
    }
}
