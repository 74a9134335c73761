//! Photo sub-resource routes

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio_util::io::ReaderStream;

use crate::allow;
use crate::error::{InventoryError, InventoryResult};
use crate::form::ItemForm;
use crate::state::{AppState, ItemPath};

/// Router for photo operations
pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/inventory/{id}/photo",
        get(get_photo)
            .put(put_photo)
            .fallback(allow::reject(allow::PHOTO)),
    )
}

/// Stream an item's photo.
///
/// Always served as JPEG, whatever the client uploaded.
async fn get_photo(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
) -> InventoryResult<Response> {
    let photo = state.registry.photo(id)?;
    let file = state.uploads.open(&photo).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::IMAGE_JPEG.to_string()),
            (header::CONTENT_LENGTH, photo.size.to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}

/// Replace an item's photo, or clear it when no file was sent
async fn put_photo(
    State(state): State<AppState>,
    ItemPath(id): ItemPath,
    form: ItemForm,
) -> InventoryResult<StatusCode> {
    if !state.registry.contains(id) {
        return Err(InventoryError::ItemNotFound(id.to_string()));
    }

    let photo = state.store(form.photo).await?;
    match state.registry.replace_photo(id, photo.clone()) {
        Ok(previous) => {
            state.discard(previous).await;
            Ok(StatusCode::OK)
        }
        Err(err) => {
            // Item vanished while the upload was being written.
            state.discard(photo).await;
            Err(err)
        }
    }
}
