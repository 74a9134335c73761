//! HTML search route

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::post;

use crate::allow;
use crate::error::{InventoryError, InventoryResult};
use crate::form::{Payload, SearchFields};
use crate::item::Item;
use crate::state::{AppState, parse_id};

/// Router for the search form
pub(crate) fn router() -> Router<AppState> {
    Router::new().route(
        "/search",
        post(search).fallback(allow::reject(allow::SEARCH)),
    )
}

/// Render one item as an HTML fragment
async fn search(
    State(state): State<AppState>,
    Payload(fields): Payload<SearchFields>,
) -> InventoryResult<Html<String>> {
    let id = fields
        .id
        .as_ref()
        .ok_or_else(|| InventoryError::ItemNotFound(String::new()))
        .and_then(|id| parse_id(&id.as_text()))?;
    let item = state.registry.get(id)?;

    Ok(Html(render(&item, fields.wants_photo())))
}

fn render(item: &Item, include_photo: bool) -> String {
    let mut html = format!(
        "<p>Inventory name: {}</p>\n<p>Description: {}</p>",
        escape(&item.name),
        escape(item.description.as_deref().unwrap_or_default()),
    );

    if include_photo && item.photo.is_some() {
        html.push_str(&format!(
            "\n<img src=\"/inventory/{}/photo\" alt=\"Photo\">",
            item.id
        ));
    }

    html
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
