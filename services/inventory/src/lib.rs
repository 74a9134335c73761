//! # Inventory service
//!
//! A small HTTP service tracking named inventory items, each optionally
//! carrying a photo.
//!
//! ## Routes
//!
//! - `POST /register`, `POST /inventory`: register an item (multipart, with an
//!   optional `photo` file)
//! - `GET /inventory`: every item, keyed by id
//! - `GET|PUT|DELETE /inventory/{id}`: read, partially update or delete one item
//! - `GET|PUT /inventory/{id}/photo`: fetch or replace an item's photo
//! - `POST /search`: render one item as an HTML fragment
//!
//! Methods a path does not accept are answered with `405` and an `Allow` header.
//!
//! ## Example
//!
//! ```no_run
//! use inventory::{InventoryBuilder, UploadStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploads = UploadStore::temporary()?;
//! let app = InventoryBuilder::new(uploads).build();
//!
//! // Use the inventory service with axum or any tower-compatible server
//! # Ok(())
//! # }
//! ```

mod allow;
mod api;
pub mod config;
mod error;
mod form;
mod inventory;
mod item;
mod photo;
mod registry;
mod search;
mod state;
mod uploads;

pub use api::{DEFAULT_BODY_LIMIT, InventoryBuilder};
pub use config::{ConfigError, ConfigLayer, ServerConfig};
pub use error::{InventoryError, InventoryResult};
pub use item::{Attachment, Item, ItemId, ItemUpdate, NewItem};
pub use registry::Registry;
pub use uploads::{Upload, UploadStore};
