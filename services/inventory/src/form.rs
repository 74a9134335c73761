//! Request body extractors

use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::header;
use axum::Json;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::InventoryError;
use crate::uploads::Upload;

/// Body sent as either a url-encoded form or JSON.
///
/// A request without a content type, or with one that is neither, decodes as
/// `T::default()`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Payload<T>(pub T);

fn content_type(req: &Request) -> Option<mime::Mime> {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

fn is_json(mime: &mime::Mime) -> bool {
    mime.type_() == mime::APPLICATION
        && (mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON))
}

fn is_urlencoded(mime: &mime::Mime) -> bool {
    mime.essence_str() == mime::APPLICATION_WWW_FORM_URLENCODED.essence_str()
}

fn is_multipart(mime: &mime::Mime) -> bool {
    mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA
}

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = InventoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match content_type(&req) {
            None => Ok(Payload(T::default())),
            Some(mime) if is_json(&mime) => {
                let Json(value) = Json::<T>::from_request(req, state).await?;
                Ok(Payload(value))
            }
            Some(mime) if is_urlencoded(&mime) => {
                let Form(value) = Form::<T>::from_request(req, state).await?;
                Ok(Payload(value))
            }
            Some(mime) => {
                tracing::debug!(content_type = %mime, "ignoring unsupported body");
                Ok(Payload(T::default()))
            }
        }
    }
}

/// Text fields of an item form
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ItemFields {
    #[serde(default, alias = "name")]
    pub inventory_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// An item form which may carry a photo.
///
/// Multipart bodies are read field by field; anything else goes through
/// [`Payload`] and never has a photo.
#[derive(Debug, Default)]
pub(crate) struct ItemForm {
    pub fields: ItemFields,
    pub photo: Option<Upload>,
}

/// Name of the multipart file field holding the photo
const PHOTO_FIELD: &str = "photo";

impl<S> FromRequest<S> for ItemForm
where
    S: Send + Sync,
{
    type Rejection = InventoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !content_type(&req).is_some_and(|mime| is_multipart(&mime)) {
            let Payload(fields) = Payload::<ItemFields>::from_request(req, state).await?;
            return Ok(ItemForm {
                fields,
                photo: None,
            });
        }

        let mut multipart = Multipart::from_request(req, state).await?;
        let mut form = ItemForm::default();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_owned);
            match name.as_deref() {
                Some("inventory_name" | "name") => {
                    form.fields.inventory_name = Some(field.text().await?);
                }
                Some("description") => form.fields.description = Some(field.text().await?),
                Some(PHOTO_FIELD) => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let upload = Upload {
                        file_name,
                        data: field.bytes().await?,
                    };
                    form.photo = Some(upload).filter(|upload| !upload.is_empty());
                }
                other => tracing::trace!(field = ?other, "ignoring multipart field"),
            }
        }

        Ok(form)
    }
}

/// Body of a search request
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SearchFields {
    #[serde(default)]
    pub id: Option<IdField>,
    #[serde(default, rename = "includePhoto")]
    pub include_photo: Option<String>,
}

/// An item id sent as text (forms) or a number (JSON)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum IdField {
    Number(u64),
    Text(String),
}

impl IdField {
    pub fn as_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            IdField::Number(id) => id.to_string().into(),
            IdField::Text(id) => id.as_str().into(),
        }
    }
}

impl SearchFields {
    /// Checkbox semantics: only the literal `on` asks for the photo.
    pub fn wants_photo(&self) -> bool {
        self.include_photo.as_deref() == Some("on")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_fields_from_form() {
        let fields: SearchFields =
            from_query("id=3&includePhoto=on").expect("valid form");
        assert_eq!(fields.id.as_ref().unwrap().as_text(), "3");
        assert!(fields.include_photo.is_some());
    }

    #[test]
    fn test_search_fields_from_json_number() {
        let fields: SearchFields = serde_json::from_str(r#"{"id": 4}"#).unwrap();
        assert_eq!(fields.id.as_ref().unwrap().as_text(), "4");
        assert!(!fields.wants_photo());
    }

    #[test]
    fn test_wants_photo_requires_on() {
        let fields = SearchFields {
            id: None,
            include_photo: Some("true".into()),
        };
        assert!(!fields.wants_photo());

        let fields = SearchFields {
            id: None,
            include_photo: Some("on".into()),
        };
        assert!(fields.wants_photo());
    }

    #[test]
    fn test_item_fields_accept_name_alias() {
        let fields: ItemFields = serde_json::from_str(r#"{"name": "Drill"}"#).unwrap();
        assert_eq!(fields.inventory_name.as_deref(), Some("Drill"));
        assert_eq!(fields.description, None);
    }

    #[test]
    fn test_content_type_dispatch() {
        let json: mime::Mime = "application/vnd.inventory+json".parse().unwrap();
        assert!(is_json(&json));
        let text_json: mime::Mime = "text/json".parse().unwrap();
        assert!(!is_json(&text_json));

        let form: mime::Mime = "application/x-www-form-urlencoded; charset=utf-8"
            .parse()
            .unwrap();
        assert!(is_urlencoded(&form));
        assert!(!is_urlencoded(&mime::TEXT_PLAIN));
        assert!(!is_urlencoded(&mime::MULTIPART_FORM_DATA));
    }

    fn from_query(query: &str) -> Option<SearchFields> {
        let uri: axum::http::Uri = format!("/search?{query}").parse().ok()?;
        let axum::extract::Query(fields) = axum::extract::Query::try_from_uri(&uri).ok()?;
        Some(fields)
    }
}
