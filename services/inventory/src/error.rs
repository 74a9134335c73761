//! Error types for the inventory service

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{FormRejection, JsonRejection, PathRejection};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::item::ItemId;

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Error types for inventory operations
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// A required field was missing or empty
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// No item is registered under this id
    #[error("item not found: {0}")]
    ItemNotFound(String),

    /// The item exists but carries no photo
    #[error("item {0} has no photo")]
    PhotoNotFound(ItemId),

    /// Method not permitted on a recognized path
    #[error("method not allowed, expected one of: {}", .allow.join(", "))]
    MethodNotAllowed {
        /// Methods accepted on the path
        allow: &'static [&'static str],
    },

    /// The request body could not be decoded
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// Multipart stream failed mid-read
    #[error("multipart: {0}")]
    Multipart(#[from] MultipartError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InventoryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_) | InventoryError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            InventoryError::Multipart(err) => err.status(),
            InventoryError::ItemNotFound(_) | InventoryError::PhotoNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            InventoryError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            InventoryError::Io(err) if err.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            InventoryError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for InventoryError {
    fn from(rejection: JsonRejection) -> Self {
        InventoryError::InvalidBody(rejection.body_text())
    }
}

impl From<FormRejection> for InventoryError {
    fn from(rejection: FormRejection) -> Self {
        InventoryError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for InventoryError {
    fn from(rejection: PathRejection) -> Self {
        InventoryError::ItemNotFound(rejection.body_text())
    }
}

impl From<MultipartRejection> for InventoryError {
    fn from(rejection: MultipartRejection) -> Self {
        InventoryError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        match self {
            InventoryError::MethodNotAllowed { allow } => {
                let mut response = status.into_response();
                // Method names are plain ASCII tokens.
                if let Ok(value) = HeaderValue::from_str(&allow.join(", ")) {
                    response.headers_mut().insert(header::ALLOW, value);
                }
                response
            }
            _ => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_not_allowed_sets_allow_header() {
        let response = InventoryError::MethodNotAllowed {
            allow: &["GET", "PUT"],
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET, PUT");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = InventoryError::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let err = InventoryError::from(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
