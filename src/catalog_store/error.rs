use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Errors surfaced by catalog operations.
///
/// Only `KeyNotFound` and `BadRequest` are classified; anything else is a
/// storage or internal failure and is reported as such.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The referenced entity does not exist, or a listing for it is empty.
    #[error("{0}")]
    KeyNotFound(String),

    /// The request is structurally invalid.
    #[error("{0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, CatalogError::KeyNotFound(_))
    }

    pub fn is_bad_request(&self) -> bool {
        matches!(self, CatalogError::BadRequest(_))
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            message: self.to_string(),
        }
    }
}

/// Error body handed to callers: `{"message": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}
