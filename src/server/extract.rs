//! Path and query extractors that reject with a `CatalogError`, so malformed
//! ids and parameters get the same `{"message": ...}` body as every other
//! catalog failure.

use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog_store::CatalogError;

pub struct CatalogPath<T>(pub T);

impl<T, S> FromRequestParts<S> for CatalogPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(CatalogPath(value)),
            Err(rejection) => {
                debug!("Rejecting path {}: {}", parts.uri.path(), rejection.body_text());
                Err(CatalogError::BadRequest(rejection.body_text()))
            }
        }
    }
}

pub struct CatalogQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for CatalogQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(CatalogQuery(value)),
            Err(rejection) => {
                debug!("Rejecting query of {}: {}", parts.uri, rejection.body_text());
                Err(CatalogError::BadRequest(rejection.body_text()))
            }
        }
    }
}
