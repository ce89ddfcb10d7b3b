//! Path parameter extractor.
//!
//! Wraps axum's [`Path`] so a rejection becomes a [`RestError`] and takes
//! the same route to the client as every other failure.

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::RestError;

/// Path parameters with rejections mapped to [`RestError::MalformedRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct DbPath<T>(pub T);

impl<S, T> FromRequestParts<S> for DbPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = RestError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<T>::from_request_parts(parts, state)
            .await
            .map(|Path(value)| DbPath(value))
            .map_err(|rejection| RestError::malformed(rejection.body_text()))
    }
}
