//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, OptionalFromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::errors::Error;

/// JSON body extractor whose rejections use the console's `{ success: false, message }` envelope.
///
/// As `Option<ConsoleJson<T>>` a request without a JSON content type yields `None`, while a body
/// that is present but malformed is still rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleJson<T>(pub T);

impl<T, S> FromRequest<S> for ConsoleJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T, S> OptionalFromRequest<S> for ConsoleJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state).await?;
        Ok(body.map(|Json(value)| Self(value)))
    }
}
