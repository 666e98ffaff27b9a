//! Response shapes.
//!
//! A shape is a type-level marker naming what a successful response body
//! decodes into. It is fixed per request type, never chosen at runtime:
//!
//! ```ignore
//! let user: RequestRouter<Json<User>> = RequestRouter::get("/users/1");
//! let avatar: RequestRouter<Raw> = RequestRouter::get("/users/1/avatar");
//! ```

use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::error::RequestError;

/// Decodes a successful (2xx) response payload.
pub trait ResponseShape {
    /// The value handed back to the caller.
    type Output: Send + 'static;

    fn decode(body: Bytes) -> Result<Self::Output, RequestError>;
}

/// Parse the payload as JSON into `T`.
pub struct Json<T>(PhantomData<fn() -> T>);

impl<T> ResponseShape for Json<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn decode(body: Bytes) -> Result<T, RequestError> {
        serde_json::from_slice(&body).map_err(|e| RequestError::Decoding(e.to_string()))
    }
}

/// Return the payload bytes untouched.
pub struct Raw;

impl ResponseShape for Raw {
    type Output = Bytes;

    fn decode(body: Bytes) -> Result<Bytes, RequestError> {
        Ok(body)
    }
}

/// Ignore the payload entirely (e.g. `204 No Content`).
pub struct Empty;

impl ResponseShape for Empty {
    type Output = ();

    fn decode(_body: Bytes) -> Result<(), RequestError> {
        Ok(())
    }
}
