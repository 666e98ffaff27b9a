//! Request descriptors.
//!
//! A [`Request`] describes one HTTP call without performing it: path, method,
//! headers, query parameters, body and the [`ResponseShape`] the response
//! decodes into. [`Request::resolve`] turns it into a [`WireMessage`] against
//! a base URL.
//!
//! [`RequestRouter`] is the ready-made descriptor for callers who would
//! rather fill in fields than implement the trait for every endpoint.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use crate::error::RequestError;
use crate::shape::ResponseShape;
use crate::types::{Method, QueryValue, WireMessage};

/// Headers sent when a descriptor does not supply its own.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

/// Describes one logical HTTP call.
///
/// Only [`path`](Request::path) is required; every other accessor has a
/// default. Descriptors are never mutated by resolution, so `resolve` can be
/// called any number of times with the same result.
///
/// # Example
///
/// ```ignore
/// struct GetUser {
///     path: String,
/// }
///
/// impl Request for GetUser {
///     type Response = Json<User>;
///     type Body = ();
///
///     fn path(&self) -> &str {
///         &self.path
///     }
/// }
/// ```
pub trait Request {
    type Response: ResponseShape;

    /// Use `()` for requests that never carry a body.
    type Body: Serialize;

    /// Appended verbatim to the client's base URL.
    fn path(&self) -> &str;

    fn method(&self) -> Method {
        Method::GET
    }

    fn headers(&self) -> Cow<'_, BTreeMap<String, String>> {
        Cow::Owned(default_headers())
    }

    fn query(&self) -> Option<&BTreeMap<String, QueryValue>> {
        None
    }

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Build the wire message for this request against `base_url`.
    fn resolve(&self, base_url: &str) -> Result<WireMessage, RequestError> {
        resolve(self, base_url)
    }
}

/// The default resolution algorithm behind [`Request::resolve`].
///
/// The URL is `base_url` and `path` concatenated as strings. Query items are
/// appended in key order. Headers are copied as-is.
pub fn resolve<R>(request: &R, base_url: &str) -> Result<WireMessage, RequestError>
where
    R: Request + ?Sized,
{
    let raw = format!("{}{}", base_url, request.path());
    let mut url = Url::parse(&raw).map_err(|e| RequestError::InvalidRequest {
        url: raw.clone(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(RequestError::InvalidRequest {
            url: raw,
            reason: "URL cannot carry a request path".to_string(),
        });
    }

    if let Some(query) = request.query().filter(|query| !query.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in query {
            pairs.append_pair(name, &value.to_string());
        }
    }

    let headers = request.headers().into_owned();

    let body = match request.body() {
        Some(body) => match serde_json::to_vec(body) {
            Ok(bytes) => Some(Bytes::from(bytes)),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "failed to encode request body");
                return Err(RequestError::Encoding(e.to_string()));
            }
        },
        None => None,
    };

    tracing::info!(url = %url, headers = ?headers, "resolved request");

    let message = WireMessage {
        method: request.method(),
        url,
        headers,
        body,
    };

    if let Some(text) = message.body_text() {
        tracing::info!(body = text, "request body");
    }

    Ok(message)
}

/// A general-purpose [`Request`] built from plain field values.
///
/// `S` is the response shape; `B` is the body type, `serde_json::Value`
/// unless [`with_body`](RequestRouter::with_body) picks another.
pub struct RequestRouter<S, B = serde_json::Value> {
    path: String,
    method: Method,
    headers: BTreeMap<String, String>,
    query: Option<BTreeMap<String, QueryValue>>,
    body: Option<B>,
    shape: PhantomData<fn() -> S>,
}

impl<S: ResponseShape> RequestRouter<S> {
    /// Create a request with default headers and no query or body.
    pub fn new(path: impl Into<String>, method: Method) -> Self {
        Self {
            path: path.into(),
            method,
            headers: default_headers(),
            query: None,
            body: None,
            shape: PhantomData,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, Method::GET)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, Method::POST)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path, Method::PUT)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path, Method::DELETE)
    }
}

impl<S, B> RequestRouter<S, B> {
    /// Add or replace a single header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the whole header set, dropping the defaults.
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_query_params(mut self, params: BTreeMap<String, QueryValue>) -> Self {
        self.query = Some(params);
        self
    }

    pub fn with_body<T: Serialize>(self, body: T) -> RequestRouter<S, T> {
        RequestRouter {
            path: self.path,
            method: self.method,
            headers: self.headers,
            query: self.query,
            body: Some(body),
            shape: PhantomData,
        }
    }
}

impl<S, B> Request for RequestRouter<S, B>
where
    S: ResponseShape,
    B: Serialize,
{
    type Response = S;
    type Body = B;

    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> Method {
        self.method
    }

    fn headers(&self) -> Cow<'_, BTreeMap<String, String>> {
        Cow::Borrowed(&self.headers)
    }

    fn query(&self) -> Option<&BTreeMap<String, QueryValue>> {
        self.query.as_ref()
    }

    fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }
}

impl<S, B: Clone> Clone for RequestRouter<S, B> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            method: self.method,
            headers: self.headers.clone(),
            query: self.query.clone(),
            body: self.body.clone(),
            shape: PhantomData,
        }
    }
}

impl<S, B: fmt::Debug> fmt::Debug for RequestRouter<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestRouter")
            .field("path", &self.path)
            .field("method", &self.method)
            .field("headers", &self.headers)
            .field("query", &self.query)
            .field("body", &self.body)
            .finish()
    }
}
