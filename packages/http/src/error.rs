//! Error taxonomy for request dispatch.
//!
//! Every failure a dispatch can run into ends up as exactly one
//! [`RequestError`] variant. Raw transport and codec errors never reach the
//! caller; they are wrapped at the boundary where they occur.

/// Boxed error type produced by [`Transport`](crate::Transport) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failure raised by the transport layer (connection refused, DNS, TLS,
/// timeout, body read failure, ...).
///
/// The original error is kept and exposed through [`source`](std::error::Error::source).
#[derive(thiserror::Error, Debug)]
#[error("{inner}")]
pub struct TransportError {
    #[source]
    inner: BoxError,
}

impl TransportError {
    pub fn new(inner: impl Into<BoxError>) -> Self {
        Self {
            inner: inner.into(),
        }
    }

    /// The underlying transport error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> BoxError {
        self.inner
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    /// Base URL, path and query items did not form a usable URL.
    #[error("invalid request URL '{url}': {reason}")]
    InvalidRequest { url: String, reason: String },

    #[error("bad request (HTTP 400)")]
    BadRequest,

    #[error("unauthorized (HTTP 401)")]
    Unauthorized,

    #[error("forbidden (HTTP 403)")]
    Forbidden,

    #[error("not found (HTTP 404)")]
    NotFound,

    /// HTTP 402 or 405-499.
    #[error("client error (HTTP {0})")]
    ClientError(u16),

    /// HTTP 500.
    #[error("internal server error (HTTP 500)")]
    ServerError,

    /// HTTP 501-599.
    #[error("server error (HTTP {0})")]
    ServerErrorStatus(u16),

    /// The response payload could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decoding(String),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encoding(String),

    #[error("transport failed: {0}")]
    TransportFailed(#[source] TransportError),

    /// Not produced by status mapping. Transports enforcing their own
    /// deadline may raise it, and it passes through unchanged.
    #[error("request timed out")]
    Timeout,

    #[error("{}", unknown_message(.status))]
    Unknown { status: Option<u16> },
}

fn unknown_message(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("unknown error (HTTP {})", code),
        None => "unknown error".to_string(),
    }
}

impl RequestError {
    /// Normalize an error raised by a transport.
    ///
    /// A boxed `RequestError` is returned unchanged; anything else is a
    /// transport failure.
    pub fn from_transport(error: BoxError) -> Self {
        match error.downcast::<RequestError>() {
            Ok(error) => *error,
            Err(other) => RequestError::TransportFailed(TransportError { inner: other }),
        }
    }

    /// The HTTP status code this error was derived from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::BadRequest => Some(400),
            RequestError::Unauthorized => Some(401),
            RequestError::Forbidden => Some(403),
            RequestError::NotFound => Some(404),
            RequestError::ClientError(code) => Some(*code),
            RequestError::ServerError => Some(500),
            RequestError::ServerErrorStatus(code) => Some(*code),
            RequestError::Unknown { status } => *status,
            _ => None,
        }
    }
}
