//! The client façade: base URL plus dispatcher.

use crate::dispatcher::Dispatcher;
use crate::error::RequestError;
use crate::request::Request;
use crate::shape::ResponseShape;

/// Sends [`Request`] descriptors against a fixed base URL.
///
/// The base URL is kept as given and is only combined with a request path
/// at dispatch time, so a malformed base URL surfaces per request as
/// [`RequestError::InvalidRequest`].
#[derive(Clone, Debug)]
pub struct Client {
    base_url: String,
    dispatcher: Dispatcher,
}

impl Client {
    /// Create a client using the default reqwest transport (30 second timeout).
    #[cfg(feature = "reqwest")]
    pub fn new(base_url: impl Into<String>) -> Result<Self, RequestError> {
        Ok(Self::with_dispatcher(
            base_url,
            Dispatcher::with_default_transport()?,
        ))
    }

    #[cfg(feature = "reqwest")]
    pub fn from_config(config: &crate::config::ClientConfig) -> Result<Self, RequestError> {
        let transport = crate::ReqwestTransport::from_config(&config.transport)
            .map_err(RequestError::TransportFailed)?;
        Ok(Self::with_dispatcher(
            config.base_url.clone(),
            Dispatcher::new(transport),
        ))
    }

    pub fn with_dispatcher(base_url: impl Into<String>, dispatcher: Dispatcher) -> Self {
        Self {
            base_url: base_url.into(),
            dispatcher,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Resolve `request` against the base URL and dispatch it.
    ///
    /// Resolution failures return before the transport is touched.
    pub async fn dispatch<R>(
        &self,
        request: &R,
    ) -> Result<<R::Response as ResponseShape>::Output, RequestError>
    where
        R: Request + ?Sized,
    {
        let message = request.resolve(&self.base_url)?;
        self.dispatcher.dispatch::<R::Response>(message).await
    }
}
