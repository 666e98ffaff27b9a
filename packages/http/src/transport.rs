//! HTTP transport abstraction.
//!
//! The dispatcher never talks to the network itself; it hands a
//! [`WireMessage`] to a [`Transport`]. Production code uses
//! [`ReqwestTransport`], tests substitute canned responses.
//!
//! Timeouts, connection pooling and cancellation belong to the transport.

use async_trait::async_trait;

use crate::error::BoxError;
use crate::types::{TransportResponse, WireMessage};

/// Executes wire messages.
///
/// Implementations must tolerate any number of concurrent `execute` calls.
///
/// # Object Safety
///
/// This trait is object-safe: the dispatcher holds an `Arc<dyn Transport>`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `message` and wait for the full response.
    ///
    /// Any `Err` is reported to the caller as
    /// [`RequestError::TransportFailed`](crate::RequestError::TransportFailed),
    /// unless it is itself a boxed [`RequestError`](crate::RequestError), which
    /// passes through unchanged.
    async fn execute(&self, message: WireMessage) -> Result<TransportResponse, BoxError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use std::collections::BTreeMap;
    use std::time::Duration;

    use async_trait::async_trait;
    use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
    use reqwest::Client;

    use super::Transport;
    use crate::config::TransportConfig;
    use crate::error::{BoxError, TransportError};
    use crate::types::{TransportResponse, WireMessage};

    /// Production transport backed by an async `reqwest::Client`.
    ///
    /// Cloning is cheap and clones share one connection pool.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        /// Create a new transport with the given request timeout.
        pub fn new(timeout: Duration) -> Result<Self, TransportError> {
            Self::from_config(&TransportConfig {
                timeout_ms: timeout.as_millis().try_into().unwrap_or(u64::MAX),
                ..TransportConfig::default()
            })
        }

        /// Create with default timeout of 30 seconds.
        pub fn with_default_timeout() -> Result<Self, TransportError> {
            Self::from_config(&TransportConfig::default())
        }

        pub fn from_config(config: &TransportConfig) -> Result<Self, TransportError> {
            let mut builder = Client::builder().timeout(config.timeout());
            if let Some(user_agent) = &config.user_agent {
                builder = builder.user_agent(user_agent.as_str());
            }
            let client = builder.build().map_err(TransportError::new)?;

            Ok(Self { client })
        }

        /// Wrap an already configured client.
        pub fn from_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[async_trait]
    impl Transport for ReqwestTransport {
        async fn execute(&self, message: WireMessage) -> Result<TransportResponse, BoxError> {
            let method: http::Method = message.method.into();

            let mut headers = HeaderMap::new();
            for (name, value) in &message.headers {
                let header_name = HeaderName::try_from(name.as_str())?;
                let header_value = HeaderValue::try_from(value.as_str())?;
                headers.insert(header_name, header_value);
            }

            let mut req_builder = self.client.request(method, message.url).headers(headers);

            if let Some(body) = message.body {
                req_builder = req_builder.body(body);
            }

            let response = req_builder.send().await?;

            let status = response.status().as_u16();

            let mut resp_headers = BTreeMap::new();
            for (name, value) in response.headers() {
                if let Ok(v) = value.to_str() {
                    resp_headers.insert(name.to_string(), v.to_string());
                }
            }

            let body = response.bytes().await?;

            Ok(TransportResponse {
                status,
                headers: resp_headers,
                body,
            })
        }
    }

}
