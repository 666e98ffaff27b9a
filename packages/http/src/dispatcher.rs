//! Executes wire messages and turns the outcome into a typed result.

use std::sync::Arc;

use crate::error::RequestError;
use crate::shape::ResponseShape;
use crate::transport::Transport;
use crate::types::WireMessage;

/// Map an HTTP status code to success or the matching [`RequestError`].
///
/// Codes outside `100..=999` are not valid response metadata and are
/// treated as code `0`.
pub fn classify_status(status: u16) -> Result<(), RequestError> {
    let status = if (100..=999).contains(&status) {
        status
    } else {
        0
    };

    match status {
        200..=299 => Ok(()),
        400 => Err(RequestError::BadRequest),
        401 => Err(RequestError::Unauthorized),
        403 => Err(RequestError::Forbidden),
        404 => Err(RequestError::NotFound),
        402 | 405..=499 => Err(RequestError::ClientError(status)),
        500 => Err(RequestError::ServerError),
        501..=599 => Err(RequestError::ServerErrorStatus(status)),
        other => Err(RequestError::Unknown {
            status: Some(other),
        }),
    }
}

/// Sends wire messages over a shared [`Transport`].
///
/// Holds no per-call state; clones share the transport and any number of
/// dispatches may run concurrently.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Dispatcher over a [`ReqwestTransport`](crate::ReqwestTransport) with
    /// the default timeout.
    #[cfg(feature = "reqwest")]
    pub fn with_default_transport() -> Result<Self, RequestError> {
        let transport =
            crate::ReqwestTransport::with_default_timeout().map_err(RequestError::TransportFailed)?;
        Ok(Self::new(transport))
    }

    /// Execute `message` and decode a successful response as `S`.
    ///
    /// The returned future resolves exactly once, on whatever task polls it.
    pub async fn dispatch<S: ResponseShape>(
        &self,
        message: WireMessage,
    ) -> Result<S::Output, RequestError> {
        let method = message.method;
        let url = message.url.clone();

        tracing::info!(method = %method, url = %url, "dispatching request");

        let response = self
            .transport
            .execute(message)
            .await
            .map_err(RequestError::from_transport)
            .inspect_err(|e| {
                tracing::error!(method = %method, url = %url, error = %e, "transport failed")
            })?;

        tracing::info!(status = response.status, url = %url, "received response");

        classify_status(response.status).inspect_err(|e| {
            tracing::error!(status = response.status, url = %url, error = %e, "request failed")
        })?;

        S::decode(response.body).inspect_err(|e| {
            tracing::error!(url = %url, error = %e, "failed to decode response")
        })
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Json, Raw};
    use crate::transport::mock::MockTransport;
    use crate::types::{Method, TransportResponse};
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use url::Url;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: u64,
        name: String,
    }

    fn message(path: &str) -> WireMessage {
        WireMessage {
            method: Method::GET,
            url: Url::parse(&format!("https://api.example.com{}", path)).unwrap(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    fn status_only(status: u16) -> Dispatcher {
        Dispatcher::new(
            MockTransport::new().with_default_response(TransportResponse::new(status, "{}")),
        )
    }

    #[test]
    fn classify_success_range() {
        for status in [200, 201, 204, 250, 299] {
            assert!(classify_status(status).is_ok(), "{} should succeed", status);
        }
    }

    #[test]
    fn classify_boundaries() {
        assert!(matches!(classify_status(400), Err(RequestError::BadRequest)));
        assert!(matches!(classify_status(401), Err(RequestError::Unauthorized)));
        assert!(matches!(classify_status(403), Err(RequestError::Forbidden)));
        assert!(matches!(classify_status(404), Err(RequestError::NotFound)));
        assert!(matches!(classify_status(402), Err(RequestError::ClientError(402))));
        assert!(matches!(classify_status(405), Err(RequestError::ClientError(405))));
        assert!(matches!(classify_status(499), Err(RequestError::ClientError(499))));
        assert!(matches!(classify_status(500), Err(RequestError::ServerError)));
        assert!(matches!(
            classify_status(501),
            Err(RequestError::ServerErrorStatus(501))
        ));
        assert!(matches!(
            classify_status(599),
            Err(RequestError::ServerErrorStatus(599))
        ));
        assert!(matches!(
            classify_status(600),
            Err(RequestError::Unknown { status: Some(600) })
        ));
    }

    #[test]
    fn classify_informational_and_redirects_are_unknown() {
        for status in [100, 199, 301, 304, 399] {
            assert!(matches!(
                classify_status(status),
                Err(RequestError::Unknown { status: Some(s) }) if s == status
            ));
        }
    }

    #[test]
    fn classify_invalid_metadata_as_zero() {
        for status in [0, 42, 1000, u16::MAX] {
            assert!(matches!(
                classify_status(status),
                Err(RequestError::Unknown { status: Some(0) })
            ));
        }
    }

    #[tokio::test]
    async fn decodes_json_on_success() {
        let transport = MockTransport::new().with_response(
            "/users/1",
            MockTransport::json_response(200, serde_json::json!({"id": 1, "name": "Alice"})),
        );
        let dispatcher = Dispatcher::new(transport);

        let user = dispatcher
            .dispatch::<Json<User>>(message("/users/1"))
            .await
            .unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: "Alice".to_string()
            }
        );
    }

    #[tokio::test]
    async fn mismatched_body_is_decoding_error() {
        let transport = MockTransport::new()
            .with_default_response(MockTransport::json_response(201, serde_json::json!([1, 2])));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher.dispatch::<Json<User>>(message("/users")).await;
        assert!(matches!(result, Err(RequestError::Decoding(_))));
    }

    #[tokio::test]
    async fn status_errors_skip_decoding() {
        let cases: [(u16, fn(&RequestError) -> bool); 6] = [
            (400, |e| matches!(e, RequestError::BadRequest)),
            (401, |e| matches!(e, RequestError::Unauthorized)),
            (404, |e| matches!(e, RequestError::NotFound)),
            (405, |e| matches!(e, RequestError::ClientError(405))),
            (500, |e| matches!(e, RequestError::ServerError)),
            (600, |e| matches!(e, RequestError::Unknown { status: Some(600) })),
        ];

        for (status, expected) in cases {
            let error = status_only(status)
                .dispatch::<Json<User>>(message("/users/1"))
                .await
                .unwrap_err();
            assert!(expected(&error), "status {} produced {:?}", status, error);
        }
    }

    #[tokio::test]
    async fn raw_shape_returns_exact_bytes() {
        let payload: &'static [u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff];
        let transport = MockTransport::new()
            .with_default_response(TransportResponse::new(200, payload));
        let dispatcher = Dispatcher::new(transport);

        let body = dispatcher.dispatch::<Raw>(message("/avatar")).await.unwrap();
        assert_eq!(&body[..], payload);
    }

    #[tokio::test]
    async fn transport_failure_is_wrapped() {
        let dispatcher = Dispatcher::new(MockTransport::new().fail_with("connection refused"));

        match dispatcher.dispatch::<Raw>(message("/")).await {
            Err(RequestError::TransportFailed(inner)) => {
                assert_eq!(inner.to_string(), "connection refused")
            }
            other => panic!("expected TransportFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn transport_request_error_passes_through() {
        let dispatcher = Dispatcher::new(MockTransport::new().timing_out());

        let result = dispatcher.dispatch::<Raw>(message("/slow")).await;
        assert!(matches!(result, Err(RequestError::Timeout)));
    }

    #[tokio::test]
    async fn message_reaches_transport_unchanged() {
        let transport = MockTransport::new()
            .with_default_response(TransportResponse::new(204, ""));
        let dispatcher = Dispatcher::new(transport.clone());

        let mut sent = message("/users/1");
        sent.method = Method::PUT;
        sent.headers
            .insert("Authorization".to_string(), "Bearer t".to_string());
        sent.body = Some(bytes::Bytes::from_static(b"{\"name\":\"Bob\"}"));

        dispatcher
            .dispatch::<crate::shape::Empty>(sent.clone())
            .await
            .unwrap();

        assert_eq!(transport.recorded(), vec![sent]);
    }
}
