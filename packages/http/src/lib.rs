//! # courier-http
//!
//! Typed HTTP requests: describe a call, dispatch it, get back either the
//! decoded response or a [`RequestError`].
//!
//! ## Describing requests
//!
//! A [`Request`] supplies a path, method, headers, query parameters, an
//! optional body and the [`ResponseShape`] of the response. Most endpoints
//! don't need a dedicated type and use [`RequestRouter`]:
//!
//! ```ignore
//! use courier_http::{Json, RequestRouter};
//!
//! let request = RequestRouter::<Json<Vec<User>>>::get("/users")
//!     .with_query("page", 2)
//!     .with_header("Authorization", "Bearer token");
//! ```
//!
//! ## Dispatching
//!
//! A [`Client`] resolves the request against its base URL and hands the
//! resulting [`WireMessage`] to a [`Dispatcher`], which executes it over a
//! [`Transport`], classifies the status code and decodes the body:
//!
//! ```ignore
//! use courier_http::{Client, RequestError};
//!
//! let client = Client::new("https://api.example.com")?;
//!
//! match client.dispatch(&request).await {
//!     Ok(users) => println!("{} users", users.len()),
//!     Err(RequestError::Unauthorized) => println!("log in first"),
//!     Err(e) => println!("request failed: {}", e),
//! }
//! ```
//!
//! ## Transports
//!
//! With the default `reqwest` feature, [`ReqwestTransport`] is available and
//! [`Client::new`] uses it. Any other HTTP stack can be plugged in by
//! implementing [`Transport`] and passing it through
//! [`Client::with_dispatcher`].
//!
//! ## Logging
//!
//! Resolution and dispatch emit `tracing` events. Install a subscriber to
//! see them; none is installed by this crate.

pub mod client;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod params;
pub mod request;
pub mod shape;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::{ClientConfig, TransportConfig};
pub use dispatcher::{classify_status, Dispatcher};
pub use error::{BoxError, RequestError, TransportError};
pub use params::to_query_params;
pub use request::{default_headers, Request, RequestRouter};
pub use shape::{Empty, Json, Raw, ResponseShape};
pub use transport::Transport;
pub use types::{Method, QueryValue, TransportResponse, WireMessage};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
