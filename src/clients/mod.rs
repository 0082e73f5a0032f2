//! HTTP transport types.
//!
//! This module is the boundary between the JSON:API kernel and the network.
//!
//! # Overview
//!
//! - [`Transport`]: the trait every resource operation is generic over
//! - [`HttpClient`]: the reqwest-backed transport
//! - [`HttpRequest`] / [`HttpRequestBuilder`]: a request description
//! - [`HttpResponse`]: a raw response (status, headers, body text)
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`DataType`]: content types for request bodies
//! - [`HttpError`]: failures to execute a request
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::{ClientConfig, Hostname};
//! use scalr_api::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
//!
//! let config = ClientConfig::builder()
//!     .hostname(Hostname::new("example.scalr.io").unwrap())
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "environments")
//!     .query_param("page[size]", "10")
//!     .build()?;
//!
//! let response = client.execute(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! None. One call is one request; retry policy belongs to the caller.
//! Cancellation is pass-through: dropping the returned future, or wrapping it
//! in `tokio::time::timeout`, abandons the in-flight request.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use transport::Transport;
