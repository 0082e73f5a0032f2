//! The transport boundary.
//!
//! Every resource operation is generic over [`Transport`], which executes a
//! fully-built [`HttpRequest`] and hands back the raw [`HttpResponse`]. The
//! production implementation is [`HttpClient`](crate::clients::HttpClient);
//! tests substitute in-memory doubles.

use std::sync::Arc;

use crate::clients::errors::HttpError;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;

/// Executes a single HTTP exchange.
///
/// Implementations must not retry: one call to [`execute`](Self::execute) is
/// one request on the wire. Non-2xx statuses are returned as `Ok` responses;
/// only failures to complete the exchange are errors.
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request is invalid or the exchange could
    /// not be completed.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

impl<T: Transport> Transport for &T {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request).await
    }
}

impl<T: Transport> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        (**self).execute(request).await
    }
}
