//! Transport-level error types.
//!
//! These errors describe failures to *execute* a request. A non-2xx status is
//! not a transport error: the transport returns the response and the JSON:API
//! decoder normalizes it into a [`ResourceError`](crate::jsonapi::ResourceError).
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::clients::{HttpError, Transport};
//!
//! match client.execute(request).await {
//!     Ok(response) => println!("status {}", response.code),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(HttpError::Unavailable { message }) => println!("Transport unavailable: {message}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request fails validation before it is sent.
///
/// ```rust
/// use scalr_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without specifying the body type.
    #[error("Cannot set a body without also setting body_type.")]
    MissingBodyType,

    /// A POST or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },

    /// A GET or DELETE request was given a body.
    #[error("Cannot send a body with {method}; encode the payload as query parameters.")]
    UnexpectedBody {
        /// The HTTP method that forbids a body.
        method: String,
    },
}

/// Unified error type for transport failures.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error, including timeouts.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A non-reqwest transport could not complete the call.
    #[error("Transport unavailable: {message}")]
    Unavailable {
        /// Description of the failure.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_error_missing_body() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "PATCH".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use PATCH without specifying data.");
    }

    #[test]
    fn test_invalid_request_error_unexpected_body() {
        let error = InvalidHttpRequestError::UnexpectedBody {
            method: "GET".to_string(),
        };
        assert!(error.to_string().contains("GET"));
        assert!(error.to_string().contains("query parameters"));
    }

    #[test]
    fn test_http_error_wraps_invalid_request() {
        let error: HttpError = InvalidHttpRequestError::MissingBodyType.into();
        assert!(matches!(error, HttpError::InvalidRequest(_)));
        assert_eq!(
            error.to_string(),
            "Cannot set a body without also setting body_type."
        );
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let invalid: &dyn std::error::Error = &InvalidHttpRequestError::MissingBodyType;
        let _ = invalid;

        let unavailable: &dyn std::error::Error = &HttpError::Unavailable {
            message: "offline".to_string(),
        };
        let _ = unavailable;
    }
}
