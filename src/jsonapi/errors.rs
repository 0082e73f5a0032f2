//! Resource error types and HTTP status normalization.
//!
//! Every resource operation returns [`ResourceError`]. Failures detected
//! locally (malformed identifiers, missing options) never reach the network;
//! failures reported by the server are normalized from the raw response by
//! [`ResourceError::from_response`].
//!
//! # Status Mapping
//!
//! - **404**: [`ResourceError::NotFound`], carrying the server's `detail` when
//!   the error document has one
//! - **400 / 409 / 422** with a parseable error document:
//!   [`ResourceError::ServerValidation`], details verbatim and in order
//! - **anything else**, or an unparseable body: [`ResourceError::Unexpected`]
//!   with the raw status and body
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{ErrorKind, Resource, ResourceError};
//! use scalr_api::resources::Environment;
//!
//! match Environment::read(&client, "env-svrcnhs5").await {
//!     Ok(env) => println!("Found: {}", env.name),
//!     Err(e) if e.kind() == ErrorKind::NotFound => println!("gone: {e}"),
//!     Err(ResourceError::ServerValidation { details, .. }) => {
//!         for detail in details {
//!             println!("{detail}");
//!         }
//!     }
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::{HttpError, HttpResponse};
use crate::jsonapi::document::ErrorDocument;

/// The closed set of error kinds a caller needs to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied identifier is malformed.
    InvalidIdentifier,
    /// Options failed local validation.
    Validation,
    /// The referenced entity does not exist or is not visible.
    NotFound,
    /// The server rejected the payload's content.
    ServerValidation,
    /// The request payload could not be serialized.
    RequestEncoding,
    /// The response body could not be deserialized.
    Decoding,
    /// Any other non-2xx status or transport failure.
    Unexpected,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InvalidIdentifier => "invalid identifier",
            Self::Validation => "validation",
            Self::NotFound => "not found",
            Self::ServerValidation => "server validation",
            Self::RequestEncoding => "request encoding",
            Self::Decoding => "decoding",
            Self::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Error type for resource operations.
///
/// # Example
///
/// ```rust
/// use scalr_api::jsonapi::{ErrorKind, ResourceError};
///
/// let error = ResourceError::NotFound {
///     resource: "Environment",
///     id: Some("env-123".to_string()),
///     detail: None,
/// };
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// assert!(error.to_string().contains("env-123"));
///
/// let error = ResourceError::validation("one of: account,environment,workspace must be provided");
/// assert_eq!(error.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A caller-supplied identifier failed syntactic validation.
    #[error("invalid value for {field}: {value:?} is not a valid {resource} identifier")]
    InvalidIdentifier {
        /// The resource the identifier belongs to.
        resource: &'static str,
        /// The option or path field that carried it.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Options failed local validation.
    #[error("{message}")]
    Validation {
        /// Description of the problem.
        message: String,
    },

    /// The server reported that the entity does not exist (HTTP 404).
    #[error("{}", not_found_message(.resource, .id.as_deref(), .detail.as_deref()))]
    NotFound {
        /// The resource type name (e.g. `"Environment"`).
        resource: &'static str,
        /// The identifier that was requested, if any.
        id: Option<String>,
        /// The server's explanation, when it supplied one.
        detail: Option<String>,
    },

    /// The server rejected the request content (HTTP 400, 409 or 422).
    #[error("request rejected ({status}): {}", .details.join("; "))]
    ServerValidation {
        /// The HTTP status code.
        status: u16,
        /// The server's detail strings, verbatim and in order.
        details: Vec<String>,
        /// The `X-Request-Id` response header.
        request_id: Option<String>,
    },

    /// The request payload could not be encoded.
    #[error("failed to encode request: {message}")]
    RequestEncoding {
        /// Description of the failure.
        message: String,
    },

    /// A successful response could not be decoded.
    #[error("failed to decode response: {message}")]
    Decoding {
        /// Description of the failure.
        message: String,
    },

    /// Any other non-2xx response.
    #[error("unexpected response ({status}): {body}")]
    Unexpected {
        /// The HTTP status code.
        status: u16,
        /// The raw response body.
        body: String,
        /// The `X-Request-Id` response header.
        request_id: Option<String>,
    },

    /// The transport failed to complete the exchange.
    #[error(transparent)]
    Transport(#[from] HttpError),
}

fn not_found_message(resource: &str, id: Option<&str>, detail: Option<&str>) -> String {
    match (detail, id) {
        (Some(detail), _) => detail.to_string(),
        (None, Some(id)) => format!("{resource} with id {id} not found"),
        (None, None) => format!("{resource} not found"),
    }
}

impl ResourceError {
    /// Creates a [`ResourceError::Validation`].
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a [`ResourceError::RequestEncoding`].
    #[must_use]
    pub fn encoding(message: impl fmt::Display) -> Self {
        Self::RequestEncoding {
            message: message.to_string(),
        }
    }

    /// Creates a [`ResourceError::Decoding`].
    #[must_use]
    pub fn decoding(message: impl fmt::Display) -> Self {
        Self::Decoding {
            message: message.to_string(),
        }
    }

    /// Returns the error's kind in the closed taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentifier { .. } => ErrorKind::InvalidIdentifier,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::ServerValidation { .. } => ErrorKind::ServerValidation,
            Self::RequestEncoding { .. } => ErrorKind::RequestEncoding,
            Self::Decoding { .. } => ErrorKind::Decoding,
            Self::Unexpected { .. } | Self::Transport(_) => ErrorKind::Unexpected,
        }
    }

    /// Returns `true` if the error was detected before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. } | Self::Validation { .. } | Self::RequestEncoding { .. }
        )
    }

    /// Returns the HTTP status code, for errors produced from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::ServerValidation { status, .. } | Self::Unexpected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Returns the request ID, if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        match self {
            Self::ServerValidation { request_id, .. } | Self::Unexpected { request_id, .. } => {
                request_id.as_deref()
            }
            _ => None,
        }
    }

    /// Normalizes a non-2xx response.
    ///
    /// `resource` and `id` describe what was being operated on and are used
    /// for `NotFound` messages when the server gives no detail.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::HashMap;
    /// use scalr_api::clients::HttpResponse;
    /// use scalr_api::jsonapi::{ErrorKind, ResourceError};
    ///
    /// let response = HttpResponse::new(
    ///     422,
    ///     HashMap::new(),
    ///     r#"{"errors": [{"status": "422", "detail": "Name has already been taken"}]}"#,
    /// );
    /// let error = ResourceError::from_response(&response, "Environment", None);
    /// assert_eq!(error.kind(), ErrorKind::ServerValidation);
    /// assert!(error.to_string().contains("Name has already been taken"));
    /// ```
    #[must_use]
    pub fn from_response(response: &HttpResponse, resource: &'static str, id: Option<&str>) -> Self {
        let request_id = response.request_id().map(ToString::to_string);
        let details = ErrorDocument::parse(&response.body)
            .map(|doc| doc.messages())
            .unwrap_or_default();

        match response.code {
            404 => Self::NotFound {
                resource,
                id: id.map(ToString::to_string),
                detail: details.into_iter().next(),
            },
            400 | 409 | 422 if !details.is_empty() => Self::ServerValidation {
                status: response.code,
                details,
                request_id,
            },
            status => Self::Unexpected {
                status,
                body: response.body.clone(),
                request_id,
            },
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
