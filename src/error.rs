//! Error types for client configuration.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that an
//! invalid hostname or token is rejected before any client is built.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::{ApiToken, ConfigError};
//!
//! let result = ApiToken::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyToken)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a [`ClientConfig`](crate::ClientConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Hostname cannot be empty.
    #[error("Hostname cannot be empty. Please provide the API hostname (e.g., 'example.scalr.io').")]
    EmptyHostname,

    /// Hostname is malformed.
    #[error("Invalid hostname '{hostname}'. Expected a bare host such as 'example.scalr.io' or 'https://example.scalr.io'.")]
    InvalidHostname {
        /// The hostname that was provided.
        hostname: String,
    },

    /// API token cannot be empty.
    #[error("API token cannot be empty.")]
    EmptyToken,

    /// Base path is malformed.
    #[error("Invalid base path '{path}'. Expected an absolute path such as '/api/iacp/v3'.")]
    InvalidBasePath {
        /// The path that was provided.
        path: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A required environment variable is not set.
    #[error("Environment variable '{name}' is not set.")]
    MissingEnvVar {
        /// The variable name.
        name: &'static str,
    },
}
