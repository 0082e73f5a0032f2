//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that a
//! [`ClientConfig`](crate::ClientConfig) can never hold a malformed hostname
//! or an empty token.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API hostname.
///
/// Accepts a bare host (`example.scalr.io`, optionally with a port) or a host
/// prefixed with an `http://` or `https://` scheme. Bare hosts default to
/// `https`. Paths, queries and fragments are rejected; use
/// [`BasePath`] for the API prefix.
///
/// # Example
///
/// ```rust
/// use scalr_api::Hostname;
///
/// let host = Hostname::new("example.scalr.io").unwrap();
/// assert_eq!(host.scheme(), "https");
/// assert_eq!(host.host(), "example.scalr.io");
/// assert_eq!(host.base_url(), "https://example.scalr.io");
///
/// let local = Hostname::new("http://127.0.0.1:8080").unwrap();
/// assert_eq!(local.base_url(), "http://127.0.0.1:8080");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hostname {
    scheme: &'static str,
    host: String,
}

impl Hostname {
    /// Creates a new validated hostname.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyHostname`] if the value is blank and
    /// [`ConfigError::InvalidHostname`] if it has an unsupported scheme,
    /// contains a path, or contains whitespace.
    pub fn new(hostname: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = hostname.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(ConfigError::EmptyHostname);
        }

        let invalid = || ConfigError::InvalidHostname {
            hostname: trimmed.to_string(),
        };

        let (scheme, host) = if let Some(rest) = trimmed.strip_prefix("https://") {
            ("https", rest)
        } else if let Some(rest) = trimmed.strip_prefix("http://") {
            ("http", rest)
        } else if trimmed.contains("://") {
            return Err(invalid());
        } else {
            ("https", trimmed)
        };

        // A single trailing slash is tolerated, anything after it is a path.
        let host = host.strip_suffix('/').unwrap_or(host);

        if host.is_empty()
            || host.contains(['/', '?', '#'])
            || host.chars().any(char::is_whitespace)
            || host.starts_with(':')
        {
            return Err(invalid());
        }

        Ok(Self {
            scheme,
            host: host.to_lowercase(),
        })
    }

    /// Returns the URL scheme (`https` unless `http://` was given explicitly).
    #[must_use]
    pub const fn scheme(&self) -> &str {
        self.scheme
    }

    /// Returns the host (and port, if any) without the scheme.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns `scheme://host`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.host
    }
}

impl Serialize for Hostname {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.base_url())
    }
}

impl<'de> Deserialize<'de> for Hostname {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// A validated API token.
///
/// The `Debug` implementation masks the value so tokens never end up in logs.
///
/// ```rust
/// use scalr_api::ApiToken;
///
/// let token = ApiToken::new("secret-token").unwrap();
/// assert_eq!(format!("{:?}", token), "ApiToken(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Creates a new validated token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyToken`] if the token is blank.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        Ok(Self(token))
    }
}

impl AsRef<str> for ApiToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(*****)")
    }
}

/// The path prefix every API request is issued under.
///
/// Normalized to a single leading `/` and no trailing `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasePath(String);

impl BasePath {
    /// The default API prefix.
    pub const DEFAULT: &'static str = "/api/iacp/v3";

    /// Creates a new validated base path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBasePath`] if the path contains a query,
    /// a fragment, whitespace, or empty segments.
    pub fn new(path: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = path.into();
        let invalid = || ConfigError::InvalidBasePath { path: raw.clone() };

        let trimmed = raw.trim().trim_matches('/');
        if trimmed.contains(['?', '#']) || trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        if !trimmed.is_empty() && trimmed.split('/').any(str::is_empty) {
            return Err(invalid());
        }

        if trimmed.is_empty() {
            Ok(Self(String::new()))
        } else {
            Ok(Self(format!("/{trimmed}")))
        }
    }
}

impl Default for BasePath {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
