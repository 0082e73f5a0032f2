//! Configuration types for the API client.
//!
//! # Overview
//!
//! - [`ClientConfig`]: immutable settings shared by every request
//! - [`ClientConfigBuilder`]: builder for [`ClientConfig`]
//! - [`Hostname`], [`ApiToken`], [`BasePath`]: validated newtypes
//!
//! # Example
//!
//! ```rust
//! use scalr_api::{ClientConfig, Hostname, ApiToken};
//! use std::time::Duration;
//!
//! let config = ClientConfig::builder()
//!     .hostname(Hostname::new("example.scalr.io").unwrap())
//!     .token(ApiToken::new("my-token").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_path().as_ref(), "/api/iacp/v3");
//! ```

mod newtypes;

pub use newtypes::{ApiToken, BasePath, Hostname};

use std::time::Duration;

use crate::error::ConfigError;

/// Environment variable holding the API hostname.
pub const HOSTNAME_ENV: &str = "SCALR_HOSTNAME";

/// Environment variable holding the API token.
pub const TOKEN_ENV: &str = "SCALR_TOKEN";

/// Configuration for the API client.
///
/// `ClientConfig` is `Clone + Send + Sync` and holds no per-request state.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    hostname: Hostname,
    token: Option<ApiToken>,
    base_path: BasePath,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Builds a configuration from `SCALR_HOSTNAME` and `SCALR_TOKEN`.
    ///
    /// The token is optional; a blank token variable is treated as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if `SCALR_HOSTNAME` is not set,
    /// or any validation error from [`Hostname::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let hostname = lookup(HOSTNAME_ENV).ok_or(ConfigError::MissingEnvVar {
            name: HOSTNAME_ENV,
        })?;

        let mut builder = Self::builder().hostname(Hostname::new(hostname)?);
        if let Some(token) = lookup(TOKEN_ENV).filter(|t| !t.trim().is_empty()) {
            builder = builder.token(ApiToken::new(token)?);
        }
        builder.build()
    }

    /// Returns the API hostname.
    #[must_use]
    pub const fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    /// Returns the API token, if configured.
    #[must_use]
    pub const fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref()
    }

    /// Returns the base path requests are issued under.
    #[must_use]
    pub const fn base_path(&self) -> &BasePath {
        &self.base_path
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout, if configured.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

// Verify ClientConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for constructing [`ClientConfig`] instances.
///
/// `hostname` is required. Defaults:
///
/// - `base_path`: [`BasePath::DEFAULT`]
/// - `token`, `user_agent_prefix`, `timeout`: `None`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    hostname: Option<Hostname>,
    token: Option<ApiToken>,
    base_path: Option<BasePath>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API hostname (required).
    #[must_use]
    pub fn hostname(mut self, hostname: Hostname) -> Self {
        self.hostname = Some(hostname);
        self
    }

    /// Sets the API token sent as a bearer credential.
    #[must_use]
    pub fn token(mut self, token: ApiToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Overrides the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: BasePath) -> Self {
        self.base_path = Some(base_path);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the timeout applied to each in-flight request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `hostname` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let hostname = self
            .hostname
            .ok_or(ConfigError::MissingRequiredField { field: "hostname" })?;

        Ok(ClientConfig {
            hostname,
            token: self.token,
            base_path: self.base_path.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
        })
    }
}
