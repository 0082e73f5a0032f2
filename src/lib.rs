//! # Scalr API Rust Client
//!
//! A typed Rust client for the Scalr infrastructure-management API, a
//! JSON:API service exposing access policies, agent pools, roles, policy
//! groups, environments, VCS revisions and more.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ClientConfig`] and [`ClientConfigBuilder`]
//! - An async reqwest-backed [`HttpClient`] behind the [`Transport`] trait
//! - A shared JSON:API pipeline in [`jsonapi`]: identifier validation,
//!   request building, response decoding, pagination and error normalization
//! - Resource definitions in [`resources`], each gaining `list`, `read`,
//!   `create`, `update` and `delete` from the [`Resource`] and
//!   [`WritableResource`] traits
//!
//! ## Quick Start
//!
//! ```rust
//! use scalr_api::{ApiToken, ClientConfig, Hostname, HttpClient};
//!
//! let config = ClientConfig::builder()
//!     .hostname(Hostname::new("example.scalr.io").unwrap())
//!     .token(ApiToken::new("my-token").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let client = HttpClient::new(&config).unwrap();
//! assert_eq!(client.base_uri(), "https://example.scalr.io");
//! ```
//!
//! ## Working with Resources
//!
//! ```rust,ignore
//! use scalr_api::{ClientConfig, HttpClient, Resource, WritableResource};
//! use scalr_api::jsonapi::PageOptions;
//! use scalr_api::resources::{
//!     Environment, EnvironmentCreateOptions, EnvironmentFilter, EnvironmentListOptions,
//! };
//!
//! let client = HttpClient::new(&ClientConfig::from_env()?)?;
//!
//! let env = Environment::create(
//!     &client,
//!     &EnvironmentCreateOptions::new("staging", "acc-svrcncgh453bi8g"),
//! )
//! .await?;
//!
//! let page = Environment::list(
//!     &client,
//!     Some(EnvironmentListOptions {
//!         filter: EnvironmentFilter {
//!             account: Some("acc-svrcncgh453bi8g".to_string()),
//!             ..Default::default()
//!         },
//!         page: PageOptions::new(1),
//!         ..Default::default()
//!     }),
//! )
//! .await?;
//! println!("{} of {} environments", page.len(), page.total_count());
//!
//! Environment::delete(&client, &env.id).await?;
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ResourceError`]; [`ResourceError::kind`] maps it
//! to the closed set of [`ErrorKind`]s. Malformed identifiers and invalid
//! options are rejected before any request is sent.
//!
//! ```rust,ignore
//! use scalr_api::{ErrorKind, Resource};
//! use scalr_api::resources::Role;
//!
//! match Role::read(&client, "admin").await {
//!     Ok(role) => println!("{}", role.name),
//!     Err(e) if e.kind() == ErrorKind::NotFound => println!("no such role"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (requests at `debug`, deprecation
//! notices and missing pagination metadata at `warn`). No subscriber is
//! installed; applications choose their own.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is passed explicitly
//! - **Fail-fast validation**: newtypes and options validate on construction
//!   or before the request is built
//! - **No retries**: one operation is one HTTP request
//! - **Thread-safe**: all public types are `Send + Sync`

pub mod clients;
pub mod config;
pub mod error;
pub mod jsonapi;
pub mod resources;

// Re-export public types at crate root for convenience
pub use config::{ApiToken, BasePath, ClientConfig, ClientConfigBuilder, Hostname};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, Transport,
};

// Re-export the resource pipeline
pub use jsonapi::{
    ErrorKind, IdPattern, ListParams, Page, PageOptions, Pagination, Resource, ResourceError,
    Validate, WritableResource,
};
