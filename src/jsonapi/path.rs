//! Resource paths.
//!
//! Each resource lives under one collection path (e.g. `environments`) and
//! each entity under `{collection}/{id}`. Caller-supplied identifiers are
//! percent-escaped before they are joined into a path, so a value that slipped
//! past identifier validation still cannot change the route.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::jsonapi::{collection_path, member_path, ResourceOperation};
//! use scalr_api::clients::HttpMethod;
//!
//! assert_eq!(collection_path("agent-pools"), "agent-pools");
//! assert_eq!(member_path("agent-pools", "apool-1"), "agent-pools/apool-1");
//! assert_eq!(member_path("roles", "a/b"), "roles/a%2Fb");
//! assert_eq!(ResourceOperation::Update.http_method(), HttpMethod::Patch);
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// List a page of the collection (GET /resources).
    List,
    /// Read a single resource by ID (GET /resources/{id}).
    Read,
    /// Create a resource (POST /resources).
    Create,
    /// Update a resource (PATCH /resources/{id}).
    Update,
    /// Delete a resource (DELETE /resources/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the HTTP method for this operation.
    #[must_use]
    pub const fn http_method(&self) -> HttpMethod {
        match self {
            Self::List | Self::Read => HttpMethod::Get,
            Self::Create => HttpMethod::Post,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns `true` if the operation addresses a single entity by ID.
    #[must_use]
    pub const fn is_member(&self) -> bool {
        matches!(self, Self::Read | Self::Update | Self::Delete)
    }
}

/// Percent-escapes a single path segment.
#[must_use]
pub fn escape_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Returns the path of a collection.
#[must_use]
pub fn collection_path(collection: &str) -> String {
    collection.trim_matches('/').to_string()
}

/// Returns the path of one entity in a collection, escaping `id`.
#[must_use]
pub fn member_path(collection: &str, id: &str) -> String {
    format!("{}/{}", collection_path(collection), escape_segment(id))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};
