//! Resource definitions.
//!
//! Each resource is a schema expressed as data: an entity struct, its option
//! structs, and a [`Resource`](crate::jsonapi::Resource) implementation
//! naming its type, path, identifier shape and relationships. All request
//! handling lives in [`jsonapi`](crate::jsonapi).
//!
//! | Resource | Operations |
//! |----------|------------|
//! | [`AccessPolicy`] | list, create, read, update, delete |
//! | [`AgentPool`] | list, create, read, update, delete |
//! | [`Environment`] | list, create, read, update, delete |
//! | [`PolicyGroup`] | list, create, read, update, delete |
//! | [`Role`] | list, create, read, update, delete |
//! | [`VcsRevision`] | list, read |
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{Resource, WritableResource};
//! use scalr_api::resources::{Environment, EnvironmentCreateOptions};
//!
//! let env = Environment::create(
//!     &client,
//!     &EnvironmentCreateOptions::new("staging", "acc-svrcncgh453bi8g"),
//! )
//! .await?;
//! Environment::delete(&client, &env.id).await?;
//! ```

pub mod access_policy;
pub mod agent_pool;
pub mod common;
pub mod environment;
pub mod policy_group;
pub mod role;
pub mod vcs_revision;

use crate::jsonapi::IdPattern;

/// `acc-…`
pub const ACCOUNT_ID: IdPattern = IdPattern::Prefixed("acc");
/// `env-…`
pub const ENVIRONMENT_ID: IdPattern = IdPattern::Prefixed("env");
/// `ws-…`
pub const WORKSPACE_ID: IdPattern = IdPattern::Prefixed("ws");
/// `user-…`
pub const USER_ID: IdPattern = IdPattern::Prefixed("user");
/// `team-…`
pub const TEAM_ID: IdPattern = IdPattern::Prefixed("team");
/// `sa-…`
pub const SERVICE_ACCOUNT_ID: IdPattern = IdPattern::Prefixed("sa");
/// `vcs-…`
pub const VCS_PROVIDER_ID: IdPattern = IdPattern::Prefixed("vcs");
/// `pgrp-…`
pub const POLICY_GROUP_ID: IdPattern = IdPattern::Prefixed("pgrp");
/// `apool-…`
pub const AGENT_POOL_ID: IdPattern = IdPattern::Prefixed("apool");
/// `ap-…`
pub const ACCESS_POLICY_ID: IdPattern = IdPattern::Prefixed("ap");
/// Role IDs include bare system role names such as `admin`.
pub const ROLE_ID: IdPattern = IdPattern::Opaque;

pub use access_policy::{
    AccessPolicy, AccessPolicyCreateOptions, AccessPolicyFilter, AccessPolicyListOptions,
    AccessPolicyReadOptions, AccessPolicyUpdateOptions,
};
pub use agent_pool::{
    AgentPool, AgentPoolCreateOptions, AgentPoolFilter, AgentPoolListOptions,
    AgentPoolReadOptions, AgentPoolUpdateOptions,
};
pub use common::{Account, Permission, ServiceAccount, Team, User, VcsProvider, Workspace};
pub use environment::{
    Environment, EnvironmentCreateOptions, EnvironmentFilter, EnvironmentListOptions,
    EnvironmentReadOptions, EnvironmentStatus, EnvironmentUpdateOptions,
};
pub use policy_group::{
    PolicyGroup, PolicyGroupCreateOptions, PolicyGroupFilter, PolicyGroupListOptions,
    PolicyGroupReadOptions, PolicyGroupStatus, PolicyGroupUpdateOptions, VcsRepository,
};
pub use role::{Role, RoleCreateOptions, RoleFilter, RoleListOptions, RoleUpdateOptions};
pub use vcs_revision::{VcsRevision, VcsRevisionFilter, VcsRevisionListOptions};

/// Returns `true` if `value` is absent or matches `pattern`.
pub(crate) fn optional_id_matches(value: Option<&str>, pattern: IdPattern) -> bool {
    value.map_or(true, |id| pattern.matches(id))
}
