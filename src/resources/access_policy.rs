//! Access policy resource implementation.
//!
//! An access policy grants a set of roles to exactly one subject (a user, a
//! team or a service account) on exactly one scope (an account, an
//! environment or a workspace).
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::WritableResource;
//! use scalr_api::resources::{AccessPolicy, AccessPolicyCreateOptions};
//!
//! let policy = AccessPolicy::create(
//!     &client,
//!     &AccessPolicyCreateOptions {
//!         team: Some("team-svrcnhs5".to_string()),
//!         environment: Some("env-svrcnhs5".to_string()),
//!         roles: vec!["user".to_string()],
//!         ..Default::default()
//!     },
//! )
//! .await?;
//! ```
//!
//! Omitting the scope fails locally:
//!
//! ```rust
//! use scalr_api::jsonapi::Validate;
//! use scalr_api::resources::AccessPolicyCreateOptions;
//!
//! let options = AccessPolicyCreateOptions {
//!     user: Some("user-1".to_string()),
//!     roles: vec!["admin".to_string()],
//!     ..Default::default()
//! };
//! assert_eq!(
//!     options.validate().unwrap_err().to_string(),
//!     "one of: account,environment,workspace must be provided"
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::jsonapi::{
    require_non_empty, require_one_of, validate_identifiers, validate_optional_identifier,
    IdPattern, ListParams, PageOptions, RelationshipSpec, Resource, ResourceError, Validate,
    WritableResource,
};
use crate::resources::common::{Account, ServiceAccount, Team, User, Workspace};
use crate::resources::environment::Environment;
use crate::resources::role::Role;
use crate::resources::{
    optional_id_matches, ACCESS_POLICY_ID, ACCOUNT_ID, ENVIRONMENT_ID, ROLE_ID,
    SERVICE_ACCOUNT_ID, TEAM_ID, USER_ID, WORKSPACE_ID,
};

/// An access policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AccessPolicy {
    /// The access policy ID (`ap-…`).
    pub id: String,

    /// Whether the policy is managed by the system.
    pub is_system: bool,

    /// The user subject.
    pub user: Option<User>,

    /// The team subject.
    pub team: Option<Team>,

    /// The service account subject.
    pub service_account: Option<ServiceAccount>,

    /// The account scope.
    pub account: Option<Account>,

    /// The environment scope.
    pub environment: Option<Environment>,

    /// The workspace scope.
    pub workspace: Option<Workspace>,

    /// The granted roles.
    pub roles: Vec<Role>,
}

/// Filters for listing access policies.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccessPolicyFilter {
    /// Restrict to one account scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Restrict to one environment scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Restrict to one workspace scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    /// Restrict to one user subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Restrict to one team subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// Restrict to one service account subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,
}

/// Options for [`AccessPolicy::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessPolicyListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: AccessPolicyFilter,

    /// Relations to include, e.g. `["roles"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl ListParams for AccessPolicyListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }

    fn filters_valid(&self) -> bool {
        let filter = &self.filter;
        optional_id_matches(filter.account.as_deref(), ACCOUNT_ID)
            && optional_id_matches(filter.environment.as_deref(), ENVIRONMENT_ID)
            && optional_id_matches(filter.workspace.as_deref(), WORKSPACE_ID)
            && optional_id_matches(filter.user.as_deref(), USER_ID)
            && optional_id_matches(filter.team.as_deref(), TEAM_ID)
            && optional_id_matches(filter.service_account.as_deref(), SERVICE_ACCOUNT_ID)
    }
}

/// Options for [`AccessPolicy::read_with`](Resource::read_with).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessPolicyReadOptions {
    /// Relations to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

/// Options for creating an access policy.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccessPolicyCreateOptions {
    /// Ignored; the server assigns the ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Grant to a user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Grant to a team.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,

    /// Grant to a service account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account: Option<String>,

    /// Grant on an account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Grant on an environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Grant on a workspace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace: Option<String>,

    /// Roles to grant; at least one.
    pub roles: Vec<String>,
}

impl Validate for AccessPolicyCreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_one_of(&[
            ("user", self.user.is_some()),
            ("team", self.team.is_some()),
            ("service-account", self.service_account.is_some()),
        ])?;
        require_one_of(&[
            ("account", self.account.is_some()),
            ("environment", self.environment.is_some()),
            ("workspace", self.workspace.is_some()),
        ])?;
        require_non_empty("role", &self.roles)?;

        let name = AccessPolicy::NAME;
        validate_optional_identifier(name, "user", self.user.as_deref(), USER_ID)?;
        validate_optional_identifier(name, "team", self.team.as_deref(), TEAM_ID)?;
        validate_optional_identifier(
            name,
            "service-account",
            self.service_account.as_deref(),
            SERVICE_ACCOUNT_ID,
        )?;
        validate_optional_identifier(name, "account", self.account.as_deref(), ACCOUNT_ID)?;
        validate_optional_identifier(
            name,
            "environment",
            self.environment.as_deref(),
            ENVIRONMENT_ID,
        )?;
        validate_optional_identifier(name, "workspace", self.workspace.as_deref(), WORKSPACE_ID)?;
        validate_identifiers(name, "roles", &self.roles, ROLE_ID)
    }
}

/// Options for updating an access policy. Only the granted roles can change.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessPolicyUpdateOptions {
    /// The new set of roles; at least one.
    pub roles: Vec<String>,
}

impl Validate for AccessPolicyUpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        require_non_empty("role", &self.roles)?;
        validate_identifiers(AccessPolicy::NAME, "roles", &self.roles, ROLE_ID)
    }
}

impl Resource for AccessPolicy {
    type ListOptions = AccessPolicyListOptions;
    type ReadOptions = AccessPolicyReadOptions;

    const NAME: &'static str = "AccessPolicy";
    const TYPE: &'static str = "access-policies";
    const PATH: &'static str = "access-policies";
    const ID_PATTERN: IdPattern = ACCESS_POLICY_ID;
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[
        RelationshipSpec::new("user", "users"),
        RelationshipSpec::new("team", "teams"),
        RelationshipSpec::new("service-account", "service-accounts"),
        RelationshipSpec::new("account", "accounts"),
        RelationshipSpec::new("environment", "environments"),
        RelationshipSpec::new("workspace", "workspaces"),
        RelationshipSpec::new("roles", "roles"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl WritableResource for AccessPolicy {
    type CreateOptions = AccessPolicyCreateOptions;
    type UpdateOptions = AccessPolicyUpdateOptions;
}
