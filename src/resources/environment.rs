//! Environment resource implementation.
//!
//! Environments group workspaces inside an account and carry the policy
//! groups enforced on them.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{PageOptions, Resource, WritableResource};
//! use scalr_api::resources::{
//!     Environment, EnvironmentCreateOptions, EnvironmentFilter, EnvironmentListOptions,
//!     EnvironmentUpdateOptions,
//! };
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
//!         page: PageOptions::new(1).with_size(50),
//!         ..Default::default()
//!     }),
//! )
//! .await?;
//!
//! Environment::update(
//!     &client,
//!     &env.id,
//!     &EnvironmentUpdateOptions {
//!         cost_estimation_enabled: Some(true),
//!         ..Default::default()
//!     },
//! )
//! .await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::jsonapi::{
    require, validate_identifier, validate_identifiers, validate_name, IdPattern, ListParams,
    PageOptions, RelationshipSpec, Resource, ResourceError, Validate, WritableResource,
};
use crate::resources::common::{Account, User};
use crate::resources::policy_group::PolicyGroup;
use crate::resources::{optional_id_matches, ACCOUNT_ID, ENVIRONMENT_ID, POLICY_GROUP_ID};

/// The status of an environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EnvironmentStatus {
    /// The environment is in use.
    Active,
    /// The environment is disabled.
    Inactive,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// An environment.
///
/// Relations decode to the related entity; when the relation was not
/// requested via `include`, only its `id` is populated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Environment {
    /// The environment ID (`env-…`).
    pub id: String,

    /// The environment name.
    pub name: String,

    /// The environment status.
    pub status: Option<EnvironmentStatus>,

    /// Whether cost estimation runs for workspaces in this environment.
    pub cost_estimation_enabled: bool,

    /// When the environment was created.
    pub created_at: Option<DateTime<Utc>>,

    /// The owning account.
    pub account: Option<Account>,

    /// The user who created the environment.
    pub created_by: Option<User>,

    /// Policy groups enforced on the environment.
    pub policy_groups: Vec<PolicyGroup>,
}

/// Filters for listing environments.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentFilter {
    /// Restrict to one environment ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Restrict to one account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Restrict by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Options for [`Environment::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: EnvironmentFilter,

    /// Relations to include, e.g. `["created-by"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl ListParams for EnvironmentListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }

    fn filters_valid(&self) -> bool {
        optional_id_matches(self.filter.account.as_deref(), ACCOUNT_ID)
            && optional_id_matches(self.filter.environment.as_deref(), ENVIRONMENT_ID)
    }
}

/// Options for [`Environment::read_with`](Resource::read_with).
#[derive(Debug, Clone, Default, Serialize)]
pub struct EnvironmentReadOptions {
    /// Relations to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

/// Options for creating an environment.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentCreateOptions {
    /// Ignored; the server assigns the ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The environment name.
    pub name: String,

    /// Enable cost estimation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimation_enabled: Option<bool>,

    /// The owning account (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Policy groups to link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_groups: Option<Vec<String>>,
}

impl EnvironmentCreateOptions {
    /// Creates options with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            account: Some(account.into()),
            ..Self::default()
        }
    }
}

impl Validate for EnvironmentCreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        validate_name("name", &self.name)?;
        let account = require("account", self.account.as_deref())?;
        validate_identifier(Environment::NAME, "account", account, ACCOUNT_ID)?;
        if let Some(groups) = &self.policy_groups {
            validate_identifiers(Environment::NAME, "policy-groups", groups, POLICY_GROUP_ID)?;
        }
        Ok(())
    }
}

/// Options for updating an environment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentUpdateOptions {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Enable or disable cost estimation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_estimation_enabled: Option<bool>,

    /// Replace the linked policy groups.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_groups: Option<Vec<String>>,
}

impl Validate for EnvironmentUpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(groups) = &self.policy_groups {
            validate_identifiers(Environment::NAME, "policy-groups", groups, POLICY_GROUP_ID)?;
        }
        Ok(())
    }
}

impl Resource for Environment {
    type ListOptions = EnvironmentListOptions;
    type ReadOptions = EnvironmentReadOptions;

    const NAME: &'static str = "Environment";
    const TYPE: &'static str = "environments";
    const PATH: &'static str = "environments";
    const ID_PATTERN: IdPattern = ENVIRONMENT_ID;
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[
        RelationshipSpec::new("account", "accounts"),
        RelationshipSpec::new("policy-groups", "policy-groups"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl WritableResource for Environment {
    type CreateOptions = EnvironmentCreateOptions;
    type UpdateOptions = EnvironmentUpdateOptions;
}
