//! Policy group resource implementation.
//!
//! A policy group is a set of OPA policies fetched from a VCS repository and
//! enforced on the environments it is linked to.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{
    require, validate_identifier, validate_name, IdPattern, ListParams, PageOptions,
    RelationshipSpec, Resource, ResourceError, Validate, WritableResource,
};
use crate::resources::common::{Account, VcsProvider};
use crate::resources::environment::Environment;
use crate::resources::{
    optional_id_matches, ACCOUNT_ID, ENVIRONMENT_ID, POLICY_GROUP_ID, VCS_PROVIDER_ID,
};

/// The fetch status of a policy group.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyGroupStatus {
    /// Policies are being fetched from VCS.
    Fetching,
    /// Policies are loaded and enforced.
    Active,
    /// The last fetch failed; see `error_message`.
    Errored,
    /// A status this client does not know.
    #[serde(other)]
    Unknown,
}

/// Where a policy group's policies live.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct VcsRepository {
    /// Repository identifier, e.g. `org/policies`.
    pub identifier: String,

    /// Branch to fetch; the default branch when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Sub-directory holding the policies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl VcsRepository {
    /// A repository on its default branch at the root directory.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Self::default()
        }
    }
}

/// A policy group.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct PolicyGroup {
    /// The policy group ID (`pgrp-…`).
    pub id: String,

    /// The policy group name.
    pub name: String,

    /// The OPA version policies are evaluated with.
    pub opa_version: Option<String>,

    /// The fetch status.
    pub status: Option<PolicyGroupStatus>,

    /// The error from the last failed fetch.
    pub error_message: Option<String>,

    /// The source repository.
    pub vcs_repository: Option<VcsRepository>,

    /// The owning account.
    pub account: Option<Account>,

    /// The VCS provider used to fetch policies.
    pub vcs_provider: Option<VcsProvider>,

    /// Environments the group is enforced on.
    pub environments: Vec<Environment>,
}

/// Filters for listing policy groups.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyGroupFilter {
    /// Restrict to one policy group ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_group: Option<String>,

    /// Restrict to one account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Restrict to groups linked to one environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Restrict by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Options for [`PolicyGroup::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyGroupListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: PolicyGroupFilter,

    /// Relations to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl ListParams for PolicyGroupListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }

    fn filters_valid(&self) -> bool {
        optional_id_matches(self.filter.account.as_deref(), ACCOUNT_ID)
            && optional_id_matches(self.filter.environment.as_deref(), ENVIRONMENT_ID)
            && optional_id_matches(self.filter.policy_group.as_deref(), POLICY_GROUP_ID)
    }
}

/// Options for [`PolicyGroup::read_with`](Resource::read_with).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PolicyGroupReadOptions {
    /// Relations to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

/// Options for creating a policy group.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyGroupCreateOptions {
    /// Ignored; the server assigns the ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The policy group name.
    pub name: String,

    /// OPA version; the server default when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opa_version: Option<String>,

    /// The source repository (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repository: Option<VcsRepository>,

    /// The owning account (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// The VCS provider (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_provider: Option<String>,
}

impl Validate for PolicyGroupCreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        validate_name("name", &self.name)?;
        let account = require("account", self.account.as_deref())?;
        validate_identifier(PolicyGroup::NAME, "account", account, ACCOUNT_ID)?;
        let provider = require("vcs-provider", self.vcs_provider.as_deref())?;
        validate_identifier(PolicyGroup::NAME, "vcs-provider", provider, VCS_PROVIDER_ID)?;
        let repository = require("vcs-repository", self.vcs_repository.as_ref())?;
        validate_name("vcs-repository.identifier", &repository.identifier)
    }
}

/// Options for updating a policy group. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PolicyGroupUpdateOptions {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New OPA version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opa_version: Option<String>,

    /// New source repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_repository: Option<VcsRepository>,

    /// New VCS provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_provider: Option<String>,
}

impl Validate for PolicyGroupUpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(provider) = &self.vcs_provider {
            validate_identifier(PolicyGroup::NAME, "vcs-provider", provider, VCS_PROVIDER_ID)?;
        }
        if let Some(repository) = &self.vcs_repository {
            validate_name("vcs-repository.identifier", &repository.identifier)?;
        }
        Ok(())
    }
}

impl Resource for PolicyGroup {
    type ListOptions = PolicyGroupListOptions;
    type ReadOptions = PolicyGroupReadOptions;

    const NAME: &'static str = "PolicyGroup";
    const TYPE: &'static str = "policy-groups";
    const PATH: &'static str = "policy-groups";
    const ID_PATTERN: IdPattern = POLICY_GROUP_ID;
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[
        RelationshipSpec::new("account", "accounts"),
        RelationshipSpec::new("vcs-provider", "vcs-providers"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl WritableResource for PolicyGroup {
    type CreateOptions = PolicyGroupCreateOptions;
    type UpdateOptions = PolicyGroupUpdateOptions;
}
