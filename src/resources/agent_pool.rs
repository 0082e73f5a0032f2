//! Agent pool resource implementation.
//!
//! An agent pool is a group of self-hosted agents that execute runs for the
//! workspaces linked to it.
//!
//! # Example
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{Resource, WritableResource};
//! use scalr_api::resources::{AgentPool, AgentPoolCreateOptions, AgentPoolUpdateOptions};
//!
//! let pool = AgentPool::create(
//!     &client,
//!     &AgentPoolCreateOptions {
//!         workspaces: Some(vec!["ws-svrcnhs5".to_string()]),
//!         ..AgentPoolCreateOptions::new("on-prem", "acc-svrcncgh453bi8g")
//!     },
//! )
//! .await?;
//!
//! AgentPool::update(
//!     &client,
//!     &pool.id,
//!     &AgentPoolUpdateOptions {
//!         name: Some("on-prem-eu".to_string()),
//!         ..Default::default()
//!     },
//! )
//! .await?;
//! ```

use serde::{Deserialize, Serialize};

use crate::jsonapi::{
    require, validate_identifier, validate_identifiers, validate_name,
    validate_optional_identifier, IdPattern, ListParams, PageOptions, RelationshipSpec,
    Resource, ResourceError, Validate, WritableResource,
};
use crate::resources::common::{Account, Workspace};
use crate::resources::environment::Environment;
use crate::resources::{
    optional_id_matches, ACCOUNT_ID, AGENT_POOL_ID, ENVIRONMENT_ID, WORKSPACE_ID,
};

/// An agent pool.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "kebab-case", default)]
pub struct AgentPool {
    /// The agent pool ID (`apool-…`).
    pub id: String,

    /// The agent pool name.
    pub name: String,

    /// Whether the pool serves VCS provider connections.
    pub vcs_enabled: bool,

    /// The owning account.
    pub account: Option<Account>,

    /// The environment the pool is limited to, if any.
    pub environment: Option<Environment>,

    /// Workspaces that run on this pool.
    pub workspaces: Vec<Workspace>,
}

/// Filters for listing agent pools.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolFilter {
    /// Restrict to one agent pool ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_pool: Option<String>,

    /// Restrict to one account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Restrict to one environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Restrict by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Restrict by VCS support.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_enabled: Option<bool>,
}

/// Options for [`AgentPool::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentPoolListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: AgentPoolFilter,

    /// Relations to include, e.g. `["workspaces"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl ListParams for AgentPoolListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }

    fn filters_valid(&self) -> bool {
        optional_id_matches(self.filter.account.as_deref(), ACCOUNT_ID)
            && optional_id_matches(self.filter.environment.as_deref(), ENVIRONMENT_ID)
            && optional_id_matches(self.filter.agent_pool.as_deref(), AGENT_POOL_ID)
    }
}

/// Options for [`AgentPool::read_with`](Resource::read_with).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentPoolReadOptions {
    /// Relations to include.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

/// Options for creating an agent pool.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolCreateOptions {
    /// Ignored; the server assigns the ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The agent pool name.
    pub name: String,

    /// Serve VCS provider connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vcs_enabled: Option<bool>,

    /// The owning account (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Limit the pool to one environment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,

    /// Workspaces to run on this pool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
}

impl AgentPoolCreateOptions {
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

impl Validate for AgentPoolCreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        validate_name("name", &self.name)?;
        let account = require("account", self.account.as_deref())?;
        validate_identifier(AgentPool::NAME, "account", account, ACCOUNT_ID)?;
        validate_optional_identifier(
            AgentPool::NAME,
            "environment",
            self.environment.as_deref(),
            ENVIRONMENT_ID,
        )?;
        if let Some(workspaces) = &self.workspaces {
            validate_identifiers(AgentPool::NAME, "workspaces", workspaces, WORKSPACE_ID)?;
        }
        Ok(())
    }
}

/// Options for updating an agent pool. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct AgentPoolUpdateOptions {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Replace the linked workspaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<Vec<String>>,
}

impl Validate for AgentPoolUpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        if let Some(workspaces) = &self.workspaces {
            validate_identifiers(AgentPool::NAME, "workspaces", workspaces, WORKSPACE_ID)?;
        }
        Ok(())
    }
}

impl Resource for AgentPool {
    type ListOptions = AgentPoolListOptions;
    type ReadOptions = AgentPoolReadOptions;

    const NAME: &'static str = "AgentPool";
    const TYPE: &'static str = "agent-pools";
    const PATH: &'static str = "agent-pools";
    const ID_PATTERN: IdPattern = AGENT_POOL_ID;
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[
        RelationshipSpec::new("account", "accounts"),
        RelationshipSpec::new("environment", "environments"),
        RelationshipSpec::new("workspaces", "workspaces"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl WritableResource for AgentPool {
    type CreateOptions = AgentPoolCreateOptions;
    type UpdateOptions = AgentPoolUpdateOptions;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jsonapi::{encode_document, ErrorKind};
    use serde_json::json;

    #[test]
    fn test_create_validation() {
        assert!(AgentPoolCreateOptions::new("pool", "acc-1").validate().is_ok());

        let err = AgentPoolCreateOptions::new("", "acc-1").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = AgentPoolCreateOptions {
            account: None,
            ..AgentPoolCreateOptions::new("pool", "acc-1")
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "account is required");

        let err = AgentPoolCreateOptions {
            environment: Some("ws-1".to_string()),
            ..AgentPoolCreateOptions::new("pool", "acc-1")
        }
        .validate()
        .unwrap_err();
        assert!(matches!(
            err,
            ResourceError::InvalidIdentifier { field: "environment", .. }
        ));
    }

    #[test]
    fn test_update_sends_only_present_fields() {
        let options = AgentPoolUpdateOptions {
            workspaces: Some(Vec::new()),
            ..Default::default()
        };
        assert!(options.validate().is_ok());

        let doc = encode_document(
            AgentPool::TYPE,
            AgentPool::RELATIONSHIPS,
            Some("apool-1"),
            &options,
        )
        .unwrap();
        assert_eq!(
            doc,
            json!({
                "data": {
                    "type": "agent-pools",
                    "id": "apool-1",
                    "attributes": {},
                    "relationships": {"workspaces": {"data": []}}
                }
            })
        );
    }

    #[test]
    fn test_list_filters_valid() {
        let options = AgentPoolListOptions {
            filter: AgentPoolFilter {
                agent_pool: Some("apool-1".to_string()),
                environment: Some("env-1".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(options.filters_valid());

        let options = AgentPoolListOptions {
            filter: AgentPoolFilter {
                account: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!options.filters_valid());
    }
}
