//! Role resource implementation.
//!
//! Roles bundle permissions and are granted through access policies. System
//! roles (e.g. `admin`, `user`) have bare-word identifiers and cannot be
//! modified; custom roles belong to an account.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{
    require, validate_identifier, validate_name, IdPattern, ListParams, PageOptions,
    RelationshipSpec, Resource, ResourceError, Validate, WritableResource,
};
use crate::resources::common::{Account, Permission};
use crate::resources::{optional_id_matches, ACCOUNT_ID, ROLE_ID};

/// A role.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Role {
    /// The role ID.
    pub id: String,

    /// The role name.
    pub name: String,

    /// A description of the role.
    pub description: Option<String>,

    /// Whether this is a built-in role.
    pub is_system: bool,

    /// The owning account; absent for system roles.
    pub account: Option<Account>,

    /// Permissions granted by the role.
    pub permissions: Vec<Permission>,
}

/// Filters for listing roles.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleFilter {
    /// Restrict to one account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Restrict by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Restrict to system or custom roles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_system: Option<bool>,
}

/// Options for [`Role::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: RoleFilter,

    /// Free-text search over role names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Relations to include, e.g. `["permissions"]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

impl ListParams for RoleListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }

    fn filters_valid(&self) -> bool {
        optional_id_matches(self.filter.account.as_deref(), ACCOUNT_ID)
    }
}

fn validate_permissions(permissions: &[String]) -> Result<(), ResourceError> {
    permissions
        .iter()
        .try_for_each(|permission| validate_name("permissions", permission))
}

/// Options for creating a role.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleCreateOptions {
    /// Ignored; the server assigns the ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The role name.
    pub name: String,

    /// A description of the role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The owning account (required).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,

    /// Permission IDs, e.g. `workspaces:read`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Validate for RoleCreateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        validate_name("name", &self.name)?;
        let account = require("account", self.account.as_deref())?;
        validate_identifier(Role::NAME, "account", account, ACCOUNT_ID)?;
        self.permissions
            .as_deref()
            .map_or(Ok(()), validate_permissions)
    }
}

/// Options for updating a role. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleUpdateOptions {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Replace the granted permissions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Validate for RoleUpdateOptions {
    fn validate(&self) -> Result<(), ResourceError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }
        self.permissions
            .as_deref()
            .map_or(Ok(()), validate_permissions)
    }
}

impl Resource for Role {
    type ListOptions = RoleListOptions;
    type ReadOptions = ();

    const NAME: &'static str = "Role";
    const TYPE: &'static str = "roles";
    const PATH: &'static str = "roles";
    const ID_PATTERN: IdPattern = ROLE_ID;
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[
        RelationshipSpec::new("account", "accounts"),
        RelationshipSpec::new("permissions", "permissions"),
    ];

    fn id(&self) -> &str {
        &self.id
    }
}

impl WritableResource for Role {
    type CreateOptions = RoleCreateOptions;
    type UpdateOptions = RoleUpdateOptions;
}
