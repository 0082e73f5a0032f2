//! Related entities that appear only as relationship targets.
//!
//! These types are never read on their own through this crate; they carry
//! whatever the server returns when the relation is included, and just the
//! `id` otherwise.

use serde::{Deserialize, Serialize};

/// An account, the top-level tenant scope.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Account {
    /// The account ID (`acc-…`).
    pub id: String,
    /// The account name.
    pub name: String,
}

/// A workspace.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Workspace {
    /// The workspace ID (`ws-…`).
    pub id: String,
    /// The workspace name.
    pub name: String,
}

/// A user.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct User {
    /// The user ID (`user-…`).
    pub id: String,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub full_name: Option<String>,
}

/// A team.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Team {
    /// The team ID (`team-…`).
    pub id: String,
    /// The team name.
    pub name: String,
}

/// A service account.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct ServiceAccount {
    /// The service account ID (`sa-…`).
    pub id: String,
    /// The service account name.
    pub name: String,
    /// The generated email of the service account.
    pub email: Option<String>,
}

/// A VCS provider connection.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct VcsProvider {
    /// The provider ID (`vcs-…`).
    pub id: String,
    /// The provider name.
    pub name: String,
    /// The provider kind, e.g. `github`.
    pub vcs_type: Option<String>,
}

/// A permission granted by a role, e.g. `workspaces:read`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Permission {
    /// The permission ID.
    pub id: String,
}
