//! VCS revision resource implementation.
//!
//! A VCS revision records the commit a run was triggered from. Revisions are
//! created by the server; this is a read-only resource.

use serde::{Deserialize, Serialize};

use crate::jsonapi::{IdPattern, ListParams, PageOptions, Resource};
use crate::resources::common::VcsProvider;

/// A VCS revision.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct VcsRevision {
    /// The revision ID.
    pub id: String,

    /// The branch the commit was on.
    pub branch: Option<String>,

    /// The commit SHA.
    pub commit_sha: String,

    /// The commit message.
    pub commit_message: Option<String>,

    /// The VCS username of the commit's sender.
    pub sender_username: Option<String>,

    /// The provider the revision was fetched through.
    pub vcs_provider: Option<VcsProvider>,
}

/// Filters for listing VCS revisions.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct VcsRevisionFilter {
    /// Restrict to one commit SHA.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,

    /// Restrict to one branch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Options for [`VcsRevision::list`](Resource::list).
#[derive(Debug, Clone, Default, Serialize)]
pub struct VcsRevisionListOptions {
    /// Page selection.
    pub page: PageOptions,

    /// Filters.
    pub filter: VcsRevisionFilter,
}

impl ListParams for VcsRevisionListOptions {
    fn page(&self) -> PageOptions {
        self.page
    }
}

impl Resource for VcsRevision {
    type ListOptions = VcsRevisionListOptions;
    type ReadOptions = ();

    const NAME: &'static str = "VcsRevision";
    const TYPE: &'static str = "vcs-revisions";
    const PATH: &'static str = "vcs-revisions";
    const ID_PATTERN: IdPattern = IdPattern::Namespaced;

    fn id(&self) -> &str {
        &self.id
    }
}
