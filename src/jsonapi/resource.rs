//! Resource traits for CRUD operations.
//!
//! A resource is described entirely by data: its names, the identifier shape
//! its path accepts, which option keys are relationships, and the option
//! types for each operation. [`Resource`] then provides `list`, `read` and
//! `read_with`; [`WritableResource`] adds `create`, `update` and `delete`.
//!
//! Every operation follows the same steps:
//!
//! 1. validate the path identifier and the options locally; on failure
//!    return at once without touching the transport
//! 2. encode the options (query for reads, document for writes; a
//!    caller-supplied `id` is dropped from create payloads)
//! 3. execute exactly one request through the [`Transport`]
//! 4. decode the response, or normalize the error status
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use scalr_api::jsonapi::{IdPattern, ListParams, PageOptions, RelationshipSpec, Resource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! #[serde(rename_all = "kebab-case", default)]
//! pub struct Team {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Clone, Default, Serialize)]
//! pub struct TeamListOptions {
//!     pub page: PageOptions,
//! }
//!
//! impl ListParams for TeamListOptions {
//!     fn page(&self) -> PageOptions {
//!         self.page
//!     }
//! }
//!
//! impl Resource for Team {
//!     type ListOptions = TeamListOptions;
//!     type ReadOptions = ();
//!
//!     const NAME: &'static str = "Team";
//!     const TYPE: &'static str = "teams";
//!     const PATH: &'static str = "teams";
//!     const ID_PATTERN: IdPattern = IdPattern::Prefixed("team");
//!
//!     fn id(&self) -> &str {
//!         &self.id
//!     }
//! }
//!
//! // Usage:
//! let team = Team::read(&client, "team-svrcnhs5").await?;
//! let teams = Team::list(&client, None).await?;
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::{HttpRequest, Transport};
use crate::jsonapi::document::RelationshipSpec;
use crate::jsonapi::errors::ResourceError;
use crate::jsonapi::pagination::{Page, PageOptions};
use crate::jsonapi::path::{collection_path, member_path, ResourceOperation};
use crate::jsonapi::request::{build_request, encode_document, encode_query, Payload};
use crate::jsonapi::response::{decode_empty, decode_one, decode_page};
use crate::jsonapi::validation::{validate_identifier, IdPattern, Validate};

/// Options accepted by a list operation.
pub trait ListParams: Serialize + Default + Send + Sync {
    /// The requested page.
    fn page(&self) -> PageOptions;

    /// Returns `false` if a scope filter is malformed.
    ///
    /// A list call with malformed filters returns an empty page without
    /// contacting the server, whereas a malformed path identifier is an error.
    fn filters_valid(&self) -> bool {
        true
    }
}

/// Builds the request for `operation` on `collection`.
///
/// Member operations address `{collection}/{id}` and require `id`; list and
/// create address the collection and must not be given one.
fn operation_request(
    operation: ResourceOperation,
    collection: &str,
    id: Option<&str>,
    payload: Payload,
) -> Result<HttpRequest, ResourceError> {
    let path = match (operation.is_member(), id) {
        (true, Some(id)) => member_path(collection, id),
        (false, None) => collection_path(collection),
        (true, None) => {
            return Err(ResourceError::encoding(format!(
                "{} requires an identifier",
                operation.as_str()
            )));
        }
        (false, Some(_)) => {
            return Err(ResourceError::encoding(format!(
                "{} does not take an identifier",
                operation.as_str()
            )));
        }
    };

    tracing::debug!(operation = operation.as_str(), %path, "building request");
    build_request(operation.http_method(), &path, payload)
}

/// A resource that can be listed and read.
///
/// # Associated Constants
///
/// - `NAME`: display name used in errors (e.g. `"Environment"`)
/// - `TYPE`: JSON:API type (e.g. `"environments"`)
/// - `PATH`: collection path relative to the base path
/// - `ID_PATTERN`: accepted shape of path identifiers
/// - `RELATIONSHIPS`: option keys sent as relationships on writes
#[allow(async_fn_in_trait)]
pub trait Resource: DeserializeOwned + Clone + Send + Sync + Sized {
    /// Options for `list()`.
    type ListOptions: ListParams;

    /// Options for `read_with()`; use `()` if none.
    type ReadOptions: Serialize + Default + Send + Sync;

    /// The display name of the resource.
    const NAME: &'static str;

    /// The JSON:API resource type.
    const TYPE: &'static str;

    /// The collection path.
    const PATH: &'static str;

    /// The accepted shape of this resource's identifiers.
    const ID_PATTERN: IdPattern;

    /// Option keys encoded as relationships.
    const RELATIONSHIPS: &'static [RelationshipSpec] = &[];

    /// Returns the resource's identifier.
    fn id(&self) -> &str;

    /// Checks a path identifier against [`ID_PATTERN`](Self::ID_PATTERN).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] if `id` is malformed.
    fn validate_id(id: &str) -> Result<(), ResourceError> {
        validate_identifier(Self::NAME, "id", id, Self::ID_PATTERN)
    }

    /// Lists one page of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if encoding, the transport or decoding fails,
    /// or the server answers with an error status.
    async fn list<C: Transport>(
        client: &C,
        options: Option<Self::ListOptions>,
    ) -> Result<Page<Self>, ResourceError> {
        let options = options.unwrap_or_default();
        let requested_page = options.page().requested_page();

        if !options.filters_valid() {
            tracing::debug!(
                resource = Self::NAME,
                "malformed scope filter, returning an empty page"
            );
            return Ok(Page::empty(requested_page));
        }

        let request = operation_request(
            ResourceOperation::List,
            Self::PATH,
            None,
            Payload::Query(encode_query(&options)?),
        )?;
        let response = client.execute(request).await?;

        decode_page(&response, Self::NAME, requested_page)
    }

    /// Reads a single resource by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] without a request if `id`
    /// is malformed, [`ResourceError::NotFound`] if it does not exist, or
    /// another [`ResourceError`] on failure.
    async fn read<C: Transport>(client: &C, id: &str) -> Result<Self, ResourceError> {
        Self::read_with(client, id, Self::ReadOptions::default()).await
    }

    /// Reads a single resource by ID with read options (e.g. `include`).
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read).
    async fn read_with<C: Transport>(
        client: &C,
        id: &str,
        options: Self::ReadOptions,
    ) -> Result<Self, ResourceError> {
        Self::validate_id(id)?;

        let request = operation_request(
            ResourceOperation::Read,
            Self::PATH,
            Some(id),
            Payload::Query(encode_query(&options)?),
        )?;
        let response = client.execute(request).await?;

        decode_one(&response, Self::NAME, Some(id))
    }
}

/// A resource that can also be created, updated and deleted.
#[allow(async_fn_in_trait)]
pub trait WritableResource: Resource {
    /// Options for `create()`.
    type CreateOptions: Serialize + Validate + Send + Sync;

    /// Options for `update()`.
    type UpdateOptions: Serialize + Validate + Send + Sync;

    /// Creates a resource.
    ///
    /// Any `id` in the options is discarded; the server assigns identity.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] or
    /// [`ResourceError::InvalidIdentifier`] without a request if the options
    /// fail local validation, or another [`ResourceError`] on failure.
    async fn create<C: Transport>(
        client: &C,
        options: &Self::CreateOptions,
    ) -> Result<Self, ResourceError> {
        options.validate()?;

        let document = encode_document(Self::TYPE, Self::RELATIONSHIPS, None, options)?;
        let request = operation_request(
            ResourceOperation::Create,
            Self::PATH,
            None,
            Payload::Document(document),
        )?;
        let response = client.execute(request).await?;

        decode_one(&response, Self::NAME, None)
    }

    /// Updates the resource with the given ID.
    ///
    /// Only fields present in the options are sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] or
    /// [`ResourceError::Validation`] without a request on local failures, or
    /// another [`ResourceError`] on failure.
    async fn update<C: Transport>(
        client: &C,
        id: &str,
        options: &Self::UpdateOptions,
    ) -> Result<Self, ResourceError> {
        Self::validate_id(id)?;
        options.validate()?;

        let document = encode_document(Self::TYPE, Self::RELATIONSHIPS, Some(id), options)?;
        let request = operation_request(
            ResourceOperation::Update,
            Self::PATH,
            Some(id),
            Payload::Document(document),
        )?;
        let response = client.execute(request).await?;

        decode_one(&response, Self::NAME, Some(id))
    }

    /// Deletes the resource with the given ID.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidIdentifier`] without a request if `id`
    /// is malformed, [`ResourceError::NotFound`] if it does not exist, or
    /// another [`ResourceError`] on failure.
    async fn delete<C: Transport>(client: &C, id: &str) -> Result<(), ResourceError> {
        Self::validate_id(id)?;

        let request = operation_request(
            ResourceOperation::Delete,
            Self::PATH,
            Some(id),
            Payload::None,
        )?;
        let response = client.execute(request).await?;

        decode_empty(&response, Self::NAME, Some(id))
    }
}
