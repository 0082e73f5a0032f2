//! The JSON:API request/response pipeline shared by every resource.
//!
//! # Overview
//!
//! - [`validation`]: identifier and name checks, the [`Validate`] trait
//! - [`request`]: [`build_request`], query and document encoding
//! - [`response`]: decoding of single resources, pages and empty bodies
//! - [`errors`]: [`ResourceError`], [`ErrorKind`] and status normalization
//! - [`pagination`]: [`Page`], [`Pagination`], [`PageOptions`]
//! - [`path`]: collection and member paths with escaping
//! - [`document`]: JSON:API wire types
//! - [`resource`]: the [`Resource`] and [`WritableResource`] traits
//!
//! Every function here is a pure function of its inputs; the only I/O is the
//! single [`Transport`](crate::clients::Transport) call inside the resource
//! traits.

pub mod document;
pub mod errors;
pub mod pagination;
pub mod path;
pub mod request;
pub mod resource;
pub mod response;
pub mod validation;

pub use document::{
    Document, DocumentMeta, ErrorDocument, ErrorObject, ErrorSource, PrimaryData, Relationship,
    RelationshipData, RelationshipSpec, ResourceIdentifier, ResourceObject,
};
pub use errors::{ErrorKind, ResourceError};
pub use pagination::{Page, PageOptions, Pagination};
pub use path::{collection_path, escape_segment, member_path, ResourceOperation};
pub use request::{build_request, encode_document, encode_query, Payload};
pub use resource::{ListParams, Resource, WritableResource};
pub use response::{decode_empty, decode_one, decode_page, ensure_success};
pub use validation::{
    is_valid_identifier, is_valid_name, require, require_non_empty, require_one_of,
    validate_identifier, validate_identifiers, validate_name, validate_optional_identifier,
    IdPattern, Validate,
};
