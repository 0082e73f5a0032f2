//! JSON:API document shapes.
//!
//! These types describe the wire format only. Responses are parsed into
//! [`Document`] and then flattened by the response decoder; requests are
//! assembled by the request encoder from a [`RelationshipSpec`] table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::jsonapi::pagination::Pagination;

/// Declares that an options field is sent as a relationship rather than an
/// attribute.
///
/// `name` is the wire key as produced by the options' serde representation;
/// `resource_type` is the JSON:API type of the referenced resource(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationshipSpec {
    /// The relationship key, e.g. `"service-account"`.
    pub name: &'static str,
    /// The referenced resource type, e.g. `"service-accounts"`.
    pub resource_type: &'static str,
}

impl RelationshipSpec {
    /// Creates a relationship declaration.
    #[must_use]
    pub const fn new(name: &'static str, resource_type: &'static str) -> Self {
        Self {
            name,
            resource_type,
        }
    }
}

/// A `{type, id}` reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// The resource identifier.
    pub id: String,
}

/// Linkage carried by a relationship: one reference or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-many linkage.
    Many(Vec<ResourceIdentifier>),
    /// To-one linkage.
    One(ResourceIdentifier),
}

/// A relationship entry. `data` is `None` when absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    /// The linkage.
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

/// A resource object as it appears in `data` or `included`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    /// The resource type.
    #[serde(rename = "type")]
    pub kind: String,
    /// The identifier; absent only in client-built create documents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Attribute members.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationship members.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
}

/// Primary data of a response document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A collection response.
    Many(Vec<ResourceObject>),
    /// A single-resource response.
    One(Box<ResourceObject>),
}

/// Top-level `meta` member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DocumentMeta {
    /// Pagination metadata for collection responses.
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A successful response document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Document {
    /// Primary data; `None` when `data` is absent or `null`.
    #[serde(default)]
    pub data: Option<PrimaryData>,
    /// Side-loaded resources.
    #[serde(default)]
    pub included: Vec<ResourceObject>,
    /// Document metadata.
    #[serde(default)]
    pub meta: Option<DocumentMeta>,
}

/// Where in the request an error object points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorSource {
    /// A JSON pointer into the request document.
    #[serde(default)]
    pub pointer: Option<String>,
    /// The offending query parameter.
    #[serde(default)]
    pub parameter: Option<String>,
}

/// One element of an error document's `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorObject {
    /// HTTP status as a string.
    #[serde(default)]
    pub status: Option<String>,
    /// Application error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Short summary.
    #[serde(default)]
    pub title: Option<String>,
    /// Human-readable explanation.
    #[serde(default)]
    pub detail: Option<String>,
    /// Error location.
    #[serde(default)]
    pub source: Option<ErrorSource>,
}

impl ErrorObject {
    /// Returns the most specific human-readable text: `detail`, then `title`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .filter(|d| !d.is_empty())
            .or_else(|| self.title.as_deref().filter(|t| !t.is_empty()))
    }
}

/// An error response document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDocument {
    /// The error objects, in server order.
    pub errors: Vec<ErrorObject>,
}

impl ErrorDocument {
    /// Parses an error document, returning `None` if the body does not have
    /// the `{"errors": [...]}` shape.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Returns the human-readable messages of all error objects, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .filter_map(ErrorObject::message)
            .map(ToString::to_string)
            .collect()
    }
}
