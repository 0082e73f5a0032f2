//! Request construction.
//!
//! [`build_request`] turns a method, a resource path and a [`Payload`] into
//! an [`HttpRequest`]. Read verbs (GET, DELETE) carry their payload in the
//! query string; write verbs (POST, PATCH) carry a JSON:API document. No I/O
//! happens here.
//!
//! Both encoders start from the options' serde representation, so an options
//! struct controls its wire names with `#[serde(rename_all = "kebab-case")]`
//! and omits absent fields with `#[serde(skip_serializing_if = "Option::is_none")]`.
//!
//! # Query encoding
//!
//! Nested objects flatten to bracketed keys and arrays join with commas:
//!
//! ```rust
//! use scalr_api::jsonapi::encode_query;
//! use serde_json::json;
//!
//! let query = encode_query(&json!({
//!     "filter": {"name": "prod", "environment": null},
//!     "page": {"number": 2},
//!     "include": ["account", "created-by"]
//! }))
//! .unwrap();
//!
//! assert_eq!(query["filter[name]"], "prod");
//! assert_eq!(query["page[number]"], "2");
//! assert_eq!(query["include"], "account,created-by");
//! assert!(!query.contains_key("filter[environment]"));
//! ```
//!
//! # Document encoding
//!
//! Keys declared in the resource's [`RelationshipSpec`] table become
//! relationships; every other key becomes an attribute. A client-supplied
//! `id` is always discarded; the update path identifier is used instead.
//!
//! ```rust
//! use scalr_api::jsonapi::{encode_document, RelationshipSpec};
//! use serde_json::json;
//!
//! const RELATIONSHIPS: &[RelationshipSpec] = &[RelationshipSpec::new("account", "accounts")];
//!
//! let doc = encode_document(
//!     "agent-pools",
//!     RELATIONSHIPS,
//!     None,
//!     &json!({"id": "apool-mine", "name": "pool", "account": "acc-1"}),
//! )
//! .unwrap();
//!
//! assert_eq!(doc, json!({
//!     "data": {
//!         "type": "agent-pools",
//!         "attributes": {"name": "pool"},
//!         "relationships": {"account": {"data": {"type": "accounts", "id": "acc-1"}}}
//!     }
//! }));
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::clients::{DataType, HttpMethod, HttpRequest};
use crate::jsonapi::document::RelationshipSpec;
use crate::jsonapi::errors::ResourceError;

/// The payload of a request.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No payload.
    None,
    /// Query parameters, for read verbs.
    Query(BTreeMap<String, String>),
    /// A JSON:API document, for write verbs.
    Document(Value),
}

/// Builds a request descriptor.
///
/// # Errors
///
/// Returns [`ResourceError::RequestEncoding`] if the payload does not suit
/// the verb: a document on GET/DELETE, or a query or no payload on
/// POST/PATCH.
pub fn build_request(
    method: HttpMethod,
    path: &str,
    payload: Payload,
) -> Result<HttpRequest, ResourceError> {
    let builder = HttpRequest::builder(method, path);

    let builder = match (method.is_read(), payload) {
        (true, Payload::None) => builder,
        (true, Payload::Query(query)) if query.is_empty() => builder,
        (true, Payload::Query(query)) => builder.query(query),
        (false, Payload::Document(document)) => {
            builder.body(document).body_type(DataType::JsonApi)
        }
        (true, Payload::Document(_)) => {
            return Err(ResourceError::encoding(format!(
                "{method} cannot carry a document payload"
            )));
        }
        (false, _) => {
            return Err(ResourceError::encoding(format!(
                "{method} requires a document payload"
            )));
        }
    };

    builder.build().map_err(ResourceError::encoding)
}

/// Encodes options as query parameters.
///
/// `null` values, empty arrays and unit values are omitted; output keys are
/// sorted.
///
/// # Errors
///
/// Returns [`ResourceError::RequestEncoding`] if the options fail to
/// serialize or do not serialize to an object.
pub fn encode_query<P: Serialize + ?Sized>(
    params: &P,
) -> Result<BTreeMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(ResourceError::encoding)?;

    let mut query = BTreeMap::new();
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, val) in map {
                flatten_query(key, val, &mut query);
            }
        }
        other => {
            return Err(ResourceError::encoding(format!(
                "query parameters must serialize to an object, got {other}"
            )));
        }
    }

    Ok(query)
}

fn flatten_query(key: String, value: Value, query: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::String(s) => {
            query.insert(key, s);
        }
        Value::Number(n) => {
            query.insert(key, n.to_string());
        }
        Value::Bool(b) => {
            query.insert(key, b.to_string());
        }
        Value::Array(arr) => {
            let values: Vec<String> = arr.into_iter().filter_map(scalar_to_string).collect();
            if !values.is_empty() {
                query.insert(key, values.join(","));
            }
        }
        Value::Object(map) => {
            for (inner, val) in map {
                flatten_query(format!("{key}[{inner}]"), val, query);
            }
        }
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Encodes options as a JSON:API resource document.
///
/// `id` is the primary identifier (the update path id); `None` for creates.
///
/// # Errors
///
/// Returns [`ResourceError::RequestEncoding`] if the options fail to
/// serialize, are not an object, or a relationship value is not an
/// identifier, a list of identifiers, or `null`.
pub fn encode_document<P: Serialize + ?Sized>(
    resource_type: &str,
    relationships: &[RelationshipSpec],
    id: Option<&str>,
    options: &P,
) -> Result<Value, ResourceError> {
    let mut attributes = match serde_json::to_value(options).map_err(ResourceError::encoding)? {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(ResourceError::encoding(format!(
                "{resource_type} options must serialize to an object, got {other}"
            )));
        }
    };

    // The server assigns identity; never forward a caller-supplied id.
    attributes.remove("id");

    let mut relations = Map::new();
    for spec in relationships {
        if let Some(value) = attributes.remove(spec.name) {
            relations.insert(spec.name.to_string(), encode_relationship(spec, value)?);
        }
    }

    let mut data = Map::new();
    data.insert("type".to_string(), Value::String(resource_type.to_string()));
    if let Some(id) = id {
        data.insert("id".to_string(), Value::String(id.to_string()));
    }
    data.insert("attributes".to_string(), Value::Object(attributes));
    if !relations.is_empty() {
        data.insert("relationships".to_string(), Value::Object(relations));
    }

    Ok(json!({ "data": data }))
}

fn encode_relationship(spec: &RelationshipSpec, value: Value) -> Result<Value, ResourceError> {
    let identifier = |id: String| json!({"type": spec.resource_type, "id": id});

    let data = match value {
        Value::Null => Value::Null,
        Value::String(id) => identifier(id),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(id) => Ok(identifier(id)),
                other => Err(ResourceError::encoding(format!(
                    "relationship {} expects identifiers, got {other}",
                    spec.name
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)?,
        other => {
            return Err(ResourceError::encoding(format!(
                "relationship {} expects an identifier, got {other}",
                spec.name
            )));
        }
    };

    Ok(json!({ "data": data }))
}
