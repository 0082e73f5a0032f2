//! Response decoding.
//!
//! A successful JSON:API response is decoded in two steps. Each resource
//! object is first flattened into a single JSON object holding its `id`, its
//! attributes and its relationships; the flat object is then handed to serde
//! as the entity type. A relationship becomes a nested object when the
//! related resource is present in `included`, and an `{"id": …}` stub when it
//! is not, so a relation field typed as the related entity always decodes:
//!
//! ```rust
//! use std::collections::HashMap;
//! use scalr_api::clients::HttpResponse;
//! use scalr_api::jsonapi::decode_one;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Account { id: String, name: String }
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default)]
//! struct Environment { id: String, name: String, account: Option<Account> }
//!
//! let body = r#"{
//!     "data": {
//!         "type": "environments", "id": "env-1",
//!         "attributes": {"name": "prod"},
//!         "relationships": {"account": {"data": {"type": "accounts", "id": "acc-1"}}}
//!     }
//! }"#;
//! let response = HttpResponse::new(200, HashMap::new(), body);
//!
//! let env: Environment = decode_one(&response, "Environment", None).unwrap();
//! assert_eq!(env.name, "prod");
//! assert_eq!(env.account.unwrap().id, "acc-1");
//! ```
//!
//! Included resources are flattened one level only: their own relationships
//! are left as identifier stubs, which keeps cyclic includes finite.
//!
//! Non-2xx responses are normalized through [`ResourceError::from_response`].

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::HttpResponse;
use crate::jsonapi::document::{
    Document, PrimaryData, RelationshipData, ResourceIdentifier, ResourceObject,
};
use crate::jsonapi::errors::ResourceError;
use crate::jsonapi::pagination::{Page, Pagination};

/// Side-loaded resources keyed by `(type, id)`.
struct IncludedIndex<'a> {
    objects: HashMap<(&'a str, &'a str), &'a ResourceObject>,
}

impl<'a> IncludedIndex<'a> {
    fn new(included: &'a [ResourceObject]) -> Self {
        let objects = included
            .iter()
            .filter_map(|object| {
                object
                    .id
                    .as_deref()
                    .map(|id| ((object.kind.as_str(), id), object))
            })
            .collect();
        Self { objects }
    }

    fn resolve(&self, identifier: &ResourceIdentifier) -> Value {
        self.objects
            .get(&(identifier.kind.as_str(), identifier.id.as_str()))
            .map_or_else(|| stub(identifier), |object| flatten(object, None))
    }
}

fn stub(identifier: &ResourceIdentifier) -> Value {
    let mut map = Map::new();
    map.insert("id".to_string(), Value::String(identifier.id.clone()));
    Value::Object(map)
}

/// Flattens a resource object. With an index, relationships resolve against
/// it; without one, they become identifier stubs.
fn flatten(object: &ResourceObject, included: Option<&IncludedIndex<'_>>) -> Value {
    let mut map = object.attributes.clone();

    if let Some(id) = &object.id {
        map.insert("id".to_string(), Value::String(id.clone()));
    }

    for (name, relationship) in &object.relationships {
        let resolve = |identifier: &ResourceIdentifier| {
            included.map_or_else(|| stub(identifier), |index| index.resolve(identifier))
        };

        let value = match &relationship.data {
            None => continue,
            Some(RelationshipData::One(identifier)) => resolve(identifier),
            Some(RelationshipData::Many(identifiers)) => {
                Value::Array(identifiers.iter().map(resolve).collect())
            }
        };
        map.insert(name.clone(), value);
    }

    Value::Object(map)
}

/// Returns the normalized error for a non-2xx response.
///
/// # Errors
///
/// Returns the [`ResourceError`] produced by [`ResourceError::from_response`]
/// when the status is not 2xx.
pub fn ensure_success(
    response: &HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<(), ResourceError> {
    if response.is_ok() {
        Ok(())
    } else {
        Err(ResourceError::from_response(response, resource, id))
    }
}

fn parse_document(response: &HttpResponse) -> Result<Document, ResourceError> {
    if response.is_empty() {
        return Err(ResourceError::decoding(format!(
            "expected a JSON:API document, got an empty body (status {})",
            response.code
        )));
    }
    serde_json::from_str(&response.body).map_err(ResourceError::decoding)
}

fn into_entity<T: DeserializeOwned>(flat: Value, resource: &str) -> Result<T, ResourceError> {
    serde_json::from_value(flat)
        .map_err(|e| ResourceError::decoding(format!("invalid {resource} resource: {e}")))
}

/// Decodes a single-resource response.
///
/// # Errors
///
/// Returns the normalized error for a non-2xx status, or
/// [`ResourceError::Decoding`] if the body is empty, not a document, or does
/// not hold exactly one resource of the expected shape.
pub fn decode_one<T: DeserializeOwned>(
    response: &HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<T, ResourceError> {
    ensure_success(response, resource, id)?;

    let document = parse_document(response)?;
    let index = IncludedIndex::new(&document.included);

    match &document.data {
        Some(PrimaryData::One(object)) => into_entity(flatten(object, Some(&index)), resource),
        Some(PrimaryData::Many(_)) => Err(ResourceError::decoding(format!(
            "expected a single {resource}, got a collection"
        ))),
        None => Err(ResourceError::decoding(format!(
            "expected a single {resource}, got no data"
        ))),
    }
}

/// Decodes a collection response into a [`Page`].
///
/// `requested_page` is reported as the current page when the server omits
/// pagination metadata.
///
/// # Errors
///
/// Returns the normalized error for a non-2xx status, or
/// [`ResourceError::Decoding`] if the body is not a collection document or an
/// item does not match the entity shape.
pub fn decode_page<T: DeserializeOwned>(
    response: &HttpResponse,
    resource: &'static str,
    requested_page: u32,
) -> Result<Page<T>, ResourceError> {
    ensure_success(response, resource, None)?;

    let document = parse_document(response)?;
    let index = IncludedIndex::new(&document.included);

    let items = match &document.data {
        Some(PrimaryData::Many(objects)) => objects
            .iter()
            .map(|object| into_entity(flatten(object, Some(&index)), resource))
            .collect::<Result<Vec<T>, _>>()?,
        Some(PrimaryData::One(_)) => {
            return Err(ResourceError::decoding(format!(
                "expected a {resource} collection, got a single resource"
            )));
        }
        None => Vec::new(),
    };

    let pagination = match document.meta.and_then(|meta| meta.pagination) {
        Some(pagination) if pagination.current_page == 0 => Pagination {
            current_page: requested_page,
            ..pagination
        },
        Some(pagination) => pagination,
        None => {
            tracing::warn!(
                resource,
                requested_page,
                "collection response has no pagination metadata"
            );
            let total_count = items.len() as u64;
            Pagination {
                current_page: requested_page,
                total_pages: u32::from(total_count > 0),
                total_count,
                ..Pagination::default()
            }
        }
    };

    Ok(Page::new(items, pagination))
}

/// Checks a response that carries no value (typically a delete).
///
/// Any body on a 2xx response is ignored.
///
/// # Errors
///
/// Returns the normalized error for a non-2xx status.
pub fn decode_empty(
    response: &HttpResponse,
    resource: &'static str,
    id: Option<&str>,
) -> Result<(), ResourceError> {
    ensure_success(response, resource, id)
}
