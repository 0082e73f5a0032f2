//! Shared test doubles for integration tests.
//!
//! - [`FakeServer`]: an in-memory JSON:API server that stores whatever is
//!   created, serves reads and pages, applies patches and honours deletes
//! - [`PanickingTransport`]: fails the test if any request is executed

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use scalr_api::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use scalr_api::{ApiToken, ClientConfig, Hostname, HttpClient};
use serde_json::{json, Value};

/// Page size used when a list request does not set `page[size]`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Builds an `HttpClient` pointed at a wiremock server.
pub fn client_for(uri: &str) -> HttpClient {
    let config = ClientConfig::builder()
        .hostname(Hostname::new(uri).unwrap())
        .token(ApiToken::new("test-token").unwrap())
        .base_path(scalr_api::BasePath::new("/api/iacp/v3").unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

/// A transport that must never be reached.
pub struct PanickingTransport;

impl Transport for PanickingTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        panic!(
            "transport must not be called, got {} {}",
            request.http_method, request.path
        );
    }
}

#[derive(Default)]
struct State {
    next_id: u64,
    collections: BTreeMap<String, Vec<Value>>,
}

/// A stateful in-memory JSON:API server.
#[derive(Default)]
pub struct FakeServer {
    state: Mutex<State>,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

fn id_prefix(collection: &str) -> &'static str {
    match collection {
        "access-policies" => "ap",
        "agent-pools" => "apool",
        "environments" => "env",
        "policy-groups" => "pgrp",
        "roles" => "role",
        "vcs-revisions" => "vcsrev",
        _ => "obj",
    }
}

fn respond(code: u16, body: Value) -> HttpResponse {
    let mut headers = HashMap::new();
    headers.insert("X-Request-Id".to_string(), vec![format!("fake-{code}")]);
    let body = if body.is_null() {
        String::new()
    } else {
        body.to_string()
    };
    HttpResponse::new(code, headers, body)
}

fn not_found(collection: &str, id: &str) -> HttpResponse {
    respond(
        404,
        json!({"errors": [{
            "status": "404",
            "title": "Not Found",
            "detail": format!("{collection} with ID '{id}' not found or user unauthorized")
        }]}),
    )
}

impl FakeServer {
    /// Creates an empty server.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests executed so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// All requests executed so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Stores a resource object as if it had been created.
    pub fn seed(&self, collection: &str, object: Value) {
        self.state
            .lock()
            .unwrap()
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(object);
    }

    fn create(&self, collection: &str, body: Option<&Value>) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = format!("{}-{}", id_prefix(collection), state.next_id);

        let mut object = body
            .and_then(|b| b.get("data"))
            .cloned()
            .unwrap_or_else(|| json!({}));
        object["id"] = Value::String(id);

        state
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(object.clone());
        respond(201, json!({ "data": object }))
    }

    fn read(&self, collection: &str, id: &str) -> HttpResponse {
        let state = self.state.lock().unwrap();
        state
            .collections
            .get(collection)
            .and_then(|items| items.iter().find(|o| o["id"] == id))
            .map_or_else(
                || not_found(collection, id),
                |object| respond(200, json!({ "data": object })),
            )
    }

    fn update(&self, collection: &str, id: &str, body: Option<&Value>) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let Some(object) = state
            .collections
            .get_mut(collection)
            .and_then(|items| items.iter_mut().find(|o| o["id"] == id))
        else {
            return not_found(collection, id);
        };

        let patch = body.and_then(|b| b.get("data")).cloned().unwrap_or_default();
        for member in ["attributes", "relationships"] {
            if let Some(Value::Object(fields)) = patch.get(member) {
                if !object[member].is_object() {
                    object[member] = json!({});
                }
                for (key, value) in fields {
                    object[member][key] = value.clone();
                }
            }
        }
        respond(200, json!({ "data": object }))
    }

    fn delete(&self, collection: &str, id: &str) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        let Some(items) = state.collections.get_mut(collection) else {
            return not_found(collection, id);
        };
        match items.iter().position(|o| o["id"] == id) {
            Some(index) => {
                items.remove(index);
                respond(204, Value::Null)
            }
            None => not_found(collection, id),
        }
    }

    fn list(&self, collection: &str, query: &BTreeMap<String, String>) -> HttpResponse {
        let state = self.state.lock().unwrap();
        let number: usize = query
            .get("page[number]")
            .and_then(|n| n.parse().ok())
            .unwrap_or(1)
            .max(1);
        let size: usize = query
            .get("page[size]")
            .and_then(|n| n.parse().ok())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .max(1);

        let matching: Vec<&Value> = state
            .collections
            .get(collection)
            .map(|items| {
                items
                    .iter()
                    .filter(|o| {
                        query
                            .get("filter[name]")
                            .map_or(true, |name| o["attributes"]["name"] == name.as_str())
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total_count = matching.len();
        let total_pages = total_count.div_ceil(size);
        let data: Vec<&Value> = matching
            .into_iter()
            .skip((number - 1) * size)
            .take(size)
            .collect();

        respond(
            200,
            json!({
                "data": data,
                "meta": {"pagination": {
                    "current-page": number,
                    "prev-page": if number > 1 { Some(number - 1) } else { None },
                    "next-page": if number < total_pages { Some(number + 1) } else { None },
                    "total-pages": total_pages,
                    "total-count": total_count
                }}
            }),
        )
    }
}

impl Transport for FakeServer {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        let mut segments = request.path.splitn(2, '/');
        let collection = segments.next().unwrap_or_default().to_string();
        let id = segments.next().map(ToString::to_string);
        let empty = BTreeMap::new();
        let query = request.query.as_ref().unwrap_or(&empty);

        let response = match (request.http_method, id.as_deref()) {
            (HttpMethod::Get, None) => self.list(&collection, query),
            (HttpMethod::Post, None) => self.create(&collection, request.body.as_ref()),
            (HttpMethod::Get, Some(id)) => self.read(&collection, id),
            (HttpMethod::Patch, Some(id)) => self.update(&collection, id, request.body.as_ref()),
            (HttpMethod::Delete, Some(id)) => self.delete(&collection, id),
            (method, _) => respond(
                405,
                json!({"errors": [{"status": "405", "detail": format!("{method} not allowed")}]}),
            ),
        };
        Ok(response)
    }
}
