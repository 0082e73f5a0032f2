//! Integration tests for the HTTP client.
//!
//! These tests run the reqwest-backed client against a wiremock server and
//! verify URL construction, default headers, query and body encoding, and
//! the split between transport errors and non-2xx responses.

mod common;

use common::client_for;
use scalr_api::clients::{DataType, HttpClient, HttpMethod, HttpRequest, Transport};
use scalr_api::{ApiToken, ClientConfig, Hostname, HttpError, InvalidHttpRequestError};
use serde_json::json;
use wiremock::matchers::{body_json, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Headers and URLs
// ============================================================================

#[tokio::test]
async fn test_request_carries_default_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/environments"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/vnd.api+json"))
        .and(header_regex("User-Agent", r"^scalr-api-rust v\d+\.\d+\.\d+"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Get, "environments")
        .build()
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.json().unwrap(), json!({"data": []}));
}

#[tokio::test]
async fn test_user_agent_prefix_is_prepended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_regex("User-Agent", r"^terraform-sync/2\.0 \| scalr-api-rust v"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .hostname(Hostname::new(server.uri()).unwrap())
        .token(ApiToken::new("t").unwrap())
        .user_agent_prefix("terraform-sync/2.0")
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let request = HttpRequest::builder(HttpMethod::Get, "roles").build().unwrap();
    assert_eq!(client.execute(request).await.unwrap().code, 200);
}

#[tokio::test]
async fn test_extra_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("Prefer", "profile=preview"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Get, "agent-pools")
        .header("Prefer", "profile=preview")
        .build()
        .unwrap();
    client.execute(request).await.unwrap();
}

#[test]
fn test_url_for_joins_base_path() {
    let config = ClientConfig::builder()
        .hostname(Hostname::new("Example.Scalr.io").unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    assert_eq!(client.base_uri(), "https://example.scalr.io");
    assert_eq!(client.base_path(), "/api/iacp/v3");
    assert_eq!(
        client.url_for("/environments/env-1"),
        "https://example.scalr.io/api/iacp/v3/environments/env-1"
    );
    assert!(!client.default_headers().contains_key("Authorization"));
}

// ============================================================================
// Query and body encoding
// ============================================================================

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/policy-groups"))
        .and(query_param("page[number]", "2"))
        .and(query_param("filter[name]", "base policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Get, "policy-groups")
        .query_param("page[number]", "2")
        .query_param("filter[name]", "base policies")
        .build()
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert_eq!(response.code, 200);
}

#[tokio::test]
async fn test_document_body_is_sent_with_content_type() {
    let server = MockServer::start().await;
    let document = json!({
        "data": {"type": "roles", "attributes": {"name": "reader"}}
    });
    Mock::given(method("POST"))
        .and(path("/api/iacp/v3/roles"))
        .and(header("Content-Type", "application/vnd.api+json"))
        .and(body_json(document.clone()))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"type": "roles", "id": "role-1", "attributes": {"name": "reader"}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Post, "roles")
        .body(document)
        .body_type(DataType::JsonApi)
        .build()
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.json().unwrap()["data"]["id"], "role-1");
}

// ============================================================================
// Responses and errors
// ============================================================================

#[tokio::test]
async fn test_error_status_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Request-Id", "req-500")
                .set_body_string("boom"),
        )
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Delete, "environments/env-1")
        .build()
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert!(!response.is_ok());
    assert_eq!(response.code, 500);
    assert_eq!(response.body, "boom");
    assert_eq!(response.request_id(), Some("req-500"));
}

#[tokio::test]
async fn test_response_headers_are_lowercased() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Deprecation", "true")
                .set_body_json(json!({"data": []})),
        )
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let request = HttpRequest::builder(HttpMethod::Get, "vcs-revisions")
        .build()
        .unwrap();
    let response = client.execute(request).await.unwrap();

    assert_eq!(response.deprecation(), Some("true"));
    assert_eq!(response.header("DEPRECATION"), Some("true"));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    let client = client_for("http://127.0.0.1:1");

    let request = HttpRequest::builder(HttpMethod::Get, "environments")
        .build()
        .unwrap();
    let err = client.execute(request).await.unwrap_err();

    assert!(matches!(err, HttpError::Network(_)));
}

#[tokio::test]
async fn test_malformed_request_is_rejected_before_sending() {
    let client = client_for("http://127.0.0.1:1");

    let request = HttpRequest {
        http_method: HttpMethod::Patch,
        path: "roles/role-1".to_string(),
        body: None,
        body_type: None,
        query: None,
        extra_headers: None,
    };
    let err = client.execute(request).await.unwrap_err();

    assert!(matches!(
        err,
        HttpError::InvalidRequest(InvalidHttpRequestError::MissingBody { .. })
    ));
}
