//! Integration tests for resource operations over HTTP.
//!
//! Each test mounts wiremock responses shaped like the API's JSON:API
//! documents and drives a resource through the real [`HttpClient`].

mod common;

use common::client_for;
use scalr_api::jsonapi::PageOptions;
use scalr_api::resources::{
    AccessPolicy, AccessPolicyCreateOptions, AgentPool, AgentPoolFilter, AgentPoolListOptions,
    Environment, EnvironmentReadOptions, EnvironmentStatus, PolicyGroup, PolicyGroupCreateOptions,
    PolicyGroupStatus, Role, RoleFilter, RoleListOptions, RoleUpdateOptions, VcsRepository,
    VcsRevision, VcsRevisionFilter, VcsRevisionListOptions,
};
use scalr_api::{ErrorKind, Resource, ResourceError, WritableResource};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Reads and compound documents
// ============================================================================

#[tokio::test]
async fn test_read_environment_with_included_policy_groups() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/environments/env-svrcnhs5"))
        .and(query_param("include", "policy-groups,created-by"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "type": "environments",
                "id": "env-svrcnhs5",
                "attributes": {
                    "name": "production",
                    "status": "Active",
                    "cost-estimation-enabled": true,
                    "created-at": "2024-03-01T10:00:00Z"
                },
                "relationships": {
                    "account": {"data": {"type": "accounts", "id": "acc-1"}},
                    "created-by": {"data": {"type": "users", "id": "user-1"}},
                    "policy-groups": {"data": [{"type": "policy-groups", "id": "pgrp-1"}]}
                }
            },
            "included": [
                {
                    "type": "policy-groups",
                    "id": "pgrp-1",
                    "attributes": {"name": "cis", "status": "active"},
                    "relationships": {
                        "environments": {"data": [{"type": "environments", "id": "env-svrcnhs5"}]}
                    }
                },
                {
                    "type": "users",
                    "id": "user-1",
                    "attributes": {"email": "ops@example.com", "full-name": "Ops"}
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let environment = Environment::read_with(
        &client,
        "env-svrcnhs5",
        EnvironmentReadOptions {
            include: Some(vec!["policy-groups".to_string(), "created-by".to_string()]),
        },
    )
    .await
    .unwrap();

    assert_eq!(environment.name, "production");
    assert_eq!(environment.status, Some(EnvironmentStatus::Active));
    assert!(environment.created_at.is_some());
    assert_eq!(environment.account.as_ref().unwrap().id, "acc-1");
    assert_eq!(
        environment.created_by.as_ref().unwrap().email,
        "ops@example.com"
    );

    let group = &environment.policy_groups[0];
    assert_eq!(group.name, "cis");
    assert_eq!(group.status, Some(PolicyGroupStatus::Active));
    assert_eq!(group.environments[0].id, "env-svrcnhs5");
    assert!(group.environments[0].name.is_empty());
}

#[tokio::test]
async fn test_read_system_role_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/roles/admin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "type": "roles",
                "id": "admin",
                "attributes": {"name": "admin", "is-system": true},
                "relationships": {
                    "account": {"data": null},
                    "permissions": {"data": [
                        {"type": "permissions", "id": "*:*"}
                    ]}
                }
            }
        })))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let role = Role::read(&client, "admin").await.unwrap();

    assert!(role.is_system);
    assert!(role.account.is_none());
    assert_eq!(role.permissions[0].id, "*:*");
}

#[tokio::test]
async fn test_unknown_status_values_are_tolerated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/policy-groups/pgrp-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "type": "policy-groups",
                "id": "pgrp-1",
                "attributes": {"name": "cis", "status": "archiving"}
            }
        })))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let group = PolicyGroup::read(&client, "pgrp-1").await.unwrap();
    assert_eq!(group.status, Some(PolicyGroupStatus::Unknown));
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
async fn test_list_agent_pools_sends_page_and_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/agent-pools"))
        .and(query_param("page[number]", "2"))
        .and(query_param("page[size]", "1"))
        .and(query_param("filter[account]", "acc-1"))
        .and(query_param("filter[vcs-enabled]", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"type": "agent-pools", "id": "apool-2", "attributes": {"name": "b", "vcs-enabled": true}}
            ],
            "meta": {"pagination": {
                "current-page": 2, "prev-page": 1, "next-page": 3,
                "total-pages": 3, "total-count": 3
            }}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let page = AgentPool::list(
        &client,
        Some(AgentPoolListOptions {
            page: PageOptions::new(2).with_size(1),
            filter: AgentPoolFilter {
                account: Some("acc-1".to_string()),
                vcs_enabled: Some(true),
                ..Default::default()
            },
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert_eq!(page.len(), 1);
    assert!(page[0].vcs_enabled);
    assert_eq!(page.prev_page(), Some(1));
    assert_eq!(page.next_page(), Some(3));
    assert_eq!(page.total_count(), 3);
}

#[tokio::test]
async fn test_list_roles_with_query_and_system_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/roles"))
        .and(query_param("query", "read"))
        .and(query_param("filter[is-system]", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "meta": {"pagination": {"current-page": 1, "total-pages": 0, "total-count": 0}}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let page = Role::list(
        &client,
        Some(RoleListOptions {
            query: Some("read".to_string()),
            filter: RoleFilter {
                is_system: Some(false),
                ..Default::default()
            },
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.current_page(), 1);
}

#[tokio::test]
async fn test_list_without_meta_synthesizes_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/vcs-revisions"))
        .and(query_param("filter[branch]", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"type": "vcs-revisions", "id": "vcsrev-1", "attributes": {"commit-sha": "a1"}},
                {"type": "vcs-revisions", "id": "vcsrev-2", "attributes": {"commit-sha": "b2"}}
            ]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let page = VcsRevision::list(
        &client,
        Some(VcsRevisionListOptions {
            filter: VcsRevisionFilter {
                branch: Some("main".to_string()),
                ..Default::default()
            },
            ..Default::default()
        }),
    )
    .await
    .unwrap();

    let shas: Vec<&str> = page.iter().map(|r| r.commit_sha.as_str()).collect();
    assert_eq!(shas, ["a1", "b2"]);
    assert_eq!(page.current_page(), 1);
    assert_eq!(page.total_pages(), 1);
    assert_eq!(page.total_count(), 2);
}

// ============================================================================
// Writes
// ============================================================================

#[tokio::test]
async fn test_create_policy_group_encodes_relationships_and_nested_attributes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/iacp/v3/policy-groups"))
        .and(body_partial_json(json!({
            "data": {
                "type": "policy-groups",
                "attributes": {
                    "name": "cis",
                    "vcs-repository": {"identifier": "org/policies", "branch": "main"}
                },
                "relationships": {
                    "account": {"data": {"type": "accounts", "id": "acc-1"}},
                    "vcs-provider": {"data": {"type": "vcs-providers", "id": "vcs-1"}}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "type": "policy-groups",
                "id": "pgrp-new",
                "attributes": {
                    "name": "cis",
                    "status": "fetching",
                    "vcs-repository": {"identifier": "org/policies", "branch": "main"}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let options = PolicyGroupCreateOptions {
        name: "cis".to_string(),
        account: Some("acc-1".to_string()),
        vcs_provider: Some("vcs-1".to_string()),
        vcs_repository: Some(VcsRepository {
            branch: Some("main".to_string()),
            ..VcsRepository::new("org/policies")
        }),
        ..Default::default()
    };
    let group = PolicyGroup::create(&client, &options).await.unwrap();

    assert_eq!(group.id, "pgrp-new");
    assert_eq!(group.status, Some(PolicyGroupStatus::Fetching));
    assert_eq!(group.vcs_repository.unwrap().identifier, "org/policies");
}

#[tokio::test]
async fn test_create_access_policy_sends_roles_as_relationship() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/iacp/v3/access-policies"))
        .and(body_partial_json(json!({
            "data": {
                "relationships": {
                    "team": {"data": {"type": "teams", "id": "team-1"}},
                    "workspace": {"data": {"type": "workspaces", "id": "ws-1"}},
                    "roles": {"data": [
                        {"type": "roles", "id": "user"},
                        {"type": "roles", "id": "role-2"}
                    ]}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "type": "access-policies",
                "id": "ap-1",
                "attributes": {"is-system": false},
                "relationships": {
                    "team": {"data": {"type": "teams", "id": "team-1"}},
                    "workspace": {"data": {"type": "workspaces", "id": "ws-1"}},
                    "roles": {"data": [
                        {"type": "roles", "id": "user"},
                        {"type": "roles", "id": "role-2"}
                    ]}
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let policy = AccessPolicy::create(
        &client,
        &AccessPolicyCreateOptions {
            team: Some("team-1".to_string()),
            workspace: Some("ws-1".to_string()),
            roles: vec!["user".to_string(), "role-2".to_string()],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(policy.team.unwrap().id, "team-1");
    assert!(policy.user.is_none());
    assert_eq!(policy.roles.len(), 2);
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/iacp/v3/agent-pools/apool-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    AgentPool::delete(&client, "apool-1").await.unwrap();
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn test_unprocessable_entity_is_server_validation() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/iacp/v3/roles/role-1"))
        .respond_with(
            ResponseTemplate::new(422)
                .insert_header("X-Request-Id", "req-422")
                .set_body_json(json!({"errors": [
                    {"status": "422", "title": "Invalid Attribute",
                     "detail": "Role with name 'reader' already exists."}
                ]})),
        )
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let err = Role::update(
        &client,
        "role-1",
        &RoleUpdateOptions {
            name: Some("reader".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ServerValidation);
    assert_eq!(err.status(), Some(422));
    assert_eq!(err.request_id(), Some("req-422"));
    assert_eq!(
        err.to_string(),
        "request rejected (422): Role with name 'reader' already exists."
    );
}

#[tokio::test]
async fn test_not_found_without_body_names_resource_and_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/agent-pools/apool-gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let err = AgentPool::read(&client, "apool-gone").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "AgentPool with id apool-gone not found");
}

#[tokio::test]
async fn test_server_error_is_unexpected_with_raw_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/environments"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let err = Environment::list(&client, None).await.unwrap_err();

    assert!(matches!(
        &err,
        ResourceError::Unexpected { status: 503, body, .. } if body == "upstream unavailable"
    ));
    assert!(!err.is_local());
}

#[tokio::test]
async fn test_malformed_success_body_is_decoding_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/iacp/v3/roles/reader"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;
    let client = client_for(&server.uri());

    let err = Role::read(&client, "reader").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decoding);
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let client = client_for("http://127.0.0.1:1");

    let err = Role::read(&client, "reader").await.unwrap_err();

    assert!(matches!(err, ResourceError::Transport(_)));
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}
