//! HTTP client against a local stub of the admin workflow endpoints.
//!
//! The stub serves:
//! - `GET /workflows?type=AM_USER_SIGNUP` with one request
//! - `GET /workflows?type=AM_API_STATE` with 401
//! - `GET /workflows?type=AM_APPLICATION_CREATION` with mixed `createdTime` shapes
//! - `GET /workflows?type=AM_APPLICATION_DELETION` with a body lacking `list`
//! - `GET /workflows?type=<other>` with 500
//! - `PUT /workflows/{id}`: 200 for `r1`, 401 with a description for `locked`,
//!   500 otherwise

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wfadmin::workflow::{
    ApiError, Decision, HttpWorkflowClient, StatusUpdate, WorkflowApi, WorkflowKind,
};

#[derive(Default)]
struct Recorded {
    auth_headers: Vec<Option<String>>,
    bodies: Vec<(String, Value)>,
}

type Shared = Arc<Mutex<Recorded>>;

fn record_auth(state: &Shared, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    state.lock().unwrap().auth_headers.push(auth);
}

async fn list_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    record_auth(&state, &headers);
    match params.get("type").map(String::as_str) {
        Some("AM_USER_SIGNUP") => (
            StatusCode::OK,
            Json(json!({
                "count": 1,
                "list": [{
                    "referenceId": "r1",
                    "description": "d",
                    "createdTime": "2024-01-01T00:00:00Z",
                    "properties": {"tenantAwareUserName": "alice", "tenantDomain": "t1"}
                }]
            })),
        ),
        Some("AM_APPLICATION_CREATION") => (
            StatusCode::OK,
            Json(json!({
                "count": 3,
                "list": [
                    {"referenceId": "a1", "createdTime": "2024-01-01 00:00:00.0"},
                    {"referenceId": "a2", "createdTime": 1704067200000u64},
                    {"referenceId": "a3", "createdTime": "sometime"}
                ]
            })),
        ),
        Some("AM_APPLICATION_DELETION") => (StatusCode::OK, Json(json!({}))),
        Some("AM_API_STATE") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"code": 401, "description": "missing scope"})),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"code": 500, "message": "boom"})),
        ),
    }
}

async fn update_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record_auth(&state, &headers);
    state.lock().unwrap().bodies.push((id.clone(), body));
    match id.as_str() {
        "r1" => (StatusCode::OK, Json(json!({}))),
        "locked" => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"description": "no perm"})),
        ),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
    }
}

/// Start the stub on an ephemeral port and return its base URL.
async fn start_stub() -> (String, Shared) {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/api/am/admin/v4/workflows", get(list_handler))
        .route("/api/am/admin/v4/workflows/:id", put(update_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    (format!("http://{}/api/am/admin/v4", addr), state)
}

fn client(base: &str, token: Option<&str>) -> HttpWorkflowClient {
    HttpWorkflowClient::new(base, token.map(|t| t.to_string()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_list_parses_requests_and_sends_token() {
    let (base, state) = start_stub().await;
    let api = client(&base, Some("secret"));

    let rows = api.list_workflows(&WorkflowKind::UserSignup).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].reference_id, "r1");
    assert_eq!(rows[0].property("tenantAwareUserName"), Some("alice"));

    let recorded = state.lock().unwrap();
    assert_eq!(recorded.auth_headers[0].as_deref(), Some("Bearer secret"));
}

#[tokio::test]
async fn test_list_status_mapping() {
    let (base, _) = start_stub().await;
    let api = client(&base, None);

    let err = api
        .list_workflows(&WorkflowKind::ApiStateChange)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unauthorized { description: Some(ref d) } if d == "missing scope"
    ));

    let err = api
        .list_workflows(&WorkflowKind::SubscriptionCreation)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.description(), Some("boom"));
}

#[tokio::test]
async fn test_update_sends_documented_body() {
    let (base, state) = start_stub().await;
    let api = client(&base, None);

    api.update_workflow("r1", &StatusUpdate::new(Decision::Approved))
        .await
        .unwrap();

    let recorded = state.lock().unwrap();
    assert_eq!(recorded.auth_headers[0], None);
    let (id, body) = &recorded.bodies[0];
    assert_eq!(id, "r1");
    assert_eq!(
        body,
        &json!({
            "status": "APPROVED",
            "attributes": {},
            "description": "Approve workflow request."
        })
    );
}

#[tokio::test]
async fn test_update_failures_keep_server_description() {
    let (base, _) = start_stub().await;
    let api = client(&base, None);

    let err = api
        .update_workflow("locked", &StatusUpdate::new(Decision::Rejected))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Unauthorized { description: Some(ref d) } if d == "no perm"
    ));

    let err = api
        .update_workflow("other", &StatusUpdate::new(Decision::Rejected))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = client(&format!("http://{}", addr), None);
    let err = api
        .list_workflows(&WorkflowKind::UserSignup)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn test_odd_created_time_keeps_every_row() {
    let (base, _) = start_stub().await;
    let api = client(&base, None);

    let rows = api
        .list_workflows(&WorkflowKind::ApplicationCreation)
        .await
        .unwrap();
    let expected: Option<chrono::DateTime<chrono::Utc>> = "2024-01-01T00:00:00Z".parse().ok();
    let times: Vec<_> = rows.iter().map(|r| r.created_time).collect();
    assert_eq!(times, vec![expected, expected, None]);
}

#[tokio::test]
async fn test_body_without_list_is_a_decode_error() {
    let (base, _) = start_stub().await;
    let api = client(&base, None);

    let err = api
        .list_workflows(&WorkflowKind::ApplicationDeletion)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_reference_id_reaches_server_intact() {
    let (base, state) = start_stub().await;
    let api = client(&base, None);

    for id in ["abc#def", "abc?x=1", "a/b"] {
        let err = api
            .update_workflow(id, &StatusUpdate::new(Decision::Approved))
            .await
            .unwrap_err();
        // 500 comes from the update route; a mangled path would 404 or 405.
        assert_eq!(err.status(), Some(500), "id {}", id);
    }

    let recorded = state.lock().unwrap();
    let ids: Vec<&str> = recorded.bodies.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["abc#def", "abc?x=1", "a/b"]);
}
