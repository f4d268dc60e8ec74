use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode as AxumStatus},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// What the fake backend saw on each call.
#[derive(Debug, Clone)]
struct Seen {
    path: String,
    authorization: Option<String>,
    correlation: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Seen>>>,
}

impl Backend {
    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(Seen {
            path,
            authorization: header("authorization"),
            correlation: header("x-correlation-id"),
            body,
        });
    }

    fn last(&self) -> Seen {
        self.seen.lock().unwrap().last().cloned().expect("backend was not called")
    }

    fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

async fn fake_login(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    b.record("/v1/users/login".into(), &headers, body.clone());
    if body["username"] == "admin@corp.io" && body["password"] == "pw" {
        (
            AxumStatus::OK,
            Json(json!({
                "success": true,
                "message": "Login successful",
                "data": {"accessToken": "at-1", "sessionId": "s-1", "username": "admin",
                         "role": {"name": "ADMIN", "permissions": []}}
            })),
        )
    } else {
        (
            AxumStatus::UNAUTHORIZED,
            Json(json!({"success": false, "message": "Invalid credentials"})),
        )
    }
}

async fn fake_list(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    b.record("/v1/users/list".into(), &headers, body.clone());
    Json(json!({"success": true, "data": {"items": [], "page": body["page"], "size": body["size"]}}))
}

async fn fake_create(
    State(b): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    b.record("/v1/users".into(), &headers, body.clone());
    if body["email"] == "dup@corp.io" {
        return (
            AxumStatus::CONFLICT,
            Json(json!({"success": false, "message": "Email already exists"})),
        )
            .into_response();
    }
    Json(json!({"success": true, "message": "User created", "data": body})).into_response()
}

async fn fake_get(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> axum::response::Response {
    b.record(format!("/v1/users/{id}"), &headers, Value::Null);
    match id.as_str() {
        "missing" => (AxumStatus::NOT_FOUND, Json(json!({"success": false}))).into_response(),
        "garbled" => (AxumStatus::OK, "<html>oops</html>").into_response(),
        _ => Json(json!({"success": true, "data": {"id": id}})).into_response(),
    }
}

async fn fake_update(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> axum::response::Response {
    b.record(format!("/v1/users/{id}"), &headers, body.clone());
    if id == "locked" {
        return (
            AxumStatus::UNPROCESSABLE_ENTITY,
            Json(json!({"success": false, "message": "User is locked"})),
        )
            .into_response();
    }
    let mut data = body;
    data["id"] = json!(id);
    Json(json!({"success": true, "message": "User updated", "data": data})).into_response()
}

async fn fake_delete(
    State(b): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AxumStatus {
    b.record(format!("/v1/users/{id}"), &headers, Value::Null);
    AxumStatus::NO_CONTENT
}

/// Records calls that miss every known backend route.
async fn fake_anything(
    State(b): State<Backend>,
    uri: axum::http::Uri,
    headers: HeaderMap,
) -> AxumStatus {
    b.record(uri.path().to_string(), &headers, Value::Null);
    AxumStatus::OK
}

async fn spawn_pair() -> (TestServer, TestServer, Backend) {
    let backend = Backend::default();
    let fake = Router::new()
        .route("/v1/users/login", post(fake_login))
        .route("/v1/users/list", post(fake_list))
        .route("/v1/users", post(fake_create))
        .route(
            "/v1/users/:id",
            get(fake_get).put(fake_update).delete(fake_delete),
        )
        .fallback(fake_anything)
        .with_state(backend.clone());
    let upstream = TestServer::spawn(fake).await;
    let proxy = TestServer::spawn(adminconsole_api::build_app(upstream.base_url.clone())).await;
    (proxy, upstream, backend)
}

#[tokio::test]
async fn health_is_public() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let res = reqwest::get(format!("{}/health", proxy.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn user_routes_require_authorization_header() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users", proxy.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Unauthorized - No token provided"}));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn login_requires_email_and_password() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    for body in [json!({"email": "admin@corp.io"}), json!({"password": "pw"}), json!({})] {
        let res = client
            .post(format!("{}/api/login", proxy.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Email and password are required");
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn login_forwards_email_as_username_and_passes_backend_errors_through() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let ok = client
        .post(format!("{}/api/login", proxy.base_url))
        .json(&json!({"email": "admin@corp.io", "password": "pw"}))
        .send()
        .await
        .unwrap();
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = ok.json().await.unwrap();
    assert_eq!(body["data"]["accessToken"], "at-1");
    assert_eq!(backend.last().body, json!({"username": "admin@corp.io", "password": "pw"}));

    let denied = client
        .post(format!("{}/api/login", proxy.base_url))
        .json(&json!({"email": "admin@corp.io", "password": "nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    let body: Value = denied.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Invalid credentials"}));
}

#[tokio::test]
async fn list_maps_query_onto_backend_body_and_forwards_header_verbatim() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users?page=2&size=25", proxy.base_url))
        .header("authorization", "Bearer at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let seen = backend.last();
    assert_eq!(seen.path, "/v1/users/list");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer at-1"));
    assert_eq!(seen.body, json!({"page": 2, "size": 25}));

    client
        .get(format!("{}/api/users", proxy.base_url))
        .header("authorization", "Bearer at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(backend.last().body, json!({"page": 1, "size": 10}));
}

#[tokio::test]
async fn create_answers_201_and_relays_conflicts() {
    let (proxy, _upstream, _backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/users", proxy.base_url))
        .bearer_auth("at-1")
        .json(&json!({"username": "jdoe", "email": "jdoe@corp.io"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["username"], "jdoe");

    let res = client
        .post(format!("{}/api/users", proxy.base_url))
        .bearer_auth("at-1")
        .json(&json!({"username": "dup", "email": "dup@corp.io"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn backend_failures_without_message_use_fallbacks() {
    let (proxy, _upstream, _backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let missing = client
        .get(format!("{}/api/users/missing", proxy.base_url))
        .bearer_auth("at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Failed to fetch user"}));

    let garbled = client
        .get(format!("{}/api/users/garbled", proxy.base_url))
        .bearer_auth("at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(garbled.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = garbled.json().await.unwrap();
    assert_eq!(body["message"], "An error occurred while fetching user");
}

#[tokio::test]
async fn empty_delete_response_reads_as_success() {
    let (proxy, _upstream, backend) = spawn_pair().await;

    let res = reqwest::Client::new()
        .delete(format!("{}/api/users/u-7", proxy.base_url))
        .bearer_auth("at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(backend.last().path, "/v1/users/u-7");
}

#[tokio::test]
async fn unreachable_backend_is_a_500() {
    // Nothing listens on the discard port.
    let proxy = TestServer::spawn(adminconsole_api::build_app("http://127.0.0.1:9")).await;

    let res = reqwest::Client::new()
        .post(format!("{}/api/login", proxy.base_url))
        .json(&json!({"email": "admin@corp.io", "password": "pw"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "An error occurred during login. Please try again.");
}

#[tokio::test]
async fn correlation_id_is_echoed_and_forwarded() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/users/u-1", proxy.base_url))
        .bearer_auth("at-1")
        .header("x-correlation-id", "trace-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-correlation-id"], "trace-42");
    assert_eq!(backend.last().correlation.as_deref(), Some("trace-42"));

    let res = client
        .get(format!("{}/health", proxy.base_url))
        .send()
        .await
        .unwrap();
    let minted = res.headers()["x-correlation-id"].to_str().unwrap().to_string();
    assert!(uuid::Uuid::parse_str(&minted).is_ok());
}

#[tokio::test]
async fn update_passes_backend_success_and_failure_through() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/users/u-5", proxy.base_url))
        .bearer_auth("at-1")
        .json(&json!({"displayName": "Renamed"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"], json!({"id": "u-5", "displayName": "Renamed"}));
    let seen = backend.last();
    assert_eq!(seen.path, "/v1/users/u-5");
    assert_eq!(seen.authorization.as_deref(), Some("Bearer at-1"));
    assert_eq!(seen.body, json!({"displayName": "Renamed"}));

    let res = client
        .put(format!("{}/api/users/locked", proxy.base_url))
        .bearer_auth("at-1")
        .json(&json!({"displayName": "Nope"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "User is locked"}));
}

#[tokio::test]
async fn update_with_unreadable_body_is_a_400() {
    let (proxy, _upstream, backend) = spawn_pair().await;

    let res = reqwest::Client::new()
        .put(format!("{}/api/users/u-5", proxy.base_url))
        .bearer_auth("at-1")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"success": false, "message": "Invalid request body"}));
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn encoded_slashes_in_ids_never_reach_other_backend_paths() {
    let (proxy, _upstream, backend) = spawn_pair().await;
    let client = reqwest::Client::new();

    for id in ["x%2F..%2F..%2Fadmin%2Fpurge", "%2Fv1%2Fusers%2Flist", "a%5Cb"] {
        let res = client
            .delete(format!("{}/api/users/{id}", proxy.base_url))
            .bearer_auth("t")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{id}");
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["message"], "Invalid user id");
    }
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn reserved_characters_in_ids_stay_inside_the_segment() {
    let (proxy, _upstream, backend) = spawn_pair().await;

    let res = reqwest::Client::new()
        .get(format!("{}/api/users/a%3Fb%23c", proxy.base_url))
        .bearer_auth("at-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["id"], "a?b#c");
    assert_eq!(backend.last().path, "/v1/users/a?b#c");
}
