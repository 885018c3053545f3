//! Firebase REST 客户端集成测试
//!
//! 本地启动一个 axum 服务模拟 Realtime Database REST API 与 OAuth2 token 端点，
//! 数据由内存层级存储承载

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Form, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use minelink::application::{HierarchicalStorePort, StoreError};
use minelink::domain::NodePath;
use minelink::infrastructure::adapters::{
    Credentials, FirebaseRestClient, FirebaseRestClientConfig, ServiceAccountKey,
};
use minelink::infrastructure::memory::InMemoryStore;

const PRIVATE_KEY: &str = include_str!("fixtures/test_private_key.pem");
const ACCESS_TOKEN: &str = "ya29.test-token";

#[derive(Clone, Copy)]
enum ExpectedAuth {
    Bearer,
    Secret(&'static str),
    Anonymous,
}

#[derive(Clone)]
struct FakeFirebase {
    store: Arc<InMemoryStore>,
    token_requests: Arc<AtomicUsize>,
    auth: ExpectedAuth,
}

#[derive(Deserialize)]
struct TokenForm {
    grant_type: String,
    assertion: String,
}

async fn token(State(fake): State<FakeFirebase>, Form(form): Form<TokenForm>) -> Response {
    fake.token_requests.fetch_add(1, Ordering::SeqCst);
    if form.grant_type != "urn:ietf:params:oauth:grant-type:jwt-bearer"
        || form.assertion.split('.').count() != 3
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_grant"}))).into_response();
    }
    Json(json!({"access_token": ACCESS_TOKEN, "expires_in": 3600, "token_type": "Bearer"}))
        .into_response()
}

fn authorized(auth: ExpectedAuth, headers: &HeaderMap, uri: &Uri) -> bool {
    let query = uri.query().unwrap_or_default();
    match auth {
        ExpectedAuth::Bearer => headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == format!("Bearer {}", ACCESS_TOKEN)),
        ExpectedAuth::Secret(secret) => query.split('&').any(|p| p == format!("auth={}", secret)),
        ExpectedAuth::Anonymous => true,
    }
}

fn store_error(err: StoreError) -> Response {
    match err {
        StoreError::Rejected { status, message } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({"error": message})),
        )
            .into_response(),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": other.to_string()})),
        )
            .into_response(),
    }
}

async fn rest(
    State(fake): State<FakeFirebase>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorized(fake.auth, &headers, &uri) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "Unauthorized request."})),
        )
            .into_response();
    }

    let Some(path) = uri.path().strip_suffix(".json") else {
        return (StatusCode::NOT_FOUND, "not found").into_response();
    };
    let node = NodePath::new(path);

    if method == Method::GET {
        return match fake.store.read(&node).await {
            Ok(value) => Json(value).into_response(),
            Err(e) => store_error(e),
        };
    }

    if method == Method::PATCH {
        let Ok(entries) = serde_json::from_slice::<Value>(&body) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Invalid data; couldn't parse JSON object."})),
            )
                .into_response();
        };
        let silent = uri.query().unwrap_or_default().contains("print=silent");
        return match fake.store.merge(&node, entries.clone()).await {
            Ok(()) if silent => StatusCode::NO_CONTENT.into_response(),
            Ok(()) => Json(entries).into_response(),
            Err(e) => store_error(e),
        };
    }

    StatusCode::METHOD_NOT_ALLOWED.into_response()
}

async fn spawn_fake(auth: ExpectedAuth) -> (String, FakeFirebase) {
    let fake = FakeFirebase {
        store: Arc::new(InMemoryStore::new()),
        token_requests: Arc::new(AtomicUsize::new(0)),
        auth,
    };

    let app = Router::new()
        .route("/token", post(token))
        .fallback(rest)
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), fake)
}

fn client(base_url: &str, credentials: Credentials) -> FirebaseRestClient {
    FirebaseRestClient::new(FirebaseRestClientConfig::new(base_url), credentials).unwrap()
}

#[tokio::test]
async fn test_anonymous_merge_and_read() {
    let (url, _fake) = spawn_fake(ExpectedAuth::Anonymous).await;
    let client = client(&url, Credentials::Anonymous);

    client
        .merge(&NodePath::new("mines/Profiles"), json!({"abc/name": "x"}))
        .await
        .unwrap();
    client
        .merge(&NodePath::new("mines/Profiles"), json!({"abc/role": "driller"}))
        .await
        .unwrap();

    let profile = client.read(&NodePath::new("mines/Profiles/abc")).await.unwrap();
    assert_eq!(profile, json!({"name": "x", "role": "driller"}));

    let missing = client.read(&NodePath::new("mines/nothing")).await.unwrap();
    assert_eq!(missing, Value::Null);
}

#[tokio::test]
async fn test_database_secret_auth() {
    let (url, _fake) = spawn_fake(ExpectedAuth::Secret("s3cr3t")).await;

    let authorized = client(&url, Credentials::DatabaseSecret("s3cr3t".to_string()));
    authorized
        .merge(&NodePath::new("mines/MainLogs"), json!({"a": 1}))
        .await
        .unwrap();
    assert_eq!(
        authorized.read(&NodePath::new("mines/MainLogs")).await.unwrap(),
        json!({"a": 1})
    );

    let wrong = client(&url, Credentials::DatabaseSecret("nope".to_string()));
    let err = wrong.read(&NodePath::new("mines")).await.unwrap_err();
    match err {
        StoreError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthorized request.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_service_account_token_is_cached() {
    let (url, fake) = spawn_fake(ExpectedAuth::Bearer).await;

    let mut key = ServiceAccountKey::from_fields(
        "minetest",
        "svc@minetest.iam.gserviceaccount.com",
        PRIVATE_KEY,
    );
    key.token_uri = format!("{}/token", url);
    let client = client(&url, Credentials::ServiceAccount(key));

    client
        .merge(&NodePath::new("mines/attendance"), json!({"d": {"w": true}}))
        .await
        .unwrap();
    let value = client.read(&NodePath::new("mines/attendance/d")).await.unwrap();
    assert_eq!(value, json!({"w": true}));

    assert_eq!(fake.token_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_token_endpoint_failure_is_auth_error() {
    let (url, _fake) = spawn_fake(ExpectedAuth::Bearer).await;

    let mut key = ServiceAccountKey::from_fields(
        "minetest",
        "svc@minetest.iam.gserviceaccount.com",
        PRIVATE_KEY,
    );
    key.token_uri = format!("{}/missing-token-endpoint", url);
    let client = client(&url, Credentials::ServiceAccount(key));

    let err = client.read(&NodePath::new("mines")).await.unwrap_err();
    assert!(matches!(err, StoreError::AuthError(_)));
}

#[tokio::test]
async fn test_backend_rejection_is_forwarded() {
    let (url, fake) = spawn_fake(ExpectedAuth::Anonymous).await;
    let client = client(&url, Credentials::Anonymous);

    let err = client
        .merge(&NodePath::new("mines/MainLogs"), json!("not an object"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Rejected { status: 400, .. }));
    assert_eq!(fake.store.snapshot(), Value::Null);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{}", addr), Credentials::Anonymous);
    let err = client.read(&NodePath::new("mines")).await.unwrap_err();
    assert!(matches!(err, StoreError::NetworkError(_)));
}
