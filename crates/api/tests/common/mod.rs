#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use revise_api::auth::jwt::JwtConfig;
use revise_api::config::{CorsOrigins, LogFormat, ServerConfig, StorageBackend};
use revise_api::router::build_app_router;
use revise_api::state::AppState;
use revise_db::MemoryStore;
use revise_llm::{CompletionError, CompletionProvider, CompletionRequest, LlmConfig};

pub const TEST_JWT_SECRET: &str = "test-secret-for-integration-tests";
pub const TEST_ORIGIN: &str = "http://localhost:3000";
pub const FAKE_CONTENT: &str = "# Théorème de Pythagore\n\n**Formule**: a² + b² = c²";

// ---------------------------------------------------------------------------
// Fake completion provider
// ---------------------------------------------------------------------------

/// Scripted [`CompletionProvider`] recording every request it receives.
#[derive(Default)]
pub struct FakeCompletions {
    fail: bool,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletions {
    /// Provider answering every request with [`FAKE_CONTENT`].
    pub fn ok() -> Self {
        Self::default()
    }

    /// Provider failing every request with an upstream API error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for FakeCompletions {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(CompletionError::Api {
                status: 503,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(FAKE_CONTENT.to_string())
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` running on the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: CorsOrigins::List(vec![HeaderValue::from_static(TEST_ORIGIN)]),
        request_timeout_secs: 30,
        max_body_bytes: 20 * 1024 * 1024,
        storage: StorageBackend::Memory,
        database_url: None,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            expiry_hours: 1,
        },
        llm: LlmConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            api_key: None,
            model: "test-model".to_string(),
            timeout: Duration::from_secs(1),
            max_tokens: None,
        },
        log_format: LogFormat::Pretty,
    }
}

/// Full application router over a fresh [`MemoryStore`] and the given provider.
pub fn build_test_app_with(completions: Arc<FakeCompletions>) -> Router {
    let config = test_config();
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        completions,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Full application router with a provider that always succeeds.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(FakeCompletions::ok()))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

// ---------------------------------------------------------------------------
// Domain helpers
// ---------------------------------------------------------------------------

/// Register a user through the API and return its bearer token.
pub async fn register_user(app: Router, email: &str) -> String {
    let body = serde_json::json!({
        "email": email,
        "password": "motdepasse",
        "name": "Élève Test",
    });
    let response = post_json(app, "/api/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Save a revision through the API and return the stored JSON.
pub async fn save_revision(
    app: Router,
    token: &str,
    subject: &str,
    revision_type: &str,
    prompt: &str,
) -> serde_json::Value {
    let body = serde_json::json!({
        "prompt": prompt,
        "subject": subject,
        "revision_type": revision_type,
        "content": FAKE_CONTENT,
    });
    let response = post_json_auth(app, "/api/revisions", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
