#![allow(dead_code)]

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use tracing_subscriber::EnvFilter;

use blog_api::config::{AppConfig, StoreBackend};
use blog_api::database::MemoryStore;
use blog_api::AppState;

pub const SECRET: &str = "integration-test-secret";

/// Router over a seeded in-memory store. Categories 1 and 2 and users 7 and 9 exist.
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same seeded app, with `adjust` applied to the config before the router is built
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        init_tracing();

        let mut config = AppConfig::development();
        config.security.jwt_secret = SECRET.to_string();
        config.security.jwt_leeway_secs = 0;
        config.database.backend = StoreBackend::Memory;
        adjust(&mut config);

        let store = MemoryStore::new();
        store.insert_category(1, "General").await;
        store.insert_category(2, "Rust").await;
        store.insert_user_named(7, "seven").await;
        store.insert_user_named(9, "nine").await;

        let state = AppState::new(std::sync::Arc::new(store.clone()), &config.security);
        let router = blog_api::app(state, &config);

        Self { router, store }
    }

    pub async fn send(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await.context("router failed")?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).with_context(|| format!("non-JSON body: {:?}", bytes))?
        };

        Ok(TestResponse { status, body })
    }

    pub async fn get(&self, uri: &str) -> Result<TestResponse> {
        self.send(Method::GET, uri, None, None).await
    }

    /// Creates a post as `user_id` and returns its id
    pub async fn create_post(&self, user_id: i32, body: Value) -> Result<i64> {
        let res = self.send(Method::POST, "/posts", Some(&token_for(user_id)), Some(body)).await?;
        anyhow::ensure!(res.status == StatusCode::OK, "create failed: {} {}", res.status, res.body);
        res.body["data"]["id"].as_i64().context("created post has no id")
    }
}

/// Routes service logs through the test harness; `RUST_LOG=blog_api=debug` shows them
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn token_with(secret: &str, claims: Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).expect("encode token")
}

pub fn token_for(user_id: i32) -> String {
    token_with(
        SECRET,
        json!({
            "sub": user_id.to_string(),
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + Duration::hours(1)).timestamp(),
        }),
    )
}

pub fn post_body(category_id: i32, title: &str) -> Value {
    json!({
        "categoryId": category_id,
        "title": title,
        "description": "a short description",
        "content": "the body of the post",
        "isPost": true,
        "isPublished": true,
        "publishedDate": "2024-05-01T10:00:00Z"
    })
}

/// Asserts the uniform envelope and that statusCode mirrors the HTTP status
pub fn assert_envelope(res: &TestResponse, status: StatusCode) {
    assert_eq!(res.status, status, "unexpected status, body: {}", res.body);
    assert_eq!(res.body["statusCode"].as_u64(), Some(status.as_u16() as u64), "body: {}", res.body);
    assert!(res.body["message"].is_string(), "missing message: {}", res.body);
}
