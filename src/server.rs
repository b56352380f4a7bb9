use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::auth::TokenVerifier;
use crate::config::{AppConfig, Environment, SecurityConfig};
use crate::database::{BlogStore, DatabaseManager};
use crate::handlers::{posts, system};
use crate::services::PostService;

/// Shared per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub posts: PostService,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn BlogStore>, security: &SecurityConfig) -> Self {
        Self {
            posts: PostService::new(store.clone()),
            store,
            verifier: Arc::new(TokenVerifier::new(security)),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Reads are public, writes extract AuthUser
        .route(
            "/posts",
            get(posts::list)
                .post(posts::create)
                .put(posts::update)
                .delete(posts::delete),
        )
        // Global middleware
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let security = &config.security;
    if !security.enable_cors {
        return CorsLayer::new();
    }
    if config.environment == Environment::Development {
        return CorsLayer::permissive();
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(AllowOrigin::any())
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE]);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Opens the configured store and serves until Ctrl-C
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    config.validate().context("invalid configuration")?;
    info!("Starting Blog API in {:?} mode", config.environment);

    let store = DatabaseManager::open_store(&config.database)
        .await
        .context("failed to open store")?;
    let state = AppState::new(store, &config.security);
    let router = app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Blog API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Blog API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
