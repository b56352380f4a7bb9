use axum::extract::State;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResult, Envelope};
use crate::server::AppState;

/// GET / - service summary
pub async fn root() -> Envelope<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Envelope::ok(
        "Blog API",
        json!({
            "name": "blog-api",
            "version": version,
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "list": "GET /posts?id=&userId=&categoryId= (public)",
                "create": "POST /posts (bearer token)",
                "update": "PUT /posts (bearer token)",
                "delete": "DELETE /posts?id= (bearer token)",
            }
        }),
    )
}

/// GET /health - probes the store
pub async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => Ok(Envelope::ok(
            "ok",
            json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            }),
        )),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("database unavailable"))
        }
    }
}
