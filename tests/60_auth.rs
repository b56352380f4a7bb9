mod common;

use anyhow::Result;
use axum::http::{header, Method, Request, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn expired_token_is_unauthorized() -> Result<()> {
    let app = common::TestApp::new().await;
    let token = common::token_with(
        common::SECRET,
        json!({ "sub": "7", "exp": (Utc::now() - Duration::hours(1)).timestamp() }),
    );

    let res = app
        .send(Method::POST, "/posts", Some(&token), Some(common::post_body(1, "A")))
        .await?;

    common::assert_envelope(&res, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "JWT token has expired");
    Ok(())
}

#[tokio::test]
async fn forged_token_is_unauthorized() -> Result<()> {
    let app = common::TestApp::new().await;
    let token = common::token_with(
        "not-the-server-secret",
        json!({ "sub": "7", "exp": (Utc::now() + Duration::hours(1)).timestamp() }),
    );

    let res = app
        .send(Method::POST, "/posts", Some(&token), Some(common::post_body(1, "A")))
        .await?;

    common::assert_envelope(&res, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Invalid JWT token");
    assert_eq!(app.store.post_count().await, 0);
    Ok(())
}

#[tokio::test]
async fn non_numeric_subject_is_unauthorized() -> Result<()> {
    let app = common::TestApp::new().await;
    let token = common::token_with(
        common::SECRET,
        json!({ "sub": "alice", "exp": (Utc::now() + Duration::hours(1)).timestamp() }),
    );

    let res = app
        .send(Method::DELETE, "/posts?id=1", Some(&token), None)
        .await?;

    common::assert_envelope(&res, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn garbage_token_gets_fixed_message() -> Result<()> {
    let app = common::TestApp::new().await;

    let res = app
        .send(Method::POST, "/posts", Some("not.a.jwt"), Some(common::post_body(1, "A")))
        .await?;

    common::assert_envelope(&res, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Invalid JWT token");
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() -> Result<()> {
    let app = common::TestApp::new().await;
    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/posts?id=1")
        .header(header::AUTHORIZATION, format!("Basic {}", common::token_for(7)))
        .body(axum::body::Body::empty())?;

    let response = app.router.clone().oneshot(request).await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn anonymous_delete_is_unauthorized_even_for_missing_post() -> Result<()> {
    let app = common::TestApp::new().await;

    let res = app.send(Method::DELETE, "/posts?id=4242", None, None).await?;

    common::assert_envelope(&res, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["message"], "Missing Authorization header");
    Ok(())
}

#[tokio::test]
async fn listing_needs_no_token() -> Result<()> {
    let app = common::TestApp::new().await;

    let res = app.send(Method::GET, "/posts", None, None).await?;

    common::assert_envelope(&res, StatusCode::OK);
    Ok(())
}
