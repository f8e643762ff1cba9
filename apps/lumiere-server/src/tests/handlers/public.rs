//! Public endpoint tests.

use super::super::common::*;
use axum::http::{Method, StatusCode};
use lumiere_storage::*;

#[tokio::test]
async fn health_reports_ok() {
    let app = create_test_app().await;
    let (status, body) = send(&app, json_request(Method::GET, "/api/health", None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn metrics_without_recorder_is_404() {
    let app = create_test_app().await;
    let (status, _) = send(&app, json_request(Method::GET, "/metrics", None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn templates_catalog_lists_four_styles() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/public/templates", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t["id"].as_str())
        .collect();
    assert_eq!(ids, ["warm", "floral", "rustic", "moderno"]);
}

#[tokio::test]
async fn shared_view_counts_and_renders_presentation() {
    let app = create_test_app().await;
    let (_, token) = create_user(&app, "ana@example.com", Role::Client).await;
    let (_, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/client/invitations",
            Some(&token),
            Some(invitation_body()),
        ),
    )
    .await;
    let share = created["data"]["shareToken"].as_str().unwrap().to_string();
    let uri = format!("/api/public/invitation/{share}");

    let (status, first) = send(&app, json_request(Method::GET, &uri, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["views"], 1);
    assert_eq!(first["data"]["presentation"]["placeholders"], 4);
    assert_eq!(first["data"]["presentation"]["rsvpHref"], serde_json::Value::Null);
    assert_eq!(first["data"]["presentation"]["style"]["accent"], "#1a2744");

    let (_, second) = send(&app, json_request(Method::GET, &uri, None, None)).await;
    assert_eq!(second["data"]["views"], 2);
}

#[tokio::test]
async fn unknown_token_is_404() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/public/invitation/nope", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn demo_token_serves_sample() {
    let app = create_test_app().await;
    let (status, body) = send(
        &app,
        json_request(Method::GET, "/api/public/invitation/demo", None, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["names"], "Elizabeth & Salomon");
    assert_eq!(body["data"]["template"], "rustic");
    assert_eq!(body["data"]["presentation"]["placeholders"], 4);
    assert_eq!(app.store.count_invitations().await.unwrap(), 0);
}
