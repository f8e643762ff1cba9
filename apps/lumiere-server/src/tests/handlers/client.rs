//! Self-service endpoint tests.

use super::super::common::*;
use axum::http::{Method, StatusCode};
use lumiere_storage::*;
use serde_json::json;

#[tokio::test]
async fn create_returns_201_with_defaults() {
    let app = create_test_app().await;
    let (ana, token) = create_user(&app, "ana@example.com", Role::Client).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/client/invitations",
            Some(&token),
            Some(invitation_body()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["clientId"], ana.id.0.to_string());
    assert_eq!(data["template"], "floral");
    assert_eq!(data["primaryColor"], "#1a2744");
    assert_eq!(data["isDark"], true);
    assert_eq!(data["isPublished"], true);
    assert_eq!(data["views"], 0);
    assert_eq!(data["gallery"], json!([]));
    assert!(data["shareToken"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn create_ignores_client_id_in_body() {
    let app = create_test_app().await;
    let (ana, token) = create_user(&app, "ana@example.com", Role::Client).await;
    let (luis, _) = create_user(&app, "luis@example.com", Role::Client).await;

    let mut body = invitation_body();
    body["clientId"] = json!(luis.id.0.to_string());
    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/client/invitations", Some(&token), Some(body)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["clientId"], ana.id.0.to_string());
}

#[tokio::test]
async fn create_validation_is_400_with_field_detail() {
    let app = create_test_app().await;
    let (_, token) = create_user(&app, "ana@example.com", Role::Client).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/client/invitations",
            Some(&token),
            Some(json!({ "eventType": "Boda", "title": "Boda" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap_or_default();
    assert!(error.contains("names is required"));
    assert!(error.contains("eventDate is required"));
    assert_eq!(app.store.count_invitations().await.unwrap(), 0);
}

#[tokio::test]
async fn owner_lifecycle() {
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
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/client/invitations/{id}");

    let (status, list) = send(&app, json_request(Method::GET, "/api/client/invitations", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));

    let (status, updated) = send(
        &app,
        json_request(Method::PUT, &uri, Some(&token), Some(json!({ "venue": "Jardín" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["venue"], "Jardín");
    assert_eq!(updated["data"]["names"], "Ana & Carlos");

    let (status, toggled) = send(
        &app,
        json_request(Method::PATCH, &format!("{uri}/toggle-published"), Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["isPublished"], false);

    let (status, body) = send(&app, json_request(Method::DELETE, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, serde_json::Value::Null);

    let (status, _) = send(&app, json_request(Method::GET, &uri, Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_clients_get_404() {
    let app = create_test_app().await;
    let (_, ana_token) = create_user(&app, "ana@example.com", Role::Client).await;
    let (_, luis_token) = create_user(&app, "luis@example.com", Role::Client).await;

    let (_, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/client/invitations",
            Some(&ana_token),
            Some(invitation_body()),
        ),
    )
    .await;
    let uri = format!(
        "/api/client/invitations/{}",
        created["data"]["id"].as_str().unwrap()
    );

    let (foreign, foreign_body) = send(&app, json_request(Method::GET, &uri, Some(&luis_token), None)).await;
    let (missing, missing_body) = send(
        &app,
        json_request(
            Method::GET,
            "/api/client/invitations/0191d3a0-0000-7000-8000-000000000000",
            Some(&luis_token),
            None,
        ),
    )
    .await;
    assert_eq!(foreign, StatusCode::NOT_FOUND);
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(foreign_body, missing_body);

    let (status, _) = send(&app, json_request(Method::DELETE, &uri, Some(&luis_token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, json_request(Method::GET, &uri, Some(&ana_token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn photo_upload_appends_and_serves_files() {
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
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        photos_request(
            &format!("/api/client/invitations/{id}/photos"),
            &token,
            &[
                ("uno.jpg", "image/jpeg", b"first"),
                ("dos.png", "image/png", b"second"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let gallery: Vec<String> = serde_json::from_value(body["data"]["gallery"].clone()).unwrap();
    assert_eq!(gallery.len(), 2);
    assert!(gallery[0].ends_with(".jpg") && gallery[1].ends_with(".png"));
    assert_eq!(app.upload_count(), 2);

    let response = tower::ServiceExt::oneshot(
        app.server.clone().router(),
        json_request(Method::GET, &gallery[0], None, None),
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"first");
}

#[tokio::test]
async fn photo_upload_rejects_non_images_atomically() {
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
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        photos_request(
            &format!("/api/client/invitations/{id}/photos"),
            &token,
            &[
                ("uno.jpg", "image/jpeg", b"first"),
                ("notes.txt", "text/plain", b"hello"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("notes.txt"));
    assert_eq!(app.upload_count(), 0);

    let (_, got) = send(
        &app,
        json_request(
            Method::GET,
            &format!("/api/client/invitations/{id}"),
            Some(&token),
            None,
        ),
    )
    .await;
    assert_eq!(got["data"]["gallery"], json!([]));
}

#[tokio::test]
async fn photo_upload_enforces_size_limit() {
    let app = create_test_app_with_limit(8).await;
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
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        photos_request(
            &format!("/api/client/invitations/{id}/photos"),
            &token,
            &[("big.jpg", "image/jpeg", b"0123456789")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(app.upload_count(), 0);
}

#[tokio::test]
async fn photo_body_over_request_limit_is_413() {
    // Per-file limit 8 bytes; the request body limit is 20 files plus 1 MiB.
    let app = create_test_app_with_limit(8).await;
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
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let huge = vec![0u8; 2 * 1024 * 1024];
    let (status, body) = send(
        &app,
        photos_request(
            &format!("/api/client/invitations/{id}/photos"),
            &token,
            &[("huge.jpg", "image/jpeg", huge.as_slice())],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["success"], false);
    assert_eq!(app.upload_count(), 0);
}

