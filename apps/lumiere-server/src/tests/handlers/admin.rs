//! Studio-wide endpoint tests.

use super::super::common::*;
use axum::http::{Method, StatusCode};
use lumiere_storage::*;
use serde_json::json;

fn admin_body(client_id: &str) -> serde_json::Value {
    json!({
        "clientId": client_id,
        "names": "Elizabeth & Salomon",
        "eventDate": "12 junio 2026",
    })
}

#[tokio::test]
async fn admin_create_applies_studio_defaults() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;
    let (ana, _) = create_user(&app, "ana@example.com", Role::Client).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/invitations",
            Some(&admin),
            Some(admin_body(&ana.id.0.to_string())),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let data = &body["data"];
    assert_eq!(data["clientId"], ana.id.0.to_string());
    assert_eq!(data["template"], "elegante");
    assert_eq!(data["fontStyle"], "serif");
    assert_eq!(data["eventType"], serde_json::Value::Null);
}

#[tokio::test]
async fn admin_created_invitation_is_live_immediately() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;
    let (ana, _) = create_user(&app, "ana@example.com", Role::Client).await;

    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/invitations",
            Some(&admin),
            Some(admin_body(&ana.id.0.to_string())),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let data = &created["data"];
    assert_eq!(data["isPublished"], true);
    assert_eq!(data["views"], 0);
    assert_eq!(data["gallery"], json!([]));
    let token = data["shareToken"].as_str().unwrap_or_default().to_string();
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

    let (status, shared) = send(
        &app,
        json_request(
            Method::GET,
            &format!("/api/public/invitation/{token}"),
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shared["data"]["id"], data["id"]);
    assert_eq!(shared["data"]["names"], "Elizabeth & Salomon");
    assert_eq!(shared["data"]["views"], 1);
    assert_eq!(shared["data"]["gallery"], json!([]));
}

#[tokio::test]
async fn admin_create_with_unknown_client_is_400() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/invitations",
            Some(&admin),
            Some(admin_body("client-123")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap_or_default().contains("clientId"));

    let (status, _) = send(
        &app,
        json_request(
            Method::POST,
            "/api/admin/invitations",
            Some(&admin),
            Some(json!({ "names": "A & B", "eventDate": "hoy" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.store.count_invitations().await.unwrap(), 0);
}

#[tokio::test]
async fn admin_list_is_paginated_with_client_summaries() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;
    let (ana, _) = create_user(&app, "ana@example.com", Role::Client).await;

    for _ in 0..3 {
        let (status, _) = send(
            &app,
            json_request(
                Method::POST,
                "/api/admin/invitations",
                Some(&admin),
                Some(admin_body(&ana.id.0.to_string())),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        json_request(
            Method::GET,
            "/api/admin/invitations?page=2&limit=2",
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["limit"], 2);
    assert_eq!(body["meta"]["totalPages"], 2);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["client"]["email"], "ana@example.com");
    assert_eq!(items[0]["client"]["id"], ana.id.0.to_string());

    // Junk paging falls back to defaults.
    let (status, body) = send(
        &app,
        json_request(
            Method::GET,
            "/api/admin/invitations?page=abc&limit=-4",
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn admin_manages_any_clients_invitation() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;
    let (ana, ana_token) = create_user(&app, "ana@example.com", Role::Client).await;
    let (luis, _) = create_user(&app, "luis@example.com", Role::Client).await;

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
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/admin/invitations/{id}");

    let (status, got) = send(&app, json_request(Method::GET, &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["data"]["client"]["email"], "ana@example.com");

    let (status, updated) = send(
        &app,
        json_request(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({ "clientId": luis.id.0.to_string(), "hashtag": "#AnaYCarlos" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["clientId"], luis.id.0.to_string());
    assert_eq!(updated["data"]["hashtag"], "#AnaYCarlos");

    // Ana no longer owns it.
    let (status, _) = send(
        &app,
        json_request(
            Method::GET,
            &format!("/api/client/invitations/{id}"),
            Some(&ana_token),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app
        .store
        .list_client_invitations(&ana.id)
        .await
        .unwrap()
        .is_empty());

    let (status, _) = send(
        &app,
        json_request(
            Method::PUT,
            &uri,
            Some(&admin),
            Some(json!({ "clientId": "0191d3a0-0000-7000-8000-000000000000" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, json_request(Method::DELETE, &uri, Some(&admin), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.store.count_invitations().await.unwrap(), 0);
}

#[tokio::test]
async fn admin_end_to_end_publish_and_share() {
    let app = create_test_app().await;
    let (_, admin) = create_user(&app, "admin@studio.mx", Role::Admin).await;
    let (ana, _) = create_user(&app, "ana@example.com", Role::Client).await;

    let mut body = admin_body(&ana.id.0.to_string());
    body["template"] = json!("moderno");
    body["isPublished"] = json!(false);
    body["rsvpValue"] = json!("WhatsApp: +52 555 123 4567");
    let (_, created) = send(
        &app,
        json_request(Method::POST, "/api/admin/invitations", Some(&admin), Some(body)),
    )
    .await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    let token = created["data"]["shareToken"].as_str().unwrap().to_string();
    let public = format!("/api/public/invitation/{token}");

    let (status, _) = send(&app, json_request(Method::GET, &public, None, None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, photos) = send(
        &app,
        photos_request(
            &format!("/api/admin/invitations/{id}/photos"),
            &admin,
            &[("portada.webp", "image/webp", b"webp")],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(photos["data"]["gallery"].as_array().map(Vec::len), Some(1));

    let (status, toggled) = send(
        &app,
        json_request(
            Method::PATCH,
            &format!("/api/admin/invitations/{id}/toggle-published"),
            Some(&admin),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["data"]["isPublished"], true);

    let (status, shared) = send(&app, json_request(Method::GET, &public, None, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shared["data"]["views"], 1);
    let presentation = &shared["data"]["presentation"];
    assert_eq!(presentation["placeholders"], 0);
    assert_eq!(
        presentation["shareUrl"],
        format!("https://lumiere.test/invitacion/{token}")
    );
    assert!(presentation["rsvpHref"]
        .as_str()
        .unwrap_or_default()
        .starts_with("https://wa.me/525551234567?text="));
    assert_eq!(presentation["style"]["theme"]["accent"], "#7baee0");
}
