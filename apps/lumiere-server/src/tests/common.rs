//! Common test helpers for server tests.

use crate::auth::issue_session;
use crate::config::ServerConfig;
use crate::server::LumiereServer;
use crate::uploads::{DiskUploadStore, UploadConfig};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use lumiere_storage::*;
use lumiere_store_sqlite::SqliteStore;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "lumiere-test-boundary";

pub struct TestApp {
    pub server: LumiereServer,
    pub store: Arc<SqliteStore>,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub fn upload_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }
}

/// Test helper: in-memory SQLite and a temp upload directory.
pub async fn create_test_app() -> TestApp {
    create_test_app_with_limit(1024).await
}

pub async fn create_test_app_with_limit(max_file_size: u64) -> TestApp {
    let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
    let upload_dir = tempfile::tempdir().unwrap();
    let config = ServerConfig {
        upload_dir: upload_dir.path().to_path_buf(),
        max_file_size,
        public_url: "https://lumiere.test".to_string(),
        ..ServerConfig::default()
    };
    let uploads = Arc::new(DiskUploadStore::new(UploadConfig {
        dir: config.upload_dir.clone(),
        max_file_size,
    }));
    let server = LumiereServer::new(store.clone(), uploads, config);
    TestApp {
        server,
        store,
        upload_dir,
    }
}

/// Test helper: create a user and a live session token for it.
pub async fn create_user(app: &TestApp, email: &str, role: Role) -> (User, String) {
    let user = app
        .store
        .create_user(&CreateUserParams {
            email: email.to_string(),
            name: email.split('@').next().unwrap_or_default().to_string(),
            role,
        })
        .await
        .unwrap();
    let token = issue_session(app.store.as_ref(), &user, 1).await.unwrap();
    (user, token)
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// A multipart body with one `photos` part per `(file name, content type, bytes)`.
pub fn photos_request(uri: &str, token: &str, files: &[(&str, &str, &[u8])]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Send a request through a fresh router and decode the JSON body (Null if empty).
pub async fn send(app: &TestApp, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.server.clone().router().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

/// Minimal valid self-service create body.
pub fn invitation_body() -> Value {
    serde_json::json!({
        "eventType": "Boda",
        "title": "Nuestra boda",
        "names": "Ana & Carlos",
        "eventDate": "12 de junio de 2026",
        "template": "floral",
    })
}

/// Build the record a store would return for `params`.
pub fn invitation_from_params(params: &CreateInvitationParams) -> Invitation {
    let now = chrono::Utc::now();
    Invitation {
        id: InvitationId(uuid::Uuid::now_v7()),
        client_id: params.client_id.clone(),
        share_token: params.share_token.clone(),
        event_type: params.event_type.clone(),
        title: params.title.clone(),
        names: params.names.clone(),
        event_date: params.event_date.clone(),
        event_time: params.event_time.clone(),
        venue: params.venue.clone(),
        location_note: params.location_note.clone(),
        message: params.message.clone(),
        quote: params.quote.clone(),
        hashtag: params.hashtag.clone(),
        dress_code: params.dress_code.clone(),
        rsvp_label: params.rsvp_label.clone(),
        rsvp_value: params.rsvp_value.clone(),
        template: params.template.clone(),
        primary_color: params.primary_color.clone(),
        text_color: params.text_color.clone(),
        font_style: params.font_style.clone(),
        is_dark: params.is_dark,
        gallery: params.gallery.clone(),
        is_published: params.is_published,
        views: 0,
        created_at: now,
        updated_at: now,
    }
}
