use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, patch, post};
use axum::{middleware, Router};
use lumiere_storage::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::authoring::Authoring;
use crate::config::ServerConfig;
use crate::handlers::{admin, client, health, public};
use crate::metrics::track_requests;
use crate::uploads::{UploadStore, UPLOADS_ROUTE};

/// Files accepted in one photo batch request.
pub const MAX_BATCH_FILES: u64 = 20;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct LumiereServer {
    pub store: Arc<dyn Store>,
    pub uploads: Arc<dyn UploadStore>,
    pub config: Arc<ServerConfig>,
    pub metrics: Option<PrometheusHandle>,
}

impl LumiereServer {
    pub fn new(
        store: Arc<dyn Store>,
        uploads: Arc<dyn UploadStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            store,
            uploads,
            config: Arc::new(config),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    pub fn authoring(&self) -> Authoring<'_> {
        Authoring::new(self.store.as_ref())
    }

    pub fn router(self) -> Router {
        let client_routes = Router::new()
            .route(
                "/invitations",
                get(client::list_invitations).post(client::create_invitation),
            )
            .route(
                "/invitations/:id",
                get(client::get_invitation)
                    .put(client::update_invitation)
                    .delete(client::delete_invitation),
            )
            .route(
                "/invitations/:id/toggle-published",
                patch(client::toggle_published),
            )
            .route("/invitations/:id/photos", post(client::add_photos));

        let admin_routes = Router::new()
            .route(
                "/invitations",
                get(admin::list_invitations).post(admin::create_invitation),
            )
            .route(
                "/invitations/:id",
                get(admin::get_invitation)
                    .put(admin::update_invitation)
                    .delete(admin::delete_invitation),
            )
            .route(
                "/invitations/:id/toggle-published",
                patch(admin::toggle_published),
            )
            .route("/invitations/:id/photos", post(admin::add_photos));

        let public_routes = Router::new()
            .route("/templates", get(public::list_templates))
            .route("/invitation/:token", get(public::get_shared_invitation));

        let body_limit = self
            .config
            .max_file_size
            .saturating_mul(MAX_BATCH_FILES)
            .saturating_add(1024 * 1024);
        let body_limit = usize::try_from(body_limit).unwrap_or(usize::MAX);

        let upload_dir = ServeDir::new(&self.config.upload_dir);
        let cors = self.cors_layer();

        Router::new()
            .route("/api/health", get(health::health))
            .route("/metrics", get(health::metrics))
            .nest("/api/public", public_routes)
            .nest("/api/client", client_routes)
            .nest("/api/admin", admin_routes)
            .nest_service(UPLOADS_ROUTE, upload_dir)
            .with_state(self)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(middleware::from_fn(track_requests))
                    .layer(cors)
                    .layer(DefaultBodyLimit::max(body_limit)),
            )
    }

    fn cors_layer(&self) -> CorsLayer {
        let layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);
        match HeaderValue::from_str(&self.config.public_url) {
            Ok(origin) => layer.allow_origin(origin),
            Err(e) => {
                warn!(origin = %self.config.public_url, error = %e, "invalid CORS origin, allowing none");
                layer
            }
        }
    }
}
