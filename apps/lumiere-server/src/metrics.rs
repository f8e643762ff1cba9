//! Prometheus metrics for lumiere-server.
//!
//! Exposes server metrics in Prometheus format at the `/metrics` endpoint.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Install the Prometheus recorder and return a handle for rendering.
///
/// Must be called once at server startup before any metrics are recorded.
pub fn init_metrics() -> PrometheusHandle {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    describe_counter!(
        "lumiere_http_requests_total",
        "Total number of HTTP requests by method and status"
    );
    describe_histogram!(
        "lumiere_http_request_duration_seconds",
        "Duration of HTTP requests in seconds"
    );
    describe_counter!(
        "lumiere_invitation_views_total",
        "Successful public invitation views"
    );

    handle
}

pub fn record_http_request(method: &str, status: u16, elapsed: std::time::Duration) {
    counter!(
        "lumiere_http_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("lumiere_http_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

pub fn record_invitation_view() {
    counter!("lumiere_invitation_views_total").increment(1);
}

/// Middleware that records request count and latency.
pub async fn track_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let start = Instant::now();
    let response = next.run(req).await;
    record_http_request(method.as_str(), response.status().as_u16(), start.elapsed());
    response
}
