//! Service middleware for metrics and request tracking.
//!
//! ## Metrics Exposed
//!
//! - `request` events: path pattern, method, status, latency
//! - `graph` events: nodes and edges per built graph
//!
//! Metrics are emitted as tracing events and aggregated from logs.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use regex_lite::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

/// Metrics middleware that records request counts and latency.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = normalize_path(request.uri().path());

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    info!(
        target: "recipe_graph::metrics",
        metric_type = "request",
        path = %path,
        method = %method,
        status = status,
        latency_ms = latency.as_millis() as u64,
        "request_metric"
    );

    response
}

/// Normalize path for metrics to avoid high cardinality.
///
/// Atom names and node ids in path parameters become placeholders.
fn normalize_path(path: &str) -> String {
    static PARAM_ROUTE: OnceLock<Regex> = OnceLock::new();
    let re = PARAM_ROUTE.get_or_init(|| {
        Regex::new(r"^/api/(graph|decompose)/[^/]+").expect("static route pattern")
    });

    re.replace(path, "/api/$1/:param").to_string()
}

/// Record graph build metrics.
pub fn record_graph_metrics(node_count: usize, edge_count: usize, latency_us: u64) {
    info!(
        target: "recipe_graph::metrics",
        metric_type = "graph",
        node_count = node_count,
        edge_count = edge_count,
        latency_us = latency_us,
        "graph_metric"
    );
}
