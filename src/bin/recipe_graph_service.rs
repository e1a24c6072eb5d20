//! Recipe Graph Service Binary
//!
//! Indexes the recipe dataset named by `RECIPE_DATASET` once at startup and
//! serves graphs from it. See [`recipe_graph::service::ServiceConfig`] for the
//! environment variables read.
//!
//! ```bash
//! RECIPE_DATASET=./recipes.csv cargo run --bin recipe_graph_service --features service
//! ```

use axum::{body::Body, http::Request, middleware};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::{info, info_span, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recipe_graph::service::{
    create_router, metrics_middleware, LogFormat, ServiceConfig, ServiceState,
};

const DEFAULT_FILTER: &str = "recipe_graph_service=info,recipe_graph=info,tower_http=info";

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .flatten_event(true),
            )
            .init(),
    }
}

/// Request span carrying the caller's `X-Request-Id`, or a fresh one.
fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get("X-Request-Id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_format);

    let state = ServiceState::load(&config).map_err(|e| {
        tracing::error!(error = %e, "Failed to load recipe dataset");
        e
    })?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        dataset = %config.dataset_path.display(),
        atoms = state.index.len(),
        skipped_lines = state.skipped_lines,
        index_fingerprint = %state.index_fingerprint,
        "Atom index loaded"
    );

    let app = create_router(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive());

    let listener = TcpListener::bind(config.bind_address()).await?;
    info!(address = %listener.local_addr()?, "Recipe Graph Service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
