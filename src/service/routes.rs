//! Axum routes for the recipe graph service.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::builder::GraphBuilder;
use crate::ident::decompose;
use crate::types::RecipeGraph;
use crate::RECIPE_GRAPH_SCHEMA_VERSION;

use super::middleware::record_graph_metrics;
use super::state::ServiceState;

// ============================================================================
// Response Types
// ============================================================================

/// Graph for one atom.
#[derive(Debug, Clone, Serialize)]
pub struct GraphResponse {
    /// Nodes and edges, renderer shape.
    #[serde(flatten)]
    pub graph: RecipeGraph,
    /// Fingerprint of this graph.
    pub fingerprint: String,
    /// Fingerprint of the index the graph was built from.
    pub index_fingerprint: String,
}

/// Display name recovered from a node id.
#[derive(Debug, Clone, Serialize)]
pub struct DecomposeResponse {
    /// The id as received.
    pub id: String,
    /// Its display portion.
    pub name: String,
    /// Whether the display portion is an indexed atom.
    pub known_atom: bool,
}

/// Atom names grouped by shelf.
#[derive(Debug, Clone, Serialize)]
pub struct ShelvesResponse {
    /// Shelf label to sorted atom names.
    pub shelves: BTreeMap<String, Vec<String>>,
}

/// Service health response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub schema_version: String,
    pub atom_count: usize,
    pub alternative_count: usize,
    pub skipped_lines: usize,
    pub index_fingerprint: String,
    pub loaded_at: String,
}

/// Simple liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessResponse {
    pub status: String,
}

/// Structured error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Route Handlers
// ============================================================================

/// Build the recipe graph for an atom.
pub async fn graph_handler(
    State(state): State<ServiceState>,
    Path(name): Path<String>,
) -> Result<Json<GraphResponse>, HandlerError> {
    let start = Instant::now();

    let graph = GraphBuilder::new(state.index.as_ref())
        .build(&name)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(
                    ErrorResponse::new("ATOM_NOT_FOUND", format!("Atom not found: {}", name))
                        .with_details(name.clone()),
                ),
            )
        })?;

    record_graph_metrics(
        graph.num_nodes(),
        graph.num_edges(),
        start.elapsed().as_micros() as u64,
    );

    Ok(Json(GraphResponse {
        fingerprint: graph.fingerprint(),
        index_fingerprint: state.index_fingerprint.clone(),
        graph,
    }))
}

/// Recover the display name of a node id.
pub async fn decompose_handler(
    State(state): State<ServiceState>,
    Path(id): Path<String>,
) -> Json<DecomposeResponse> {
    let name = decompose(&id).to_string();
    Json(DecomposeResponse {
        known_atom: state.index.contains(&name),
        name,
        id,
    })
}

/// List atoms by shelf.
pub async fn shelves_handler(State(state): State<ServiceState>) -> Json<ShelvesResponse> {
    let shelves = state
        .index
        .shelves()
        .into_iter()
        .map(|(shelf, names)| {
            (
                shelf.to_string(),
                names.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();
    Json(ShelvesResponse { shelves })
}

/// Health check endpoint (detailed).
pub async fn health_handler(State(state): State<ServiceState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: if state.index.is_empty() { "degraded" } else { "healthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        schema_version: RECIPE_GRAPH_SCHEMA_VERSION.to_string(),
        atom_count: state.index.len(),
        alternative_count: state.index.num_alternatives(),
        skipped_lines: state.skipped_lines,
        index_fingerprint: state.index_fingerprint.clone(),
        loaded_at: state.loaded_at.to_rfc3339(),
    })
}

/// Liveness probe endpoint.
async fn liveness_handler() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: "alive".to_string(),
    })
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the recipe graph service.
pub fn create_router(state: ServiceState) -> Router {
    Router::new()
        .route("/api/graph/:name", get(graph_handler))
        .route("/api/decompose/:id", get(decompose_handler))
        .route("/api/shelves", get(shelves_handler))
        .route("/health", get(health_handler))
        .route("/health/live", get(liveness_handler))
        .with_state(state)
}
