//! Recipe Graph REST Service
//!
//! Serves recipe graphs to a browser-side renderer.
//!
//! ## Endpoints
//!
//! - `GET /api/graph/:name` - One-level recipe graph for an atom
//! - `GET /api/decompose/:id` - Display name of a node id
//! - `GET /api/shelves` - Atom names grouped by shelf
//! - `GET /health` - Detailed service health check
//! - `GET /health/live` - Liveness probe

pub mod config;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::{ConfigError, LogFormat, ServiceConfig};
pub use middleware::{metrics_middleware, record_graph_metrics};
pub use routes::{create_router, ErrorResponse, GraphResponse};
pub use state::ServiceState;
