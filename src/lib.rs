//! # recipe-graph
//!
//! Crafting recipe index and one-level dependency graphs.
//!
//! The crate answers one question:
//!
//! > Given an item, what does it take to craft it, one step down?
//!
//! ## Core Contract
//!
//! 1. Parse a comma/pipe delimited recipe dataset into an immutable [`AtomIndex`]
//! 2. Given an atom name, derive a node/edge graph of its immediate recipe
//!    dependencies with collision-free node ids
//! 3. Hand the graph to a renderer as `{ nodes: [{ id, data }], edges: [{ source, target }] }`
//!
//! ## Architecture
//!
//! ```text
//! raw dataset → parser → AtomIndex → GraphBuilder → RecipeGraph
//!                                         ↓
//!                                  ident (NodeId, decompose)
//! ```
//!
//! ## Example
//!
//! ```
//! use recipe_graph::{AtomIndex, GraphBuilder, decompose};
//!
//! let index = AtomIndex::parse("parts/metal,Gear,Iron x 2|Coal x 1\n");
//! let graph = GraphBuilder::new(&index).build("Gear").unwrap();
//!
//! assert_eq!(graph.nodes.len(), 3);
//! assert_eq!(graph.edges.len(), 2);
//! assert_eq!(decompose("Gear@_@配方1@_@0@_@Iron"), "Iron");
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same index + same name → identical graph (ids and order)
//! - Nodes are emitted root first, then per alternative, then per material
//! - Every edge endpoint is a node of the same graph

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod parser;
pub mod index;
pub mod ident;
pub mod builder;
pub mod canonical;

#[cfg(feature = "service")]
pub mod service;

// Re-exports
pub use types::{Atom, MaterialEntry, Recipe, GraphNode, GraphEdge, NodeData, RecipeGraph};
pub use parser::{LineError, RecipeLine, SkippedLine, parse_dataset, parse_line, normalize_atom_name};
pub use index::{AtomIndex, AtomLookup, ParseReport};
pub use ident::{NodeId, SPLIT_SYMBOL, RECIPE_LABEL_PREFIX, compose, decompose, recipe_label};
pub use builder::GraphBuilder;
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex};

// Service re-exports (when service feature is enabled)
#[cfg(feature = "service")]
pub use service::{create_router, ServiceConfig, ServiceState};

/// Schema version of the graph output format.
/// Increment on breaking changes to node or edge records.
pub const RECIPE_GRAPH_SCHEMA_VERSION: &str = "1.0.0";

/// Build the graph for `name` against `index`.
///
/// Shorthand for `GraphBuilder::new(index).build(name)`.
pub fn build<L: AtomLookup + ?Sized>(index: &L, name: &str) -> Option<RecipeGraph> {
    GraphBuilder::new(index).build(name)
}
