//! Graph output records handed to renderers.
//!
//! The serialized shape is the one graph renderers expect:
//! nodes as `{ id, data: { label, path? } }` and edges as `{ source, target }`.

use serde::Serialize;
use std::collections::HashSet;

use crate::canonical::canonical_hash_hex;
use crate::ident::NodeId;

/// Render payload of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeData {
    /// Text shown on the node.
    pub label: String,
    /// Category path, present only when the node resolves to a known atom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A node in a recipe graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// Node identifier.
    pub id: NodeId,
    /// Render payload.
    pub data: NodeData,
}

impl GraphNode {
    /// Create a node.
    pub fn new(id: NodeId, label: impl Into<String>, path: Option<String>) -> Self {
        Self {
            id,
            data: NodeData {
                label: label.into(),
                path,
            },
        }
    }

    /// Node label.
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Node path, if any.
    pub fn path(&self) -> Option<&str> {
        self.data.path.as_deref()
    }
}

/// Directed edge from a node to one of its requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    /// Source node id.
    pub source: NodeId,
    /// Target node id.
    pub target: NodeId,
}

impl GraphEdge {
    /// Create an edge.
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }
}

/// One-level recipe graph for a queried atom.
///
/// `nodes[0]` is always the root. Node and edge order follow recipe
/// iteration order and are never sorted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeGraph {
    /// Nodes, root first.
    pub nodes: Vec<GraphNode>,
    /// Edges in emission order.
    pub edges: Vec<GraphEdge>,
}

impl RecipeGraph {
    /// The root node.
    pub fn root(&self) -> Option<&GraphNode> {
        self.nodes.first()
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Find a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Edges leaving `id`, in emission order.
    pub fn children_of<'a>(&'a self, id: &'a NodeId) -> impl Iterator<Item = &'a NodeId> + 'a {
        self.edges
            .iter()
            .filter(move |e| &e.source == id)
            .map(|e| &e.target)
    }

    /// Check that every edge endpoint names a node in this graph.
    pub fn is_closed(&self) -> bool {
        let ids: HashSet<&NodeId> = self.nodes.iter().map(|n| &n.id).collect();
        self.edges
            .iter()
            .all(|e| ids.contains(&e.source) && ids.contains(&e.target))
    }

    /// Serialize to the renderer's JSON shape.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "nodes": self.nodes,
            "edges": self.edges,
        })
    }

    /// xxh64 of the canonical JSON form, as hex.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(self)
    }
}
