//! Core types for the recipe graph.

pub mod atom;
pub mod graph;

pub use atom::{Atom, MaterialEntry, Recipe, shelf_of};
pub use graph::{GraphNode, GraphEdge, NodeData, RecipeGraph};
