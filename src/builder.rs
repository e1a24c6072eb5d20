//! Graph builder.
//!
//! Derives a one-level dependency graph for a single atom. The shape depends
//! on how many recipe alternatives the atom has:
//!
//! ```text
//! k == 0   Root                     (also k == 1 with no materials)
//!
//! k == 1   Root ──► Iron            (bare material ids, path resolved)
//!               └─► Coal
//!
//! k  > 1   Root ──► Root@_@配方1 ──► Root@_@配方1@_@0@_@Iron
//!               │               └─► Root@_@配方1@_@0@_@Coal
//!               └─► Root@_@配方2 ──► Root@_@配方2@_@1@_@Scrap
//! ```
//!
//! The single-recipe case attaches materials straight to the root and reuses
//! bare material names as ids, so queries for related atoms converge on the
//! same node. The multi-recipe case scopes every material id to its
//! alternative and does not resolve material paths.

use crate::ident::{decompose, recipe_label, NodeId};
use crate::index::AtomLookup;
use crate::types::{Atom, GraphEdge, GraphNode, Recipe, RecipeGraph};

/// Builds recipe graphs from an atom index.
///
/// Holds only a shared reference to the index; each call allocates fresh
/// output and the builder itself carries no state between calls.
#[derive(Debug)]
pub struct GraphBuilder<'a, L: AtomLookup + ?Sized> {
    index: &'a L,
}

impl<'a, L: AtomLookup + ?Sized> Clone for GraphBuilder<'a, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, L: AtomLookup + ?Sized> Copy for GraphBuilder<'a, L> {}

impl<'a, L: AtomLookup + ?Sized> GraphBuilder<'a, L> {
    /// Create a builder over an index.
    pub fn new(index: &'a L) -> Self {
        Self { index }
    }

    /// Build the graph for `name`.
    ///
    /// Returns `None` when the atom is unknown. There is no partial result.
    pub fn build(&self, name: &str) -> Option<RecipeGraph> {
        self.index.atom(name).map(|atom| self.build_logged(atom))
    }

    /// Build the graph for the atom a node id points at.
    ///
    /// Decomposes the serialized id and resolves its display portion the same
    /// way flattened material paths are resolved, so every material node that
    /// carries a `path` can be expanded.
    pub fn build_from_node_id(&self, id: &str) -> Option<RecipeGraph> {
        self.index
            .resolve(decompose(id))
            .map(|atom| self.build_logged(atom))
    }

    fn build_logged(&self, atom: &Atom) -> RecipeGraph {
        let graph = self.build_for(atom);

        tracing::debug!(
            atom = %atom.name,
            alternatives = atom.num_alternatives(),
            nodes = graph.num_nodes(),
            edges = graph.num_edges(),
            "Recipe graph built"
        );

        graph
    }

    /// Build the graph for an atom already in hand.
    pub fn build_for(&self, atom: &Atom) -> RecipeGraph {
        let root_id = NodeId::atom(atom.name.as_str());
        let mut graph = RecipeGraph {
            nodes: vec![GraphNode::new(
                root_id.clone(),
                atom.name.as_str(),
                Some(atom.path.clone()),
            )],
            edges: Vec::new(),
        };

        match atom.recipe.as_slice() {
            [] => {}
            [only] => self.flatten(&mut graph, &root_id, only),
            alternatives => Self::branch(&mut graph, &atom.name, &root_id, alternatives),
        }

        graph
    }

    /// Single alternative: materials hang directly off the root.
    fn flatten(&self, graph: &mut RecipeGraph, root_id: &NodeId, recipe: &Recipe) {
        for entry in recipe {
            let id = NodeId::material(entry.material.as_str());
            let path = self
                .index
                .resolve(&entry.material)
                .map(|known| known.path.clone());

            graph.nodes.push(GraphNode::new(id.clone(), entry.label(), path));
            graph.edges.push(GraphEdge::new(root_id.clone(), id));
        }
    }

    /// Several alternatives: one recipe-choice node per alternative, each
    /// owning its own material nodes.
    fn branch(graph: &mut RecipeGraph, root: &str, root_id: &NodeId, alternatives: &[Recipe]) {
        for (alternative, recipe) in alternatives.iter().enumerate() {
            let recipe_id = NodeId::recipe(root, alternative);
            graph.nodes.push(GraphNode::new(
                recipe_id.clone(),
                recipe_label(alternative),
                None,
            ));
            graph.edges.push(GraphEdge::new(root_id.clone(), recipe_id.clone()));

            for entry in recipe {
                let id = NodeId::recipe_material(root, alternative, entry.material.as_str());
                graph.nodes.push(GraphNode::new(id.clone(), entry.label(), None));
                graph.edges.push(GraphEdge::new(recipe_id.clone(), id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::AtomIndex;

    const DATASET: &str = "\
parts/metal,Gear,Iron x 2|Coal x 1
parts/metal,Bolt,Iron x 1|Coal x 1
parts/metal,Bolt,Iron x 3
ores/raw,Iron,
";

    fn index() -> AtomIndex {
        AtomIndex::parse(DATASET)
    }

    #[test]
    fn test_unknown_atom_is_none() {
        let index = index();
        assert!(GraphBuilder::new(&index).build("Gold").is_none());
    }

    #[test]
    fn test_base_material_is_root_only() {
        let index = index();
        let graph = GraphBuilder::new(&index).build("Iron").unwrap();

        assert_eq!(graph.num_nodes(), 1);
        assert_eq!(graph.num_edges(), 0);
        let root = graph.root().unwrap();
        assert_eq!(root.id, NodeId::atom("Iron"));
        assert_eq!(root.label(), "Iron");
        assert_eq!(root.path(), Some("ores/raw"));
    }

    #[test]
    fn test_single_recipe_flattens() {
        let index = index();
        let graph = GraphBuilder::new(&index).build("Gear").unwrap();

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.nodes[1].id, NodeId::material("Iron"));
        assert_eq!(graph.nodes[1].label(), "Iron x 2");
        assert_eq!(graph.nodes[1].path(), Some("ores/raw"));
        assert_eq!(graph.nodes[2].id, NodeId::material("Coal"));
        assert_eq!(graph.nodes[2].path(), None);

        assert_eq!(graph.num_edges(), 2);
        assert!(graph.edges.iter().all(|e| e.source == NodeId::atom("Gear")));
    }

    #[test]
    fn test_multiple_recipes_branch() {
        let index = index();
        let graph = GraphBuilder::new(&index).build("Bolt").unwrap();

        let ids: Vec<String> = graph.nodes.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(
            ids,
            vec![
                "Bolt",
                "Bolt@_@配方1",
                "Bolt@_@配方1@_@0@_@Iron",
                "Bolt@_@配方1@_@0@_@Coal",
                "Bolt@_@配方2",
                "Bolt@_@配方2@_@1@_@Iron",
            ]
        );

        assert_eq!(graph.nodes[1].label(), "配方1");
        assert_eq!(graph.nodes[1].path(), None);
        assert_eq!(graph.nodes[5].label(), "Iron x 3");
        // Branch materials are never resolved against the index.
        assert_eq!(graph.nodes[5].path(), None);

        let root = NodeId::atom("Bolt");
        assert_eq!(graph.children_of(&root).count(), 2);
        assert_eq!(graph.children_of(&NodeId::recipe("Bolt", 0)).count(), 2);
        assert_eq!(graph.children_of(&NodeId::recipe("Bolt", 1)).count(), 1);
        assert_eq!(graph.num_edges(), 5);
        assert!(graph.is_closed());
    }

    #[test]
    fn test_build_from_node_id_expands_material() {
        let index = index();
        let builder = GraphBuilder::new(&index);

        let graph = builder.build_from_node_id("Bolt@_@配方2@_@1@_@Iron").unwrap();
        assert_eq!(graph.root().unwrap().id, NodeId::atom("Iron"));
        assert!(builder.build_from_node_id("Bolt@_@配方1").is_none());
    }

    #[test]
    fn test_flattened_node_with_path_expands() {
        let index = AtomIndex::parse("a,Iron Gear,\nb,Clock,Iron Gear x 1\n");
        let builder = GraphBuilder::new(&index);

        let clock = builder.build("Clock").unwrap();
        let material = &clock.nodes[1];
        assert_eq!(material.id, NodeId::material("Iron Gear"));
        assert_eq!(material.path(), Some("a"));

        let expanded = builder.build_from_node_id(&material.id.to_string()).unwrap();
        assert_eq!(expanded.root().unwrap().id, NodeId::atom("IronGear"));
        assert_eq!(expanded.root().unwrap().path(), Some("a"));
    }

    #[test]
    fn test_material_without_quantity_labelled_by_name() {
        let index = AtomIndex::parse("parts/m,Bolt,Iron x 1|Coal\n");
        let graph = GraphBuilder::new(&index).build("Bolt").unwrap();
        let labels: Vec<&str> = graph.nodes.iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["Bolt", "Iron x 1", "Coal"]);
    }

    #[test]
    fn test_blank_and_recipe_lines_branch() {
        let index = AtomIndex::parse("a,Gear,Iron x 1\nb,Gear,\n");
        let graph = GraphBuilder::new(&index).build("Gear").unwrap();

        let ids: Vec<String> = graph.nodes.iter().map(|n| n.id.to_string()).collect();
        assert_eq!(ids, vec!["Gear", "Gear@_@配方1", "Gear@_@配方1@_@0@_@Iron", "Gear@_@配方2"]);
        assert_eq!(graph.children_of(&NodeId::recipe("Gear", 1)).count(), 0);
        assert!(graph.is_closed());
    }

    #[test]
    fn test_build_is_idempotent() {
        let index = index();
        let builder = GraphBuilder::new(&index);
        assert_eq!(builder.build("Bolt"), builder.build("Bolt"));
        assert_eq!(
            builder.build("Gear").unwrap().fingerprint(),
            builder.build("Gear").unwrap().fingerprint()
        );
    }
}
