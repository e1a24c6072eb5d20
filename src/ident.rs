//! Synthetic node identifiers.
//!
//! Graph nodes are keyed internally by [`NodeId`], a tagged composite key.
//! The joined string form only exists at the output boundary (`Display` and
//! `Serialize`), where components are concatenated with [`SPLIT_SYMBOL`].
//!
//! ## Separator Invariant
//!
//! `SPLIT_SYMBOL` must never occur inside an atom name, recipe label or
//! material name. Nothing checks this at runtime; a dataset containing the
//! sequence can produce colliding string ids and [`decompose`] will return the
//! wrong segment for it. Typed comparisons on `NodeId` are unaffected.

use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// Separator joining the components of a composite identifier.
pub const SPLIT_SYMBOL: &str = "@_@";

/// Prefix of recipe-choice labels ("配方1", "配方2", ...).
pub const RECIPE_LABEL_PREFIX: &str = "配方";

/// Display label of a recipe-choice node. `alternative` is 0-based.
pub fn recipe_label(alternative: usize) -> String {
    format!("{}{}", RECIPE_LABEL_PREFIX, alternative + 1)
}

/// Join identifier segments with the reserved separator.
pub fn compose<S: AsRef<str>>(segments: &[S]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str(SPLIT_SYMBOL);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Recover the display portion of a serialized identifier.
///
/// Returns the last separator-delimited segment. An identifier without the
/// separator comes back unchanged.
pub fn decompose(id: &str) -> &str {
    id.rsplit(SPLIT_SYMBOL).next().unwrap_or(id)
}

/// Identifier of a node in a recipe graph.
///
/// Ordered by variant then fields, so ids can key ordered maps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeId {
    /// The queried atom. Serializes to the bare atom name.
    Atom(String),
    /// A material attached directly to the root (single-recipe case).
    /// Serializes to the bare material name, so repeated queries converge.
    Material(String),
    /// A recipe-choice node under a multi-recipe root.
    Recipe {
        /// Root atom name.
        root: String,
        /// 0-based alternative index.
        alternative: usize,
    },
    /// A material under a recipe-choice node.
    RecipeMaterial {
        /// Root atom name.
        root: String,
        /// 0-based alternative index.
        alternative: usize,
        /// Material name.
        material: String,
    },
}

impl NodeId {
    /// Root id for an atom.
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Flattened material id.
    pub fn material(name: impl Into<String>) -> Self {
        Self::Material(name.into())
    }

    /// Recipe-choice id.
    pub fn recipe(root: impl Into<String>, alternative: usize) -> Self {
        Self::Recipe {
            root: root.into(),
            alternative,
        }
    }

    /// Material id scoped to one recipe alternative.
    pub fn recipe_material(
        root: impl Into<String>,
        alternative: usize,
        material: impl Into<String>,
    ) -> Self {
        Self::RecipeMaterial {
            root: root.into(),
            alternative,
            material: material.into(),
        }
    }

    /// Components in serialization order.
    pub fn segments(&self) -> Vec<Cow<'_, str>> {
        match self {
            Self::Atom(name) | Self::Material(name) => vec![Cow::Borrowed(name.as_str())],
            Self::Recipe { root, alternative } => vec![
                Cow::Borrowed(root.as_str()),
                Cow::Owned(recipe_label(*alternative)),
            ],
            Self::RecipeMaterial {
                root,
                alternative,
                material,
            } => vec![
                Cow::Borrowed(root.as_str()),
                Cow::Owned(recipe_label(*alternative)),
                Cow::Owned(alternative.to_string()),
                Cow::Borrowed(material.as_str()),
            ],
        }
    }

    /// Display portion of the id, taken from the typed key.
    ///
    /// Agrees with [`decompose`] on the serialized form whenever the
    /// separator invariant holds.
    pub fn display_name(&self) -> Cow<'_, str> {
        match self {
            Self::Atom(name) | Self::Material(name) => Cow::Borrowed(name.as_str()),
            Self::Recipe { alternative, .. } => Cow::Owned(recipe_label(*alternative)),
            Self::RecipeMaterial { material, .. } => Cow::Borrowed(material.as_str()),
        }
    }

    /// True for ids that name an atom lookup key directly.
    pub fn is_plain(&self) -> bool {
        matches!(self, Self::Atom(_) | Self::Material(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&compose(&self.segments()))
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_plain_id_is_identity() {
        assert_eq!(decompose("Iron"), "Iron");
        assert_eq!(decompose(""), "");
        assert_eq!(decompose("Boxed x"), "Boxed x");
    }

    #[test]
    fn test_decompose_composite_returns_last_segment() {
        assert_eq!(decompose("Gear@_@配方1@_@0@_@Iron"), "Iron");
        assert_eq!(decompose("Gear@_@配方2"), "配方2");
    }

    #[test]
    fn test_recipe_ids_serialize_with_separator() {
        assert_eq!(NodeId::recipe("Gear", 0).to_string(), "Gear@_@配方1");
        assert_eq!(
            NodeId::recipe_material("Gear", 1, "Iron").to_string(),
            "Gear@_@配方2@_@1@_@Iron"
        );
    }

    #[test]
    fn test_plain_ids_serialize_bare() {
        assert_eq!(NodeId::atom("Gear").to_string(), "Gear");
        assert_eq!(NodeId::material("Iron").to_string(), "Iron");
        assert!(NodeId::material("Iron").is_plain());
        assert!(!NodeId::recipe("Gear", 0).is_plain());
    }

    #[test]
    fn test_display_name_matches_decompose() {
        let ids = [
            NodeId::atom("Gear"),
            NodeId::material("Iron"),
            NodeId::recipe("Gear", 2),
            NodeId::recipe_material("Gear", 0, "Copper"),
        ];
        for id in &ids {
            assert_eq!(id.display_name(), decompose(&id.to_string()));
        }
    }

    #[test]
    fn test_same_material_in_different_alternatives_differs() {
        let a = NodeId::recipe_material("Gear", 0, "Iron");
        let b = NodeId::recipe_material("Gear", 1, "Iron");
        assert_ne!(a, b);
        assert_ne!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_serialize_as_json_string() {
        let json = serde_json::to_string(&NodeId::recipe("Gear", 0)).unwrap();
        assert_eq!(json, "\"Gear@_@配方1\"");
    }

    #[test]
    fn test_compose() {
        assert_eq!(compose(&["a", "b", "c"]), "a@_@b@_@c");
        assert_eq!(compose::<&str>(&[]), "");
    }
}
