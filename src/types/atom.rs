//! Atom types for the recipe index.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One material requirement inside a recipe alternative.
///
/// The quantity is kept verbatim. Dataset values are labels, not numbers,
/// and are never coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// Material name as written in the dataset.
    pub material: String,
    /// Raw quantity label.
    pub quantity: String,
}

impl MaterialEntry {
    /// Create a new material entry.
    pub fn new(material: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            quantity: quantity.into(),
        }
    }

    /// Display label used on graph nodes: `"<material> x <quantity>"`, or
    /// just the material when the dataset gave no quantity.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MaterialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.is_empty() {
            f.write_str(&self.material)
        } else {
            write!(f, "{} x {}", self.material, self.quantity)
        }
    }
}

/// One way to craft an atom: an ordered list of material entries.
pub type Recipe = Vec<MaterialEntry>;

/// A craftable (or raw) item in the index.
///
/// `recipe` holds one alternative per dataset line naming the atom, in
/// dataset order. A line with a blank recipe column contributes an empty
/// alternative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Canonical name, whitespace stripped. Unique within an index.
    pub name: String,
    /// Shelf label: the last segment of `path`.
    pub parent: String,
    /// Full category path as written in the dataset.
    pub path: String,
    /// Recipe alternatives.
    pub recipe: Vec<Recipe>,
}

impl Atom {
    /// Create an atom with no recipe alternatives yet.
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        let path = path.into();
        let parent = shelf_of(&path).to_string();
        Self {
            name: name.into(),
            parent,
            path,
            recipe: Vec::new(),
        }
    }

    /// Number of recipe alternatives.
    pub fn num_alternatives(&self) -> usize {
        self.recipe.len()
    }

    /// True when no alternative lists any material.
    pub fn is_base_material(&self) -> bool {
        self.recipe.iter().all(Vec::is_empty)
    }
}

/// Last `/`-separated segment of a category path.
pub fn shelf_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_is_last_segment() {
        assert_eq!(shelf_of("材料/金属/锭"), "锭");
        assert_eq!(shelf_of("flat"), "flat");
        assert_eq!(shelf_of("trailing/"), "");
    }

    #[test]
    fn test_new_atom_takes_parent_from_path() {
        let atom = Atom::new("IronPlate", "items/metal/plates");
        assert_eq!(atom.parent, "plates");
        assert_eq!(atom.path, "items/metal/plates");
        assert!(atom.is_base_material());
    }

    #[test]
    fn test_material_label() {
        let entry = MaterialEntry::new("Iron", "2");
        assert_eq!(entry.label(), "Iron x 2");
        assert_eq!(entry.to_string(), entry.label());
        assert_eq!(MaterialEntry::new("Coal", "").label(), "Coal");
    }

    #[test]
    fn test_empty_alternatives_are_base_material() {
        let mut atom = Atom::new("Iron", "ores/raw");
        atom.recipe.push(Vec::new());
        assert_eq!(atom.num_alternatives(), 1);
        assert!(atom.is_base_material());

        atom.recipe.push(vec![MaterialEntry::new("Ore", "1")]);
        assert!(!atom.is_base_material());
    }
}
