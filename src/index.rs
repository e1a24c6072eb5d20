//! Atom index.
//!
//! Aggregates parsed recipe lines by atom name. The index is built once and
//! never mutated afterwards; share it by reference or `Arc`.

use std::collections::BTreeMap;

use crate::canonical::canonical_hash_hex;
use crate::parser::{parse_dataset, normalize_atom_name, RecipeLine, SkippedLine};
use crate::types::Atom;

/// Read access to atoms by name.
///
/// Implementations must be read-only: repeated lookups of the same name
/// return the same atom.
pub trait AtomLookup {
    /// Fetch an atom by its canonical (whitespace-free) name.
    fn atom(&self, name: &str) -> Option<&Atom>;

    /// Fetch an atom by a raw name, normalizing it first.
    fn resolve(&self, raw_name: &str) -> Option<&Atom> {
        match self.atom(raw_name) {
            Some(atom) => Some(atom),
            None => self.atom(&normalize_atom_name(raw_name)),
        }
    }
}

/// Summary of an index build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Distinct atoms indexed.
    pub atoms: usize,
    /// Recipe alternatives indexed across all atoms.
    pub alternatives: usize,
    /// Lines that were rejected.
    pub skipped: Vec<SkippedLine>,
}

impl ParseReport {
    /// True when no line was rejected.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Immutable map from atom name to [`Atom`].
///
/// Uses `BTreeMap` for deterministic iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AtomIndex {
    atoms: BTreeMap<String, Atom>,
}

impl AtomIndex {
    /// Build an index from parsed lines.
    ///
    /// The first line naming an atom fixes its path and shelf. Every line,
    /// including one with a blank recipe column, appends one alternative.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = RecipeLine>,
    {
        let mut atoms: BTreeMap<String, Atom> = BTreeMap::new();

        for line in lines {
            let atom = atoms
                .entry(line.atom)
                .or_insert_with_key(|name| Atom::new(name.clone(), line.path));
            atom.recipe.push(line.recipe);
        }

        Self { atoms }
    }

    /// Parse a dataset into an index, discarding the report.
    pub fn parse(text: &str) -> Self {
        Self::parse_with_report(text).0
    }

    /// Parse a dataset into an index and a report of what was skipped.
    pub fn parse_with_report(text: &str) -> (Self, ParseReport) {
        let (lines, skipped) = parse_dataset(text);
        let index = Self::from_lines(lines);

        let report = ParseReport {
            atoms: index.len(),
            alternatives: index.num_alternatives(),
            skipped,
        };

        tracing::info!(
            atoms = report.atoms,
            alternatives = report.alternatives,
            skipped = report.skipped.len(),
            "Atom index built"
        );

        (index, report)
    }

    /// Fetch an atom by name.
    pub fn get(&self, name: &str) -> Option<&Atom> {
        self.atoms.get(name)
    }

    /// Check whether an atom is indexed.
    pub fn contains(&self, name: &str) -> bool {
        self.atoms.contains_key(name)
    }

    /// Number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Total recipe alternatives across all atoms.
    pub fn num_alternatives(&self) -> usize {
        self.atoms.values().map(Atom::num_alternatives).sum()
    }

    /// Atom names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.atoms.keys().map(String::as_str)
    }

    /// Atoms in name order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.values()
    }

    /// Atom names grouped by shelf label. Names within a shelf are sorted.
    pub fn shelves(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut shelves: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for atom in self.atoms.values() {
            shelves
                .entry(atom.parent.as_str())
                .or_default()
                .push(atom.name.as_str());
        }
        shelves
    }

    /// xxh64 of the canonical JSON form of every atom, as hex.
    ///
    /// Changes whenever any atom, path or recipe alternative changes.
    pub fn fingerprint(&self) -> String {
        canonical_hash_hex(&self.atoms)
    }
}

impl AtomLookup for AtomIndex {
    fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.get(name)
    }
}
