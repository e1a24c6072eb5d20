//! Dataset parser.
//!
//! Turns the raw recipe dataset into [`RecipeLine`] records. One line reads:
//!
//! ```text
//! <category>/<path>/<segments>,<atom name>,<material x quantity>|<material x quantity>...
//! ```
//!
//! Only the line shape is validated: a line needs three columns and a
//! non-empty atom name. Malformed lines are skipped and reported, never fatal.
//! The recipe column is read leniently, so any well-shaped line registers its
//! atom.

use crate::types::{MaterialEntry, Recipe};

/// Column separator.
const COLUMN_SEPARATOR: char = ',';
/// Separator between material pairs inside the recipe column.
const PAIR_SEPARATOR: char = '|';
/// Token between a material and its quantity. Bare `x` characters inside
/// material names are not separators.
const QUANTITY_TOKEN: &str = " x ";
/// Minimum columns for a valid line.
const MIN_COLUMNS: usize = 3;

/// Reason a dataset line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    /// Fewer than three comma-separated columns.
    #[error("too few columns: expected at least 3, found {found}")]
    TooFewColumns {
        /// Columns actually present.
        found: usize,
    },
    /// Atom name column is empty once whitespace is removed.
    #[error("empty atom name")]
    EmptyAtomName,
}

/// One parsed dataset line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLine {
    /// 1-based line number in the source text.
    pub line_number: usize,
    /// Category path as written.
    pub path: String,
    /// Atom name with all whitespace removed.
    pub atom: String,
    /// The recipe alternative on this line. Empty when the recipe column is
    /// blank.
    pub recipe: Recipe,
}

/// A line the parser rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// Trimmed line text.
    pub content: String,
    /// Why it was rejected.
    pub reason: LineError,
}

/// Normalize an atom name into its lookup key by removing all whitespace.
pub fn normalize_atom_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse one non-blank line.
pub fn parse_line(line_number: usize, line: &str) -> Result<RecipeLine, LineError> {
    let columns: Vec<&str> = line.split(COLUMN_SEPARATOR).collect();
    if columns.len() < MIN_COLUMNS {
        return Err(LineError::TooFewColumns {
            found: columns.len(),
        });
    }

    let atom = normalize_atom_name(columns[1]);
    if atom.is_empty() {
        return Err(LineError::EmptyAtomName);
    }

    Ok(RecipeLine {
        line_number,
        path: columns[0].to_string(),
        atom,
        recipe: parse_recipe(columns[2]),
    })
}

/// Parse the recipe column into one alternative.
///
/// Pairs with no material name (blank columns, stray `|`) are dropped.
fn parse_recipe(column: &str) -> Recipe {
    column.split(PAIR_SEPARATOR).filter_map(parse_pair).collect()
}

/// Split one pair on the first ` x `. A pair without the token is a material
/// with an empty quantity.
fn parse_pair(pair: &str) -> Option<MaterialEntry> {
    let (material, quantity) = pair.split_once(QUANTITY_TOKEN).unwrap_or((pair, ""));

    let material = material.trim();
    if material.is_empty() {
        return None;
    }

    Some(MaterialEntry::new(material, quantity.trim()))
}

/// Parse a whole dataset.
///
/// Blank lines are ignored silently. Every rejected line is logged at `warn`
/// and returned in the skipped list; parsing always runs to the end.
pub fn parse_dataset(text: &str) -> (Vec<RecipeLine>, Vec<SkippedLine>) {
    let mut lines = Vec::new();
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = idx + 1;

        match parse_line(line_number, line) {
            Ok(parsed) => lines.push(parsed),
            Err(reason) => {
                tracing::warn!(
                    line = line_number,
                    reason = %reason,
                    content = line,
                    "Skipping invalid dataset line"
                );
                skipped.push(SkippedLine {
                    line_number,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }

    (lines, skipped)
}
