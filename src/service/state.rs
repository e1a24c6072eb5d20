//! Service state management.
//!
//! Holds the atom index built at startup. The index is immutable, so the
//! state is shared across requests without locks.

use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::index::{AtomIndex, ParseReport};

use super::config::{ConfigError, ServiceConfig};

/// Shared service state.
#[derive(Debug, Clone)]
pub struct ServiceState {
    /// The atom index.
    pub index: Arc<AtomIndex>,
    /// Fingerprint of the index, computed once at load.
    pub index_fingerprint: String,
    /// Number of dataset lines rejected at load.
    pub skipped_lines: usize,
    /// When the index was built.
    pub loaded_at: DateTime<Utc>,
}

impl ServiceState {
    /// Create state around an already built index.
    pub fn new(index: AtomIndex) -> Self {
        Self::with_report(index, &ParseReport::default())
    }

    /// Create state from an index and the report of its build.
    pub fn with_report(index: AtomIndex, report: &ParseReport) -> Self {
        let index_fingerprint = index.fingerprint();
        Self {
            index: Arc::new(index),
            index_fingerprint,
            skipped_lines: report.skipped.len(),
            loaded_at: Utc::now(),
        }
    }

    /// Parse a dataset text into fresh state.
    pub fn from_dataset(text: &str) -> Self {
        let (index, report) = AtomIndex::parse_with_report(text);
        for skipped in &report.skipped {
            tracing::debug!(
                line = skipped.line_number,
                reason = %skipped.reason,
                "Dataset line excluded from index"
            );
        }
        Self::with_report(index, &report)
    }

    /// Read and index the dataset named by the configuration.
    pub fn load(config: &ServiceConfig) -> Result<Self, ConfigError> {
        let text = config.read_dataset()?;
        Ok(Self::from_dataset(&text))
    }
}
