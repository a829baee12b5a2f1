//! Cleaning and projection operations on tables

mod dedup;
mod fill;
mod project;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use dedup::remove_duplicates;
pub use fill::{fill_missing_numeric, fill_missing_numeric_in, FillOutcome};
pub use project::project_columns;

/// What the cleaning steps changed in a table
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows dropped as exact duplicates of an earlier row
    pub duplicates_removed: usize,
    /// Cells filled per column, in column order
    pub filled: IndexMap<String, usize>,
    /// Numeric columns left untouched because they had no values to average
    pub mean_undefined: Vec<String>,
}

impl CleaningReport {
    /// Total number of filled cells
    pub fn cells_filled(&self) -> usize {
        self.filled.values().sum()
    }

    pub(crate) fn record_fill(&mut self, outcome: FillOutcome) {
        self.filled.extend(outcome.filled);
        self.mean_undefined.extend(outcome.mean_undefined);
    }
}
