//! Column projection

use rustc_hash::FxHashSet;

use crate::error::{Result, SweepError};
use crate::model::{Row, Table};

/// Build a new table holding only `keep`, in the order given.
///
/// Fails on an empty selection, on a name that is not a column of
/// `table`, and on a name listed twice.
pub fn project_columns(table: &Table, keep: &[String]) -> Result<Table> {
    if keep.is_empty() {
        return Err(SweepError::EmptySelection);
    }

    let mut seen = FxHashSet::default();
    let mut indices = Vec::with_capacity(keep.len());
    for name in keep {
        let idx = table
            .column_index(name)
            .ok_or_else(|| SweepError::UnknownColumn(name.clone()))?;
        if !seen.insert(idx) {
            return Err(SweepError::DuplicateColumn(name.clone()));
        }
        indices.push(idx);
    }

    let mut projected = Table::new(indices.iter().map(|&i| table.columns[i].clone()).collect());
    projected.rows = table
        .rows
        .iter()
        .map(|row| {
            Row::new(
                indices.iter().map(|&i| row.cells[i].clone()).collect(),
                row.source_line,
            )
        })
        .collect();

    Ok(projected)
}
