//! Mean imputation for numeric columns

use indexmap::IndexMap;

use crate::error::{Result, SweepError};
use crate::model::{CellValue, Table};

/// Result of [`fill_missing_numeric`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FillOutcome {
    /// Cells filled per column; columns with nothing to fill are omitted
    pub filled: IndexMap<String, usize>,
    /// Numeric columns with no present values, where the mean is undefined
    pub mean_undefined: Vec<String>,
}

/// Replace absent cells of every numeric column with that column's mean.
///
/// The mean is taken over the present values as the table stands now.
/// Columns with no present values are left as they are and reported in
/// [`FillOutcome::mean_undefined`].
pub fn fill_missing_numeric(table: &mut Table) -> FillOutcome {
    let indices: Vec<usize> = (0..table.column_count()).collect();
    fill_indices(table, &indices)
}

/// Like [`fill_missing_numeric`], restricted to the named columns.
///
/// Named columns that are not numeric are skipped.
pub fn fill_missing_numeric_in(table: &mut Table, columns: &[String]) -> Result<FillOutcome> {
    let indices = columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| SweepError::UnknownColumn(name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(fill_indices(table, &indices))
}

fn fill_indices(table: &mut Table, indices: &[usize]) -> FillOutcome {
    let mut outcome = FillOutcome::default();

    for &col_idx in indices {
        if !table.is_numeric_column(col_idx) {
            continue;
        }

        let missing = table.column_cells(col_idx).filter(|c| c.is_null()).count();
        let Some(fill_value) = column_mean(table, col_idx) else {
            outcome.mean_undefined.push(table.columns[col_idx].name.clone());
            continue;
        };
        if missing == 0 {
            continue;
        }

        for row in &mut table.rows {
            if row.cells[col_idx].is_null() {
                row.cells[col_idx] = fill_value.clone();
            }
        }
        outcome
            .filled
            .insert(table.columns[col_idx].name.clone(), missing);
    }

    if !outcome.filled.is_empty() {
        table.infer_column_types();
    }
    outcome
}

/// Mean of the present values of a numeric column, as a cell.
///
/// An all-integer column with an integral mean yields an integer.
fn column_mean(table: &Table, col_idx: usize) -> Option<CellValue> {
    let mut sum = 0.0;
    let mut count = 0usize;
    let mut all_int = true;

    for cell in table.column_cells(col_idx) {
        if let Some(v) = cell.as_f64() {
            sum += v;
            count += 1;
            all_int &= matches!(cell, CellValue::Int(_));
        }
    }

    if count == 0 {
        return None;
    }

    let mean = sum / count as f64;
    if all_int && mean.fract() == 0.0 && mean.abs() < i64::MAX as f64 {
        Some(CellValue::Int(mean as i64))
    } else {
        Some(CellValue::Float(mean))
    }
}
