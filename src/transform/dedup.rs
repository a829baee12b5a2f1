//! Duplicate row removal

use rustc_hash::FxHashSet;

use crate::model::{CellValue, Table};

/// Remove rows that repeat an earlier row across all columns.
///
/// The first occurrence of each row is kept and survivors keep their
/// relative order. Returns the number of rows removed.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let before = table.rows.len();

    let rows = std::mem::take(&mut table.rows);
    let mut seen: FxHashSet<Vec<CellValue>> = FxHashSet::default();
    table.rows = rows
        .into_iter()
        .filter(|row| seen.insert(row.cells.clone()))
        .collect();

    before - table.rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[CellValue]]) -> Table {
        let mut table = Table::with_header(["a", "b"]).unwrap();
        for (i, cells) in rows.iter().enumerate() {
            table.add_row(cells.to_vec(), i + 2);
        }
        table
    }

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let mut t = table(&[
            &[CellValue::Int(1), CellValue::from("x")],
            &[CellValue::Int(2), CellValue::from("y")],
            &[CellValue::Int(1), CellValue::from("x")],
            &[CellValue::Int(3), CellValue::Null],
            &[CellValue::Int(3), CellValue::Null],
        ]);

        assert_eq!(remove_duplicates(&mut t), 2);
        let lines: Vec<_> = t.rows.iter().map(|r| r.source_line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
    }

    #[test]
    fn test_idempotent() {
        let mut t = table(&[
            &[CellValue::Int(1), CellValue::Float(1.5)],
            &[CellValue::Int(1), CellValue::Float(1.5)],
        ]);
        assert_eq!(remove_duplicates(&mut t), 1);
        let once = t.clone();
        assert_eq!(remove_duplicates(&mut t), 0);
        assert_eq!(t, once);
    }

    #[test]
    fn test_partial_match_is_not_duplicate() {
        let mut t = table(&[
            &[CellValue::Int(1), CellValue::Null],
            &[CellValue::Int(1), CellValue::Int(3)],
            &[CellValue::Null, CellValue::Int(4)],
        ]);
        assert_eq!(remove_duplicates(&mut t), 0);
        assert_eq!(t.row_count(), 3);
    }

    #[test]
    fn test_int_and_float_of_same_value_match() {
        let mut t = table(&[
            &[CellValue::Int(2), CellValue::Null],
            &[CellValue::Float(2.0), CellValue::Null],
        ]);
        assert_eq!(remove_duplicates(&mut t), 1);
    }
}
