//! Terminal grid rendering for previews

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

/// Render a table as a bordered terminal grid
pub fn render_preview(table: &Table) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().map(|c| c.name.clone()));
    for row in &table.rows {
        builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
    }

    let mut grid = builder.build();
    grid.with(Style::rounded());
    grid.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_preview_contains_cells() {
        let mut t = Table::with_header(["city", "pop"]).unwrap();
        t.add_row(vec!["Oslo".into(), CellValue::Int(709000)], 2);

        let out = render_preview(&t);
        assert!(out.contains("city"));
        assert!(out.contains("Oslo"));
        assert!(out.contains("709000"));
    }
}
