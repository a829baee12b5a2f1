//! Markdown pipe-table output

use crate::error::Result;
use crate::model::Table;

use super::Serializer;

/// Pipe table with cells padded to the column width
pub struct MarkdownOutput;

impl Serializer for MarkdownOutput {
    fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        let header: Vec<String> = table.columns.iter().map(|c| escape_cell(&c.name)).collect();
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| escape_cell(&c.display())).collect())
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count().max(3)).collect();
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &header, &widths);
        let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &separator, &widths);
        for row in &rows {
            push_line(&mut out, row, &widths);
        }

        Ok(out.into_bytes())
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_layout() {
        let mut t = Table::with_header(["item", "qty"]).unwrap();
        t.add_row(vec!["bolt".into(), CellValue::Int(12)], 2);
        t.add_row(vec!["nut".into(), CellValue::Null], 3);

        let out = String::from_utf8(MarkdownOutput.serialize(&t).unwrap()).unwrap();
        assert_eq!(
            out,
            "| item | qty |\n| ---- | --- |\n| bolt | 12  |\n| nut  |     |\n"
        );
    }

    #[test]
    fn test_escapes_pipes_and_newlines() {
        let mut t = Table::with_header(["a"]).unwrap();
        t.add_row(vec!["x|y\nz".into()], 2);

        let out = String::from_utf8(MarkdownOutput.serialize(&t).unwrap()).unwrap();
        assert!(out.contains(r"x\|y<br>z"));
    }
}
