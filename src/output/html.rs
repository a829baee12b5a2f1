//! HTML table output

use std::io::Write;

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::Table;

use super::Serializer;

/// A single `<table>` with a header row and no index column
pub struct HtmlOutput;

impl Serializer for HtmlOutput {
    fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        write_table(table, &mut buffer).map_err(|e| SweepError::serialize(Format::Html, e))?;
        Ok(buffer)
    }
}

fn write_table(table: &Table, writer: &mut dyn Write) -> std::io::Result<()> {
    writeln!(writer, "<table>")?;

    // Header
    writeln!(writer, "  <thead>")?;
    writeln!(writer, "    <tr>")?;
    for col in &table.columns {
        writeln!(writer, "      <th>{}</th>", html_escape(&col.name))?;
    }
    writeln!(writer, "    </tr>")?;
    writeln!(writer, "  </thead>")?;

    // Rows
    writeln!(writer, "  <tbody>")?;
    for row in &table.rows {
        writeln!(writer, "    <tr>")?;
        for cell in &row.cells {
            writeln!(writer, "      <td>{}</td>", html_escape(cell.display()))?;
        }
        writeln!(writer, "    </tr>")?;
    }
    writeln!(writer, "  </tbody>")?;

    writeln!(writer, "</table>")?;
    Ok(())
}

fn html_escape(s: impl AsRef<str>) -> String {
    s.as_ref()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_structure() {
        let mut t = Table::with_header(["a", "b"]).unwrap();
        t.add_row(vec![CellValue::Int(1), CellValue::Null], 2);

        let out = String::from_utf8(HtmlOutput.serialize(&t).unwrap()).unwrap();
        assert_eq!(out.matches("<table>").count(), 1);
        assert!(out.contains("<th>a</th>"));
        assert!(out.contains("<td>1</td>"));
        assert!(out.contains("<td></td>"));
        assert!(!out.contains("None"));
    }

    #[test]
    fn test_escapes_text() {
        let mut t = Table::with_header(["<b>"]).unwrap();
        t.add_row(vec!["Tom & Jerry".into()], 2);

        let out = String::from_utf8(HtmlOutput.serialize(&t).unwrap()).unwrap();
        assert!(out.contains("<th>&lt;b&gt;</th>"));
        assert!(out.contains("<td>Tom &amp; Jerry</td>"));
    }
}
