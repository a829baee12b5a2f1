//! Parser layer for reading tabular data from raw bytes

mod csv;
mod excel;
mod html;
mod markdown;

use std::borrow::Cow;

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::{CellValue, Table};

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;
pub use self::html::HtmlParser;
pub use self::markdown::MarkdownParser;

/// Trait for parsing tabular data
pub trait Parser: Send + Sync {
    /// Parse raw file content into a Table
    fn parse(&self, bytes: &[u8]) -> Result<Table>;

    /// The format this parser reads
    fn format(&self) -> Format;
}

/// Factory for looking up the parser of a format
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser),
                Box::new(ExcelParser),
                Box::new(HtmlParser),
                Box::new(MarkdownParser),
            ],
        }
    }

    /// Get the parser for a format
    pub fn get_parser(&self, format: Format) -> Result<&dyn Parser> {
        self.parsers
            .iter()
            .find(|p| p.format() == format)
            .map(|p| p.as_ref())
            .ok_or_else(|| SweepError::UnsupportedFormat {
                extension: format.extension().to_string(),
            })
    }

    /// Parse bytes using the parser for `format`
    pub fn parse(&self, bytes: &[u8], format: Format) -> Result<Table> {
        let mut table = self.get_parser(format)?.parse(bytes)?;
        table.infer_column_types();
        Ok(table)
    }
}

/// Build a table from a header and rows of raw text fields.
///
/// Short rows are padded with absent cells; long rows are rejected.
pub(crate) fn table_from_text<I>(format: Format, header: Vec<String>, rows: I) -> Result<Table>
where
    I: IntoIterator<Item = (usize, Vec<String>)>,
{
    let mut table = Table::with_header(header)?;
    let width = table.column_count();

    for (line, fields) in rows {
        let cells = fields.iter().map(|s| parse_cell_value(s)).collect();
        table.add_row(fit_row(cells, width, format, line)?, line);
    }

    Ok(table)
}

/// Pad `cells` to `width` with absent values, failing if it is wider
pub(crate) fn fit_row(
    mut cells: Vec<CellValue>,
    width: usize,
    format: Format,
    line: usize,
) -> Result<Vec<CellValue>> {
    if cells.len() > width {
        return Err(SweepError::parse(
            format,
            format!("row {} has {} fields, expected {}", line, cells.len(), width),
        ));
    }
    cells.resize(width, CellValue::Null);
    Ok(cells)
}

/// Parse a string value into a CellValue with type inference
pub(crate) fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed == "NA"
        || trimmed == "N/A"
    {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // Datetime (ISO 8601 or space-separated, optional fractional seconds)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return CellValue::DateTime(dt);
    }

    CellValue::String(Cow::Owned(trimmed.to_string()))
}
