//! HTML table parser

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::Table;

use super::{table_from_text, Parser};

/// Parser for the first `<table>` element of an HTML document.
///
/// The first row of the table (usually the `<thead>` row) is the header.
/// Rows of nested tables are not part of the outer table.
pub struct HtmlParser;

impl Parser for HtmlParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let text = std::str::from_utf8(bytes).map_err(|e| SweepError::parse(Format::Html, e))?;
        let document = Html::parse_document(text);

        let table_selector =
            Selector::parse("table").map_err(|e| SweepError::parse(Format::Html, format!("{:?}", e)))?;
        let table = document
            .select(&table_selector)
            .next()
            .ok_or_else(|| SweepError::parse(Format::Html, "no <table> element found"))?;

        let mut rows = table_rows(table)
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (idx + 1, row_fields(row)));

        let (_, header) = rows
            .next()
            .ok_or_else(|| SweepError::parse(Format::Html, "<table> has no rows"))?;

        table_from_text(Format::Html, header, rows)
    }

    fn format(&self) -> Format {
        Format::Html
    }
}

/// `<tr>` elements that belong directly to `table`
fn table_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| el.value().name() == "tr")
        .filter(|row| {
            row.ancestors()
                .filter_map(ElementRef::wrap)
                .find(|el| el.value().name() == "table")
                .map(|owner| owner.id() == table.id())
                .unwrap_or(false)
        })
        .collect()
}

fn row_fields(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
        .map(|cell| {
            let text: String = cell.text().collect();
            text.split_whitespace().collect::<Vec<_>>().join(" ")
        })
        .collect()
}
