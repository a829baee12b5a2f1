//! Markdown pipe-table parser

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::Table;

use super::{table_from_text, Parser};

/// Parser for the first pipe table in a Markdown document.
///
/// The table must start with a header row followed by a separator row of
/// dashes (optionally with `:` alignment markers). It ends at the first
/// line that is blank or contains no `|`.
pub struct MarkdownParser;

impl Parser for MarkdownParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let text =
            std::str::from_utf8(bytes).map_err(|e| SweepError::parse(Format::Markdown, e))?;

        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .skip_while(|(_, line)| !line.contains('|'));

        let (_, header_line) = lines
            .next()
            .ok_or_else(|| SweepError::parse(Format::Markdown, "no pipe table found"))?;
        let header = split_row(header_line);

        let separator_ok = lines
            .next()
            .map(|(_, line)| is_separator(line, header.len()))
            .unwrap_or(false);
        if !separator_ok {
            return Err(SweepError::parse(
                Format::Markdown,
                "missing or malformed separator row after header",
            ));
        }

        let rows = lines
            .take_while(|(_, line)| !line.trim().is_empty() && line.contains('|'))
            .map(|(line_num, line)| (line_num, split_row(line)));

        table_from_text(Format::Markdown, header, rows)
    }

    fn format(&self) -> Format {
        Format::Markdown
    }
}

/// Split a pipe-delimited row into trimmed, unescaped cells.
///
/// `<br>` is read back as a newline, since that is how `MarkdownOutput`
/// writes one and how pipe tables render it. Other spellings such as
/// `<br/>` are kept as text.
fn split_row(line: &str) -> Vec<String> {
    let mut trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('|') {
        trimmed = rest;
    }
    if trimmed.ends_with('|') && !trimmed.ends_with("\\|") {
        trimmed = &trimmed[..trimmed.len() - 1];
    }

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = trimmed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    cells.push(current);

    cells
        .into_iter()
        .map(|cell| cell.trim().replace("<br>", "\n"))
        .collect()
}

/// A separator row has one `:?-+:?` cell per header column
fn is_separator(line: &str, width: usize) -> bool {
    let cells = split_row(line);
    cells.len() == width
        && cells.iter().all(|cell| {
            let dashes = cell.trim_start_matches(':').trim_end_matches(':');
            !dashes.is_empty() && dashes.chars().all(|c| c == '-')
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_row("a|b"), vec!["a", "b"]);
        assert_eq!(split_row("| 1 |  |"), vec!["1", ""]);
        assert_eq!(split_row(r"| x \| y | z |"), vec!["x | y", "z"]);
    }

    #[test]
    fn test_line_break_tag() {
        assert_eq!(split_row("| one<br>two | x |"), vec!["one\ntwo", "x"]);
        assert_eq!(split_row("| one<br/>two |"), vec!["one<br/>two"]);
    }

    #[test]
    fn test_separator() {
        assert!(is_separator("|---|:--:|", 2));
        assert!(is_separator("| ---: | - |", 2));
        assert!(!is_separator("|---|", 2));
        assert!(!is_separator("| a | b |", 2));
        assert!(!is_separator("| | --- |", 2));
    }

    #[test]
    fn test_parse_table_after_prose() {
        let md = b"# Inventory\n\nSome text.\n\n| item | qty |\n|------|----:|\n| bolt | 4 |\n| nut |  |\n\nTrailing prose\n";
        let table = MarkdownParser.parse(md).unwrap();
        assert_eq!(table.column_names(), vec!["item", "qty"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows[0].cells, vec![CellValue::from("bolt"), CellValue::Int(4)]);
        assert_eq!(table.rows[1].cells[1], CellValue::Null);
        assert_eq!(table.rows[0].source_line, 7);
    }

    #[test]
    fn test_missing_separator() {
        let err = MarkdownParser.parse(b"| a | b |\n| 1 | 2 |\n").unwrap_err();
        assert!(matches!(err, SweepError::Parse { format: Format::Markdown, .. }));

        let err = MarkdownParser.parse(b"| a | b |\n").unwrap_err();
        assert!(matches!(err, SweepError::Parse { .. }));
    }

    #[test]
    fn test_no_table() {
        assert!(MarkdownParser.parse(b"just some words\n").is_err());
    }
}
