//! CSV parser

use tracing::trace;

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::Table;

use super::{table_from_text, Parser};

/// Parser for comma-delimited UTF-8 files with a header row
pub struct CsvParser;

impl Parser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        check_quoting(bytes)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers = csv_reader
            .headers()
            .map_err(|e| SweepError::parse(Format::Csv, e))?
            .clone();

        if headers.is_empty() {
            return Err(SweepError::parse(Format::Csv, "missing header row"));
        }

        let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| SweepError::parse(Format::Csv, e))?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            rows.push((line, record.iter().map(str::to_string).collect()));
        }
        trace!(rows = rows.len(), "read csv records");

        table_from_text(Format::Csv, headers.iter().map(str::to_string).collect(), rows)
    }

    fn format(&self) -> Format {
        Format::Csv
    }
}

/// Reject quoting the csv reader would otherwise accept silently: an
/// unterminated quoted field swallows the rest of the file, and a quote
/// inside an unquoted field is kept as literal text.
fn check_quoting(bytes: &[u8]) -> Result<()> {
    let mut line = 1;
    let mut at_field_start = true;
    let mut iter = bytes.iter().copied().peekable();

    while let Some(b) = iter.next() {
        match b {
            b'"' if at_field_start => {
                let opened_on = line;
                loop {
                    match iter.next() {
                        None => {
                            return Err(SweepError::parse(
                                Format::Csv,
                                format!("unterminated quoted field starting on line {}", opened_on),
                            ));
                        }
                        Some(b'"') if iter.peek() == Some(&b'"') => {
                            iter.next();
                        }
                        Some(b'"') => break,
                        Some(b'\n') => line += 1,
                        Some(_) => {}
                    }
                }
                match iter.peek() {
                    None | Some(b',') | Some(b'\n') | Some(b'\r') => {}
                    Some(_) => {
                        return Err(SweepError::parse(
                            Format::Csv,
                            format!("unexpected character after closing quote on line {}", line),
                        ));
                    }
                }
                at_field_start = false;
            }
            b'"' => {
                return Err(SweepError::parse(
                    Format::Csv,
                    format!("quote inside unquoted field on line {}", line),
                ));
            }
            b',' => at_field_start = true,
            b'\n' => {
                line += 1;
                at_field_start = true;
            }
            _ => at_field_start = false,
        }
    }

    Ok(())
}
