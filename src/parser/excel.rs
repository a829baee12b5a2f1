//! Excel workbook parser (xlsx)

use std::borrow::Cow;
use std::io::Cursor;

use calamine::{Data, ExcelDateTime, Range, Reader, Xlsx};
use chrono::Timelike;

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::{exact_i64, CellValue, Table};

use super::{fit_row, Parser};

/// Parser for Excel workbooks. Only the first worksheet is read.
pub struct ExcelParser;

impl Parser for ExcelParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(bytes)).map_err(|e| SweepError::parse(Format::Xlsx, e))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SweepError::parse(Format::Xlsx, "workbook has no worksheets"))?
            .map_err(|e| SweepError::parse(Format::Xlsx, e))?;

        parse_range(&range)
    }

    fn format(&self) -> Format {
        Format::Xlsx
    }
}

fn parse_range(range: &Range<Data>) -> Result<Table> {
    let mut rows = range.rows();

    // First row is header
    let header_row = rows
        .next()
        .ok_or_else(|| SweepError::parse(Format::Xlsx, "worksheet is empty"))?;
    let mut table = Table::with_header(header_row.iter().map(cell_to_string))?;
    let width = table.column_count();

    for (idx, row) in rows.enumerate() {
        let line = idx + 2; // +2 for 1-indexing and header
        let cells = row.iter().map(convert_cell).collect();
        table.add_row(fit_row(cells, width, Format::Xlsx, line)?, line);
    }

    Ok(table)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => convert_cell(other).display().into_owned(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Null
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        // Excel stores every number as a float
        Data::Float(f) => match exact_i64(*f) {
            Some(i) => CellValue::Int(i),
            None => CellValue::Float(*f),
        },
        Data::Int(i) => CellValue::Int(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => convert_datetime(dt),
        Data::DateTimeIso(s) => {
            if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
                CellValue::DateTime(dt)
            } else if let Ok(d) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                CellValue::Date(d)
            } else {
                CellValue::String(Cow::Owned(s.clone()))
            }
        }
        Data::DurationIso(s) => CellValue::String(Cow::Owned(s.clone())),
        Data::Error(e) => CellValue::String(Cow::Owned(format!("#{:?}", e))),
    }
}

fn convert_datetime(dt: &ExcelDateTime) -> CellValue {
    if dt.is_duration() {
        return CellValue::Float(dt.as_f64());
    }
    match dt.as_datetime() {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 && datetime.nanosecond() == 0 => {
            CellValue::Date(datetime.date())
        }
        Some(datetime) => CellValue::DateTime(datetime),
        None => CellValue::Float(dt.as_f64()),
    }
}
