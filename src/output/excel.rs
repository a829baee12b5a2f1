//! Excel workbook output (xlsx)

use rust_xlsxwriter::{Format as CellFormat, Workbook, Worksheet, XlsxError};

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::{CellValue, Table};

use super::Serializer;

/// Single-worksheet workbook: bold header row followed by the data rows.
///
/// Absent cells are left blank.
pub struct ExcelOutput {
    sheet_name: String,
}

impl ExcelOutput {
    pub fn new() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
        }
    }

    fn build(&self, table: &Table) -> std::result::Result<Vec<u8>, XlsxError> {
        let header_format = CellFormat::new().set_bold();
        let date_format = CellFormat::new().set_num_format("yyyy-mm-dd");
        let datetime_format = CellFormat::new().set_num_format("yyyy-mm-dd hh:mm:ss");

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col_idx, column) in table.columns.iter().enumerate() {
            worksheet.write_string_with_format(0, col_num(col_idx)?, &column.name, &header_format)?;
        }

        for (row_idx, row) in table.rows.iter().enumerate() {
            let row_num = u32::try_from(row_idx + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            for (col_idx, cell) in row.cells.iter().enumerate() {
                write_cell(
                    worksheet,
                    row_num,
                    col_num(col_idx)?,
                    cell,
                    &date_format,
                    &datetime_format,
                )?;
            }
        }

        workbook.save_to_buffer()
    }
}

impl Default for ExcelOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for ExcelOutput {
    fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        self.build(table)
            .map_err(|e| SweepError::serialize(Format::Xlsx, e))
    }
}

fn col_num(idx: usize) -> std::result::Result<u16, XlsxError> {
    u16::try_from(idx).map_err(|_| XlsxError::RowColumnLimitError)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    date_format: &CellFormat,
    datetime_format: &CellFormat,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::Null => {}
        CellValue::Bool(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
        CellValue::Int(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        // Excel has no representation for NaN or infinities
        CellValue::Float(f) if !f.is_finite() => {
            worksheet.write_string(row, col, f.to_string())?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::String(s) => {
            worksheet.write_string(row, col, s.as_ref())?;
        }
        CellValue::Date(d) => {
            worksheet.write_datetime_with_format(row, col, d, date_format)?;
        }
        CellValue::DateTime(dt) => {
            worksheet.write_datetime_with_format(row, col, dt, datetime_format)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ExcelParser, Parser};

    #[test]
    fn test_workbook_reads_back() {
        let mut t = Table::with_header(["name", "qty", "price", "when"]).unwrap();
        t.add_row(
            vec![
                "bolt".into(),
                CellValue::Int(4),
                CellValue::Float(0.25),
                CellValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()),
            ],
            2,
        );
        t.add_row(vec!["nut".into(), CellValue::Null, CellValue::Float(0.1), CellValue::Null], 3);

        let bytes = ExcelOutput::new().serialize(&t).unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let back = ExcelParser.parse(&bytes).unwrap();
        assert_eq!(back.column_names(), vec!["name", "qty", "price", "when"]);
        assert_eq!(back.rows[0].cells[1], CellValue::Int(4));
        assert_eq!(back.rows[0].cells[2], CellValue::Float(0.25));
        assert_eq!(
            back.rows[0].cells[3],
            CellValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(back.rows[1].cells[1], CellValue::Null);
    }
}
