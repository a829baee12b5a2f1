//! CSV output

use crate::error::{Result, SweepError};
use crate::format::Format;
use crate::model::Table;

use super::Serializer;

/// Comma-delimited output with a header row. Fields are quoted only when needed.
pub struct CsvOutput;

impl Serializer for CsvOutput {
    fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        let err = |e: csv::Error| SweepError::serialize(Format::Csv, e);

        let mut writer = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());

        writer.write_record(table.columns.iter().map(|c| c.name.as_str())).map_err(err)?;
        for row in &table.rows {
            writer
                .write_record(row.cells.iter().map(|c| c.display().into_owned()))
                .map_err(err)?;
        }

        writer
            .into_inner()
            .map_err(|e| SweepError::serialize(Format::Csv, e.error()))
    }
}
