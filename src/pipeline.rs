//! Per-file conversion pipeline: detect, load, clean, project, serialize

use tracing::{debug, info_span, warn};

use crate::config::ConvertOptions;
use crate::error::{FileError, Result};
use crate::format::Format;
use crate::model::Table;
use crate::output::{render, RenderedOutput};
use crate::parser::ParserFactory;
use crate::transform::{
    fill_missing_numeric, fill_missing_numeric_in, project_columns, remove_duplicates,
    CleaningReport,
};

/// An uploaded file: its declared name and raw content
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Successful conversion of one file
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Name of the input file
    pub file_name: String,
    /// Format detected from the input name
    pub source_format: Format,
    /// The table after cleaning and projection
    pub table: Table,
    pub report: CleaningReport,
    pub output: RenderedOutput,
    /// Input base name with the target format's extension
    pub output_file_name: String,
}

/// Convert one file. Any failing step aborts this file only; the error
/// carries the file name.
pub fn process(bytes: &[u8], file_name: &str, options: &ConvertOptions) -> Result<Conversion, FileError> {
    let span = info_span!("process", file = %file_name);
    let _guard = span.enter();

    run_steps(bytes, file_name, options).map_err(|e| {
        warn!(error = %e, "conversion failed");
        FileError::new(file_name, e)
    })
}

/// Convert each file independently, in order. A failure in one file does
/// not affect the others; one outcome is returned per input.
pub fn process_batch<'a, I>(files: I, options: &ConvertOptions) -> Vec<Result<Conversion, FileError>>
where
    I: IntoIterator<Item = &'a InputFile>,
{
    files
        .into_iter()
        .map(|file| process(&file.bytes, &file.name, options))
        .collect()
}

fn run_steps(bytes: &[u8], file_name: &str, options: &ConvertOptions) -> Result<Conversion> {
    let source_format = Format::detect(file_name)?;
    debug!(format = %source_format, size = bytes.len(), "detected format");

    let mut table = ParserFactory::new().parse(bytes, source_format)?;
    debug!(rows = table.row_count(), columns = table.column_count(), "loaded table");

    let mut report = CleaningReport::default();

    if options.remove_duplicates {
        report.duplicates_removed = remove_duplicates(&mut table);
        debug!(removed = report.duplicates_removed, "removed duplicate rows");
    }

    if options.fill_missing {
        let outcome = match &options.fill_columns {
            Some(columns) => fill_missing_numeric_in(&mut table, columns)?,
            None => fill_missing_numeric(&mut table),
        };
        report.record_fill(outcome);
        debug!(
            filled = report.cells_filled(),
            undefined = report.mean_undefined.len(),
            "filled missing numeric cells"
        );
    }

    if let Some(keep) = &options.keep_columns {
        table = project_columns(&table, keep)?;
        debug!(columns = table.column_count(), "projected columns");
    }

    let output = render(&table, options.target_format)?;
    debug!(format = %output.format, bytes = output.bytes.len(), "serialized table");

    Ok(Conversion {
        file_name: file_name.to_string(),
        source_format,
        output_file_name: options.target_format.output_file_name(file_name),
        table,
        report,
        output,
    })
}
