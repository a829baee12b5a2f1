//! Serializer layer for writing tables in each output format

mod csv;
mod excel;
mod html;
mod markdown;
mod preview;

use crate::error::Result;
use crate::format::Format;
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use self::excel::ExcelOutput;
pub use self::html::HtmlOutput;
pub use self::markdown::MarkdownOutput;
pub use self::preview::render_preview;

/// Trait for table serializers
pub trait Serializer {
    /// Render the whole table to bytes
    fn serialize(&self, table: &Table) -> Result<Vec<u8>>;
}

/// Serialized table ready to be saved or downloaded
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub format: Format,
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    /// Canonical extension, without the dot
    pub extension: &'static str,
}

/// Factory for creating serializers
pub struct OutputFactory;

impl OutputFactory {
    /// Create a serializer for the given format
    pub fn create(format: Format) -> Box<dyn Serializer> {
        match format {
            Format::Csv => Box::new(CsvOutput),
            Format::Xlsx => Box::new(ExcelOutput::new()),
            Format::Html => Box::new(HtmlOutput),
            Format::Markdown => Box::new(MarkdownOutput),
        }
    }
}

/// Serialize `table` as `format`
pub fn render(table: &Table, format: Format) -> Result<RenderedOutput> {
    let bytes = OutputFactory::create(format).serialize(table)?;
    Ok(RenderedOutput {
        format,
        bytes,
        mime_type: format.mime_type(),
        extension: format.extension(),
    })
}
