//! Supported tabular formats and extension-based detection

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SweepError};

/// A tabular file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Csv,
    Xlsx,
    Html,
    Markdown,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Csv, Format::Xlsx, Format::Html, Format::Markdown];

    /// Detect the format of a file from its (case-insensitive) extension.
    ///
    /// Only the name is inspected; the content is never sniffed.
    pub fn detect(file_name: &str) -> Result<Format> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(Format::Csv),
            "xlsx" => Ok(Format::Xlsx),
            "html" | "htm" => Ok(Format::Html),
            "md" => Ok(Format::Markdown),
            _ => Err(SweepError::UnsupportedFormat { extension: ext }),
        }
    }

    /// Canonical file extension, without the dot
    pub fn extension(self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Xlsx => "xlsx",
            Format::Html => "html",
            Format::Markdown => "md",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Format::Csv => "text/csv",
            Format::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Format::Html => "text/html",
            Format::Markdown => "text/markdown",
        }
    }

    /// Replace the extension of `file_name` with this format's extension
    pub fn output_file_name(self, file_name: &str) -> String {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Csv => write!(f, "CSV"),
            Format::Xlsx => write!(f, "Excel"),
            Format::Html => write!(f, "HTML"),
            Format::Markdown => write!(f, "Markdown"),
        }
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "excel" | "xlsx" => Ok(Format::Xlsx),
            "html" | "htm" => Ok(Format::Html),
            "markdown" | "md" => Ok(Format::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}
