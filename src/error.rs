//! Error types for loading, cleaning and converting tables

use thiserror::Error;

use crate::format::Format;

/// Failure of a single pipeline step
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("failed to parse {format} input: {message}")]
    Parse { format: Format, message: String },

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("column selection is empty")]
    EmptySelection,

    #[error("failed to write {format} output: {message}")]
    Serialize { format: Format, message: String },
}

impl SweepError {
    pub fn parse(format: Format, message: impl ToString) -> Self {
        SweepError::Parse {
            format,
            message: message.to_string(),
        }
    }

    pub fn serialize(format: Format, message: impl ToString) -> Self {
        SweepError::Serialize {
            format,
            message: message.to_string(),
        }
    }
}

/// A [`SweepError`] tagged with the file that produced it
#[derive(Debug, Error)]
#[error("{file_name}: {error}")]
pub struct FileError {
    pub file_name: String,
    pub error: SweepError,
}

impl FileError {
    pub fn new(file_name: impl Into<String>, error: SweepError) -> Self {
        Self {
            file_name: file_name.into(),
            error,
        }
    }
}

pub type Result<T, E = SweepError> = std::result::Result<T, E>;
