//! Configuration handling for datasweep

use crate::format::Format;

/// Options for converting a single file
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Drop rows that repeat an earlier row across all columns
    pub remove_duplicates: bool,
    /// Replace absent cells in numeric columns with the column mean
    pub fill_missing: bool,
    /// Limit filling to these columns (`None` fills every numeric column)
    pub fill_columns: Option<Vec<String>>,
    /// Columns to keep, in output order (`None` keeps all)
    pub keep_columns: Option<Vec<String>>,
    /// Output format
    pub target_format: Format,
}

impl ConvertOptions {
    /// Create options targeting the given format with no cleaning
    pub fn new(target_format: Format) -> Self {
        Self {
            target_format,
            ..Default::default()
        }
    }

    /// Enable duplicate row removal
    pub fn with_remove_duplicates(mut self, enabled: bool) -> Self {
        self.remove_duplicates = enabled;
        self
    }

    /// Enable mean imputation of numeric columns
    pub fn with_fill_missing(mut self, enabled: bool) -> Self {
        self.fill_missing = enabled;
        self
    }

    /// Limit mean imputation to the named columns
    pub fn with_fill_columns(mut self, columns: Vec<String>) -> Self {
        self.fill_columns = Some(columns);
        self
    }

    /// Restrict output to these columns
    pub fn with_keep_columns(mut self, columns: Vec<String>) -> Self {
        self.keep_columns = Some(columns);
        self
    }

    /// Set output format
    pub fn with_target_format(mut self, format: Format) -> Self {
        self.target_format = format;
        self
    }
}
