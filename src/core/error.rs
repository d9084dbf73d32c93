use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting a workbook into JPK documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JpkError {
    /// The input workbook path does not exist.
    #[error("input file does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The workbook could not be opened or one of its sheets could not be read.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// No header matched the logical field's search pattern.
    #[error("no column matching '{pattern}'")]
    ColumnNotFound {
        /// The search pattern that failed to resolve.
        pattern: String,
    },

    /// A date cell could not be parsed with day-first interpretation.
    #[error("row {row}: cannot parse {field} '{value}' as a date")]
    InvalidDate {
        /// Logical field name (e.g. "Document Date").
        field: &'static str,
        /// Spreadsheet row number (the header is row 1).
        row: usize,
        /// Raw cell text.
        value: String,
    },

    /// An identity cell (counterparty id, document number) has no text form.
    #[error("row {row}: {field} has no usable value ({value})")]
    InvalidCell {
        /// Logical field name (e.g. "VAT Registration").
        field: &'static str,
        /// Spreadsheet row number (the header is row 1).
        row: usize,
        /// Raw cell text.
        value: String,
    },

    /// The purchase tax total does not fit in a decimal amount.
    #[error("row {row}: VAT Amount total overflows")]
    AmountOverflow {
        /// Spreadsheet row whose amount overflowed the running total.
        row: usize,
    },

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),

    /// Filesystem error while writing a document.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl JpkError {
    /// Build a [`JpkError::Io`] for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
