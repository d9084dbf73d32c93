//! The per-worksheet pipeline: normalize, resolve, filter, generate.
//!
//! Pure apart from the clock value carried in [`DocumentContext`]; writing the
//! result is left to the caller.

use std::fmt;

use tracing::debug;

use crate::core::{
    JpkError, LogicalField, Worksheet, filter_purchases, normalize_headers, resolve_columns,
};
use crate::jpk::{DocumentContext, JpkConfig, to_jpk_xml};

/// Why a worksheet produced no document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A required logical field matched no header.
    MissingColumn {
        /// The search pattern that failed.
        pattern: String,
    },
    /// No row is tagged as a purchase.
    NoPurchaseRows,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingColumn { pattern } => {
                write!(f, "no column matching '{pattern}'")
            }
            SkipReason::NoPurchaseRows => f.write_str("no rows of type 'Purchase'"),
        }
    }
}

/// Result of converting one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// A complete document.
    Document {
        /// Rendered XML.
        xml: String,
        /// Number of purchase rows in it.
        rows: usize,
    },
    /// The worksheet was skipped.
    Skipped(SkipReason),
}

/// Convert one worksheet into a JPK document, or explain why it is skipped.
///
/// Errors are generation failures (unparseable dates, empty identity cells)
/// and concern this worksheet only.
pub fn convert_worksheet(
    sheet: &Worksheet,
    config: &JpkConfig,
    context: &DocumentContext,
) -> Result<Conversion, JpkError> {
    let headers = normalize_headers(&sheet.headers);

    let columns = match resolve_columns(&headers) {
        Ok(columns) => columns,
        Err(JpkError::ColumnNotFound { pattern }) => {
            return Ok(Conversion::Skipped(SkipReason::MissingColumn { pattern }));
        }
        Err(e) => return Err(e),
    };
    for field in LogicalField::ALL {
        debug!(sheet = %sheet.name, %field, column = %columns.get(field).header, "resolved column");
    }

    let records = filter_purchases(&sheet.rows, &columns);
    if records.is_empty() {
        return Ok(Conversion::Skipped(SkipReason::NoPurchaseRows));
    }

    let xml = to_jpk_xml(&records, config, context)?;
    Ok(Conversion::Document {
        xml,
        rows: records.len(),
    })
}
