//! Workbook-level orchestration: one JPK file per qualifying worksheet.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use jpk_vat::jpk::JpkConfig;
//! use jpk_vat::workbook::{SheetOutcome, process_workbook};
//!
//! let reports = process_workbook(Path::new("zakupy.xlsx"), &JpkConfig::default()).unwrap();
//! for report in &reports {
//!     if let SheetOutcome::Written { path, rows } = &report.outcome {
//!         println!("{}: {rows} rows -> {}", report.sheet, path.display());
//!     }
//! }
//! ```

mod reader;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

pub use reader::read_workbook;

use crate::convert::{Conversion, SkipReason, convert_worksheet};
use crate::core::{JpkError, Worksheet, sanitize_filename};
use crate::jpk::{DocumentContext, JpkConfig, write_jpk_file};

/// What happened to one worksheet.
#[derive(Debug)]
pub enum SheetOutcome {
    /// A document was written.
    Written {
        /// Output file.
        path: PathBuf,
        /// Purchase rows in the document.
        rows: usize,
    },
    /// No document, by design.
    Skipped(SkipReason),
    /// Generation or writing failed; no file was produced.
    Failed(JpkError),
}

/// Outcome for a named worksheet.
#[derive(Debug)]
pub struct SheetReport {
    /// Worksheet name.
    pub sheet: String,
    /// What happened.
    pub outcome: SheetOutcome,
}

/// Totals over a set of reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Worksheets that produced a document.
    pub written: usize,
    /// Worksheets skipped for a missing column or no purchase rows.
    pub skipped: usize,
    /// Worksheets whose generation or write failed.
    pub failed: usize,
}

impl Summary {
    /// Count outcomes by kind.
    pub fn of(reports: &[SheetReport]) -> Self {
        reports.iter().fold(Self::default(), |mut s, r| {
            match r.outcome {
                SheetOutcome::Written { .. } => s.written += 1,
                SheetOutcome::Skipped(_) => s.skipped += 1,
                SheetOutcome::Failed(_) => s.failed += 1,
            }
            s
        })
    }
}

/// Output file for a worksheet: `{input-stem}__{sanitized-sheet}.xml` next to
/// the input.
pub fn output_path(input: &Path, sheet_name: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}__{}.xml", sanitize_filename(sheet_name)))
}

/// Convert every worksheet of the workbook at `input`.
///
/// Fails only when the input does not exist or cannot be read as a workbook.
/// Each worksheet is otherwise handled in isolation and reported in sheet
/// order.
pub fn process_workbook(input: &Path, config: &JpkConfig) -> Result<Vec<SheetReport>, JpkError> {
    if !input.exists() {
        return Err(JpkError::InputNotFound(input.to_path_buf()));
    }

    let sheets = read_workbook(input)?;
    let context = DocumentContext::now();

    let reports: Vec<SheetReport> = sheets
        .iter()
        .map(|sheet| SheetReport {
            sheet: sheet.name.clone(),
            outcome: process_worksheet(sheet, &output_path(input, &sheet.name), config, &context),
        })
        .collect();

    let summary = Summary::of(&reports);
    info!(
        written = summary.written,
        skipped = summary.skipped,
        failed = summary.failed,
        "finished {}",
        input.display()
    );
    Ok(reports)
}

/// Convert one worksheet and write its document to `output`.
pub fn process_worksheet(
    sheet: &Worksheet,
    output: &Path,
    config: &JpkConfig,
    context: &DocumentContext,
) -> SheetOutcome {
    info!(sheet = %sheet.name, "processing worksheet");

    let conversion = convert_worksheet(sheet, config, context)
        .and_then(|conv| match conv {
            Conversion::Document { xml, rows } => {
                write_jpk_file(output, &xml)?;
                Ok(SheetOutcome::Written {
                    path: output.to_path_buf(),
                    rows,
                })
            }
            Conversion::Skipped(reason) => Ok(SheetOutcome::Skipped(reason)),
        });

    match conversion {
        Ok(outcome) => {
            match &outcome {
                SheetOutcome::Written { path, rows } => {
                    info!(sheet = %sheet.name, rows, "saved {}", path.display());
                }
                SheetOutcome::Skipped(reason) => {
                    warn!(sheet = %sheet.name, "skipping worksheet: {reason}");
                }
                SheetOutcome::Failed(_) => {}
            }
            outcome
        }
        Err(e) => {
            error!(sheet = %sheet.name, "worksheet failed: {e}");
            SheetOutcome::Failed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_sits_beside_input() {
        let input = Path::new("/data/reports/vat 2024.xlsx");
        assert_eq!(
            output_path(input, "Marzec/Kwiecień"),
            PathBuf::from("/data/reports/vat 2024__Marzec_Kwiecień.xml")
        );
    }

    #[test]
    fn output_path_relative_input() {
        assert_eq!(
            output_path(Path::new("zakupy.xlsx"), "Q1: \"A\""),
            PathBuf::from("zakupy__Q1_ _A_.xml")
        );
    }

    #[test]
    fn summary_counts_outcomes() {
        let reports = vec![
            SheetReport {
                sheet: "a".into(),
                outcome: SheetOutcome::Written {
                    path: "a.xml".into(),
                    rows: 3,
                },
            },
            SheetReport {
                sheet: "b".into(),
                outcome: SheetOutcome::Skipped(SkipReason::NoPurchaseRows),
            },
            SheetReport {
                sheet: "c".into(),
                outcome: SheetOutcome::Failed(JpkError::Xml("boom".into())),
            },
        ];
        assert_eq!(
            Summary::of(&reports),
            Summary {
                written: 1,
                skipped: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn missing_input_is_fatal() {
        let err = process_workbook(Path::new("/nonexistent/dir/missing.xlsx"), &JpkConfig::default())
            .unwrap_err();
        assert!(matches!(err, JpkError::InputNotFound(_)));
    }
}
