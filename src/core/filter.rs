//! Purchase-row selection and amount coercion.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use super::types::{CellValue, PurchaseRecord, ResolvedColumns, Row};

/// The Type value (trimmed, lower-cased) that marks a purchase row.
pub const PURCHASE_TYPE: &str = "purchase";

/// Whether a Type cell marks a purchase record.
pub fn is_purchase(cell: &CellValue) -> bool {
    cell.to_string().trim().to_lowercase() == PURCHASE_TYPE
}

/// Coerce a cell to an amount; anything that is not numeric becomes zero.
///
/// Numbers too large for a [`Decimal`] also become zero, with a warning.
pub fn coerce_amount(cell: &CellValue) -> Decimal {
    parse_amount(cell).unwrap_or_else(|| {
        if out_of_range(cell) {
            warn!(value = %cell, "amount outside the decimal range, using 0");
        }
        dec!(0)
    })
}

fn out_of_range(cell: &CellValue) -> bool {
    match cell {
        CellValue::Number(n) => n.is_finite(),
        CellValue::Text(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

fn parse_amount(cell: &CellValue) -> Option<Decimal> {
    match cell {
        CellValue::Number(n) => Decimal::try_from(*n).ok(),
        CellValue::Int(n) => Some(Decimal::from(*n)),
        CellValue::Bool(b) => Some(if *b { dec!(1) } else { dec!(0) }),
        CellValue::Text(s) => {
            let s = s.trim();
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        CellValue::Empty | CellValue::DateTime(_) | CellValue::Error(_) => None,
    }
}

/// Keep purchase rows in sheet order and project them onto the logical fields.
///
/// Only the retained rows are coerced. Cells missing from short rows read as
/// empty.
pub fn filter_purchases(rows: &[Row], columns: &ResolvedColumns) -> Vec<PurchaseRecord> {
    let empty = CellValue::Empty;
    rows.iter()
        .enumerate()
        .filter(|(_, row)| is_purchase(row.get(columns.type_.index).unwrap_or(&empty)))
        .map(|(i, row)| {
            let cell = |idx: usize| row.get(idx).unwrap_or(&empty);
            PurchaseRecord {
                // +1 for the header row, +1 for 1-based numbering
                source_row: i + 2,
                vat_registration: cell(columns.vat_registration.index).clone(),
                external_document: cell(columns.external_document.index).clone(),
                document_date: cell(columns.document_date.index).clone(),
                receipt_date: cell(columns.receipt_date.index).clone(),
                net: coerce_amount(cell(columns.vat_base.index)),
                vat: coerce_amount(cell(columns.vat_amount.index)),
            }
        })
        .collect()
}
