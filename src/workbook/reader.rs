//! Spreadsheet import via calamine.

use std::collections::HashMap;
use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};

use crate::core::{CellValue, JpkError, Row, Worksheet};

/// Read every worksheet of a workbook (xlsx, xlsm, xls, xlsb, ods), in the
/// workbook's own sheet order. The first row of each sheet is its header row.
pub fn read_workbook(path: &Path) -> Result<Vec<Worksheet>, JpkError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| JpkError::Workbook(format!("failed to open {}: {e}", path.display())))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| JpkError::Workbook(format!("failed to read sheet '{name}': {e}")))?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => header_texts(header_row),
            None => Vec::new(),
        };
        let width = headers.len();
        let data: Vec<Row> = rows
            .map(|r| {
                let mut row: Row = r.iter().map(cell_value).collect();
                row.resize(width.max(row.len()), CellValue::Empty);
                row
            })
            .collect();

        sheets.push(Worksheet::new(name.clone(), headers, data));
    }

    Ok(sheets)
}

/// Header texts with blank cells named `Unnamed: <col>` and repeated names
/// suffixed `.1`, `.2`, ...
pub(crate) fn header_texts(cells: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    cells
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = match cell_value(cell) {
                CellValue::Empty => format!("Unnamed: {idx}"),
                other => other.to_string(),
            };
            match seen.get_mut(&base) {
                Some(count) => {
                    *count += 1;
                    format!("{base}.{count}")
                }
                None => {
                    seen.insert(base.clone(), 0);
                    base
                }
            }
        })
        .collect()
}

pub(crate) fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Int(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Error(e) => CellValue::Error(e.to_string()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => CellValue::DateTime(ndt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso(s)
            .map(CellValue::DateTime)
            .unwrap_or_else(|| CellValue::Text(s.clone())),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

fn parse_iso(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
