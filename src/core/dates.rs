//! Day-first date interpretation of spreadsheet cells.

use chrono::{NaiveDate, NaiveDateTime};

use super::types::CellValue;

/// Date-only layouts. Two-digit-year forms come first: they reject
/// four-digit years as trailing input, while `%Y` would accept `24` as year 24.
const DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d.%m.%y", "%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y",
];

const TIME_SUFFIXES: &[&str] = &[" %H:%M:%S", " %H:%M", "T%H:%M:%S", "T%H:%M:%S%.f"];

/// Interpret a cell as a calendar date, reading ambiguous forms day first.
///
/// Spreadsheet date cells are used as-is. Text is accepted in ISO order
/// (`2024-03-01`) or day-first order (`01/03/2024`, `01.03.2024`, `01-03-2024`,
/// `01/03/24`), optionally followed by a time of day which is discarded.
/// Numbers, booleans, blanks and error cells are not dates.
pub fn parse_day_first(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::DateTime(dt) => Some(dt.date()),
        CellValue::Text(s) => parse_text(s.trim()),
        _ => None,
    }
}

fn parse_text(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATE_FORMATS {
        for suffix in TIME_SUFFIXES {
            let full = format!("{fmt}{suffix}");
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, &full) {
                return Some(dt.date());
            }
        }
    }
    None
}
