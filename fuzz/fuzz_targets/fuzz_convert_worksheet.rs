#![no_main]

use chrono::NaiveDate;
use jpk_vat::convert::convert_worksheet;
use jpk_vat::core::{CellValue, Worksheet};
use jpk_vat::jpk::{DocumentContext, JpkConfig};
use libfuzzer_sys::fuzz_target;

// Input is a tab/newline separated table; the first line is the header row.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut lines = s.lines();
    let headers: Vec<String> = lines
        .next()
        .unwrap_or_default()
        .split('\t')
        .map(str::to_string)
        .collect();
    let rows = lines
        .map(|l| l.split('\t').map(CellValue::from).collect())
        .collect();
    let sheet = Worksheet::new("fuzz", headers, rows);
    let context = DocumentContext {
        generated_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    };
    // Must not panic. Errors are fine, panics are bugs.
    let _ = convert_worksheet(&sheet, &JpkConfig::default(), &context);
});
