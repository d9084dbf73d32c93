#![no_main]

use jpk_vat::core::{CellValue, parse_day_first};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = parse_day_first(&CellValue::from(s));
    }
});
