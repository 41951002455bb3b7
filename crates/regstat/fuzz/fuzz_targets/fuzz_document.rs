//! Fuzz target for document text row extraction.

#![no_main]

use libfuzzer_sys::fuzz_target;
use regstat::input::extract_region_rows;

fuzz_target!(|data: &[u8]| {
    if data.len() > 100_000 {
        return;
    }

    let text = String::from_utf8_lossy(data);
    for row in extract_region_rows(&text) {
        assert_eq!(row.len(), 5);
    }
});
